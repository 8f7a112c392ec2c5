//! Assertions over git-id invocations and the session they export.

use std::process::Output;

use super::Session;

/// Captured stdout, where git-id writes data and shell statements.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Captured stderr, where git-id writes status messages and logs.
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// The invocation exited 0.
pub fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "git-id exited with {:?}\nstderr: {}",
        output.status.code(),
        stderr(output)
    );
}

/// The invocation exited non-zero.
pub fn assert_failure(output: &Output) {
    assert!(
        !output.status.success(),
        "git-id unexpectedly succeeded\nstdout: {}",
        stdout(output)
    );
}

/// Data output includes `expected`.
pub fn assert_stdout_contains(output: &Output, expected: &str) {
    let out = stdout(output);
    assert!(out.contains(expected), "no {expected:?} in stdout: {out}");
}

/// A status message includes `expected`.
pub fn assert_stderr_contains(output: &Output, expected: &str) {
    let err = stderr(output);
    assert!(err.contains(expected), "no {expected:?} in stderr: {err}");
}

/// The session exports `key` with exactly `expected`.
pub fn assert_session_var(session: &Session, key: &str, expected: &str) {
    assert_eq!(
        session.get(key),
        Some(expected),
        "{key} in session {:?}",
        session.vars
    );
}

/// The session leaves `key` unset.
pub fn assert_session_unset(session: &Session, key: &str) {
    assert!(
        session.get(key).is_none(),
        "{key} should be unset, session: {:?}",
        session.vars
    );
}
