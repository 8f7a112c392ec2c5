//! Hook personality: git re-invokes this binary through `GIT_SSH` and
//! `GIT_ASKPASS` after `use` points those variables at it.
//!
//! Both hooks always exit successfully so git's own error handling sees the
//! outcome of the wrapped transport rather than a failure of the hook.

use std::process::{Command, ExitCode};

use tracing::{debug, warn};

use crate::{
    error::AppError,
    session::SessionState,
    store::{ConfigStore, IdentityStore},
};

const USERNAME_PROMPT: &str = "Username";
const PASSWORD_PROMPT: &str = "Password";

/// How the binary was invoked, judged from its raw arguments
#[derive(Debug, PartialEq, Eq)]
pub enum Invocation {
    /// git asked for a transport (`GIT_SSH <host> <command>`)
    Ssh(Vec<String>),
    /// git asked for a credential (`GIT_ASKPASS "Username for ..."`)
    Askpass(String),
    /// Regular command line
    Command,
}

/// Maps git's hook calling conventions onto the explicit hook entry points
pub fn classify(args: &[String]) -> Invocation {
    let Some(first) = args.first() else {
        return Invocation::Command;
    };

    if first.starts_with(USERNAME_PROMPT) || first.starts_with(PASSWORD_PROMPT) {
        Invocation::Askpass(first.clone())
    } else if first.starts_with('-') {
        // git's plain GIT_SSH variant passes the host first, never an option
        Invocation::Command
    } else if first.contains('@') || first.contains('.') {
        Invocation::Ssh(args.to_vec())
    } else {
        Invocation::Command
    }
}

/// Builds the SSH client command, adding the identity file when there is one
pub fn ssh_command(program: &str, key: Option<&str>, args: &[String]) -> Command {
    let mut command = Command::new(program);
    if let Some(key) = key {
        command.args(["-i", key]);
    }
    command.args(args);
    command
}

fn session_ssh_key<S: ConfigStore>(
    store: &IdentityStore<S>,
    session: &SessionState,
) -> Result<Option<String>, AppError> {
    store.ssh_key(session.current()?)
}

/// Runs the SSH client with the active identity's key
pub fn ssh<S: ConfigStore>(
    store: &IdentityStore<S>,
    session: &SessionState,
    program: &str,
    args: &[String],
) -> ExitCode {
    let key = session_ssh_key(store, session).unwrap_or_else(|err| {
        warn!(%err, "no ssh key for session, running ssh without one");
        None
    });

    debug!(program, ?key, ?args, "ssh hook");
    match ssh_command(program, key.as_deref(), args).status() {
        Ok(status) => debug!(%status, "ssh finished"),
        Err(err) => warn!(program, %err, "failed to run ssh"),
    }

    ExitCode::SUCCESS
}

/// Answers a credential prompt from git for the active identity
pub fn answer<S: ConfigStore>(
    store: &IdentityStore<S>,
    session: &SessionState,
    prompt: &str,
) -> Result<String, AppError> {
    let id = session.current()?;

    if prompt.starts_with(USERNAME_PROMPT) {
        Ok(store.load(id)?.name)
    } else if prompt.starts_with(PASSWORD_PROMPT) {
        Ok(store.token(id)?.unwrap_or_default())
    } else {
        debug!(prompt, "unrecognized prompt");
        Ok(String::new())
    }
}

/// Prints the answer to a credential prompt
pub fn askpass<S: ConfigStore>(
    store: &IdentityStore<S>,
    session: &SessionState,
    prompt: &str,
) -> ExitCode {
    let reply = answer(store, session, prompt).unwrap_or_else(|err| {
        warn!(%err, "cannot answer credential prompt");
        String::new()
    });
    println!("{reply}");
    ExitCode::SUCCESS
}
