use std::path::PathBuf;

use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Error during file I/O operations
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// Error when executing Git commands
    #[error("git command failed: {0}")]
    GitCommand(String),
    /// Error when current directory is not a Git repository with a local config
    #[error("not in a git repository")]
    StoreUnreachable,
    /// Error when an identity has no record in the store
    #[error("{0} is not defined")]
    NotFound(String),
    /// Error when an identity record exists but its name is empty
    #[error("{0} doesn't exist")]
    Undefined(String),
    /// Error when no identity is active in the session
    #[error("no identity in use")]
    NotSet,
    /// Error when a credential spec has neither `s:` nor `t:` prefix
    #[error("invalid credential type (should be s: or t:)")]
    InvalidCredential,
    /// Error when a file does not look like an SSH private key
    #[error("{} is not a valid ssh private key", .0.display())]
    InvalidSshKey(PathBuf),
    /// Error during UTF-8 conversion.
    #[error("UTF-8 error: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),
}
