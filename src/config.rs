use std::env;

/// Environment variable holding the tracing filter
pub const LOG_ENV: &str = "GIT_ID_LOG";
/// Environment variable overriding the SSH client run by the ssh hook
pub const SSH_PROGRAM_ENV: &str = "GIT_ID_SSH";
/// Environment variable overriding the git executable
pub const GIT_PROGRAM_ENV: &str = "GIT_ID_GIT";

const DEFAULT_SSH_PROGRAM: &str = "ssh";
const DEFAULT_GIT_PROGRAM: &str = "git";

/// Runtime settings read from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Program used as the SSH transport
    pub ssh_program: String,
    /// Program used to read and write the repository config
    pub git_program: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ssh_program: DEFAULT_SSH_PROGRAM.to_string(),
            git_program: DEFAULT_GIT_PROGRAM.to_string(),
        }
    }
}

impl Settings {
    /// Loads settings from the process environment, falling back to defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            ssh_program: non_empty(SSH_PROGRAM_ENV).unwrap_or(defaults.ssh_program),
            git_program: non_empty(GIT_PROGRAM_ENV).unwrap_or(defaults.git_program),
        }
    }
}
