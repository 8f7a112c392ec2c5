//! Session-scoped identity selection.
//!
//! The active identity lives only in environment variables inherited by child
//! processes. A process cannot change its parent's environment, so the state
//! is rendered as shell statements that the calling shell evaluates.

use std::{env, path::Path};

use tracing::debug;

use crate::{error::AppError, identity::Identity};

pub const GIT_ID: &str = "GIT_ID";
pub const GIT_AUTHOR_NAME: &str = "GIT_AUTHOR_NAME";
pub const GIT_AUTHOR_EMAIL: &str = "GIT_AUTHOR_EMAIL";
pub const GIT_COMMITTER_NAME: &str = "GIT_COMMITTER_NAME";
pub const GIT_COMMITTER_EMAIL: &str = "GIT_COMMITTER_EMAIL";
pub const GIT_SSH: &str = "GIT_SSH";
pub const GIT_ASKPASS: &str = "GIT_ASKPASS";

/// The identity selection of the current shell session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    /// Id of the active identity
    pub active: Option<String>,
    /// Author and committer name
    pub name: Option<String>,
    /// Author and committer email
    pub email: Option<String>,
    /// Program git runs as its SSH transport
    pub ssh_hook: Option<String>,
    /// Program git runs to answer credential prompts
    pub askpass_hook: Option<String>,
}

impl SessionState {
    /// Reads the session from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.is_empty());
        Self {
            active: read(GIT_ID),
            name: read(GIT_AUTHOR_NAME),
            email: read(GIT_AUTHOR_EMAIL),
            ssh_hook: read(GIT_SSH),
            askpass_hook: read(GIT_ASKPASS),
        }
    }

    /// Id of the active identity
    pub fn current(&self) -> Result<&str, AppError> {
        self.active.as_deref().ok_or(AppError::NotSet)
    }

    /// Makes `identity` the active one, returning the id it replaced.
    ///
    /// `hook` is the program git should re-invoke for SSH and credential prompts.
    pub fn activate(&mut self, identity: &Identity, hook: &Path) -> Option<String> {
        let hook = hook.to_string_lossy().into_owned();
        let previous = self.active.replace(identity.id.clone());
        self.name = Some(identity.name.clone());
        self.email = Some(identity.email.clone());
        self.ssh_hook = identity.ssh_key.as_ref().map(|_| hook.clone());
        self.askpass_hook = identity.token.as_ref().map(|_| hook);
        debug!(id = %identity.id, ?previous, "session activated");
        previous
    }

    /// Forgets the active identity
    pub fn clear(&mut self) {
        debug!(previous = ?self.active, "session cleared");
        *self = Self::default();
    }

    fn variables(&self) -> [(&'static str, Option<&str>); 7] {
        [
            (GIT_ID, self.active.as_deref()),
            (GIT_AUTHOR_NAME, self.name.as_deref()),
            (GIT_AUTHOR_EMAIL, self.email.as_deref()),
            (GIT_COMMITTER_NAME, self.name.as_deref()),
            (GIT_COMMITTER_EMAIL, self.email.as_deref()),
            (GIT_SSH, self.ssh_hook.as_deref()),
            (GIT_ASKPASS, self.askpass_hook.as_deref()),
        ]
    }

    /// Renders the session as POSIX shell `export`/`unset` statements
    pub fn to_shell(&self) -> String {
        let mut script = String::new();
        let mut unset = Vec::new();

        for (key, value) in self.variables() {
            match value {
                Some(value) => {
                    script.push_str(&format!("export {key}={}\n", shell_quote(value)));
                }
                None => unset.push(key),
            }
        }

        if !unset.is_empty() {
            script.push_str(&format!("unset {}\n", unset.join(" ")));
        }

        script
    }
}

/// Quotes a value for POSIX shells
fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}
