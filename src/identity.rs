use std::fmt;

/// Credential supplied when an identity is added
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    /// Path to an SSH private key, kept exactly as the user typed it
    SshKey(String),
    /// Opaque password or access token
    Token(String),
}

/// An identity record as stored in the repository config
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Unique id, also the config subsection name
    pub id: String,
    /// Author and committer name
    pub name: String,
    /// Author and committer email
    pub email: String,
    /// SSH private key path, if any
    pub ssh_key: Option<String>,
    /// Access token, if any
    pub token: Option<String>,
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}]", self.id)?;
        writeln!(f, "name: {}", self.name)?;
        write!(f, "email: {}", self.email)?;
        if let Some(ssh_key) = &self.ssh_key {
            write!(f, "\nssh key: {ssh_key}")?;
        }
        if let Some(token) = &self.token {
            write!(f, "\ntoken: {token}")?;
        }
        Ok(())
    }
}
