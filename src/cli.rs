use clap::{Parser, Subcommand};

/// CLI arguments parser using `clap`
#[derive(Parser, Debug)]
#[command(
    name = "git-id",
    version,
    about = "Switch Git identities per shell session",
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log filter directives (overrides --verbose)
    #[arg(long, global = true, env = "GIT_ID_LOG", hide = true)]
    pub log: Option<String>,

    /// Subcommand chosen to execute
    #[command(subcommand)]
    pub command: Commands,
}

// Subcommands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Adds or updates an identity
    Add {
        /// Unique identity id
        id: String,
        /// Author and committer name
        full_name: String,
        /// Author and committer email
        email: String,
        /// Credential: `s:<ssh key path>` or `t:<token>`
        #[arg(allow_hyphen_values = true)]
        credential: String,
    },
    /// Deletes an identity
    Delete {
        /// Identity to delete
        id: String,
    },
    /// Shows an identity
    Show {
        /// Identity to show
        id: String,
    },
    /// Activates an identity for this shell session (prints shell statements)
    Use {
        /// Identity to activate
        id: String,
    },
    /// Lists all identities
    List,
    /// Prints the identity active in this session
    Current,
    /// Deactivates the session identity (prints shell statements)
    Reset,
    /// Prints a shell function that applies `use` and `reset` to the calling shell
    Init,
    /// SSH transport used by git through GIT_SSH
    #[command(hide = true)]
    SshHook {
        /// Arguments git passes to ssh
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Credential prompt responder used by git through GIT_ASKPASS
    #[command(hide = true)]
    Askpass {
        /// Prompt text from git
        prompt: String,
    },
}
