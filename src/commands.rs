use std::{env, path::Path, process::ExitCode};

use crate::{
    cli::Commands,
    config::Settings,
    error::AppError,
    git::GitConfig,
    hook,
    identity::{Credential, Identity},
    output,
    session::SessionState,
    store::{ConfigStore, IdentityStore},
    validation::validate_credential,
};

/// Shell function that applies `use` and `reset` to the calling shell
const SHELL_INIT: &str = r#"git-id() {
    case "$1" in
        use|reset)
            __git_id_script="$(command git-id "$@")"
            __git_id_status=$?
            eval "$__git_id_script"
            unset __git_id_script
            return $__git_id_status
            ;;
        *)
            command git-id "$@"
            ;;
    esac
}"#;

/// Result of an `add`
#[derive(Debug, PartialEq, Eq)]
pub struct Added {
    /// Whether the identity did not exist before
    pub created: bool,
    /// Credential field left over from an earlier `add` with the other credential type
    pub stale_field: Option<&'static str>,
}

/// Validates the credential and writes the identity
pub fn add<S: ConfigStore>(
    store: &IdentityStore<S>,
    id: &str,
    full_name: &str,
    email: &str,
    credential_spec: &str,
) -> Result<Added, AppError> {
    let credential = validate_credential(credential_spec)?;
    let created = !store.exists(id)?;

    let stale_field = match &credential {
        Credential::SshKey(_) if store.token(id)?.is_some() => Some("token"),
        Credential::Token(_) if store.ssh_key(id)?.is_some() => Some("ssh key"),
        _ => None,
    };

    match &credential {
        Credential::SshKey(path) => store.upsert(id, full_name, email, Some(path), None)?,
        Credential::Token(token) => store.upsert(id, full_name, email, None, Some(token))?,
    }

    Ok(Added { created, stale_field })
}

/// Deletes an existing identity
pub fn delete<S: ConfigStore>(store: &IdentityStore<S>, id: &str) -> Result<(), AppError> {
    store.remove(id)
}

/// Loads an identity for display
pub fn show<S: ConfigStore>(store: &IdentityStore<S>, id: &str) -> Result<Identity, AppError> {
    if !store.exists(id)? {
        return Err(AppError::NotFound(id.to_string()));
    }
    store.load(id)
}

/// Activates an identity in `session`, returning the previously active id
pub fn use_identity<S: ConfigStore>(
    store: &IdentityStore<S>,
    session: &mut SessionState,
    id: &str,
    hook: &Path,
) -> Result<Option<String>, AppError> {
    let identity = show(store, id)?;
    Ok(session.activate(&identity, hook))
}

/// Runs a parsed command
pub fn execute(command: Commands, settings: &Settings) -> Result<ExitCode, AppError> {
    let git = GitConfig::new(settings.git_program.clone());
    let mut session = SessionState::from_env();

    match command {
        Commands::Init => {
            output::data(SHELL_INIT);
            Ok(ExitCode::SUCCESS)
        }
        Commands::SshHook { args } => Ok(hook::ssh(
            &IdentityStore::new(git),
            &session,
            &settings.ssh_program,
            &args,
        )),
        Commands::Askpass { prompt } => {
            Ok(hook::askpass(&IdentityStore::new(git), &session, &prompt))
        }
        command => {
            git.ensure_repository()?;
            run(command, &IdentityStore::new(git), &mut session)
        }
    }
}

/// Runs an identity command against a reachable store
fn run<S: ConfigStore>(
    command: Commands,
    store: &IdentityStore<S>,
    session: &mut SessionState,
) -> Result<ExitCode, AppError> {
    match command {
        Commands::Add {
            id,
            full_name,
            email,
            credential,
        } => {
            let added = add(store, &id, &full_name, &email, &credential)?;
            if let Some(field) = added.stale_field {
                output::warn(&format!(
                    "identity {id} still has a {field} from a previous add; it was kept"
                ));
            }
            let action = if added.created { "created" } else { "updated" };
            output::success(&format!("identity {id} {action}."));
        }
        Commands::Delete { id } => {
            delete(store, &id)?;
            output::success(&format!("identity {id} deleted."));
        }
        Commands::List => {
            for id in store.list_ids()? {
                output::data(id);
            }
        }
        Commands::Show { id } => output::data(show(store, &id)?),
        Commands::Current => output::data(session.current()?),
        Commands::Use { id } => {
            let executable = env::current_exe()?;
            let previous = use_identity(store, session, &id, &executable)?;
            print!("{}", session.to_shell());
            match previous {
                Some(previous) if previous != id => {
                    output::success(&format!("switched identity from {previous} to {id}."))
                }
                _ => output::success(&format!("using identity {id}.")),
            }
        }
        Commands::Reset => {
            session.clear();
            print!("{}", session.to_shell());
            output::success("identity session reset.");
            return Ok(ExitCode::FAILURE);
        }
        Commands::Init | Commands::SshHook { .. } | Commands::Askpass { .. } => {
            unreachable!("handled before the repository check")
        }
    }

    Ok(ExitCode::SUCCESS)
}
