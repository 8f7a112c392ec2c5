use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use tracing::debug;

use crate::{error::AppError, identity::Credential};

/// Marker every PEM or OpenSSH private key carries on its first line
const PRIVATE_KEY_MARKER: &str = "PRIVATE KEY";

/// Parses a tagged credential spec (`s:<path>` or `t:<token>`)
pub fn parse_credential(spec: &str) -> Result<Credential, AppError> {
    match spec.split_once(':') {
        Some(("s", path)) => Ok(Credential::SshKey(path.to_string())),
        Some(("t", token)) => Ok(Credential::Token(token.to_string())),
        _ => Err(AppError::InvalidCredential),
    }
}

/// Checks that the file at `path` starts with a private key header.
///
/// This is a sanity check against pointing at a public key or a typo,
/// not a validation of the key material.
pub fn validate_ssh_key(path: &Path) -> Result<(), AppError> {
    let invalid = || AppError::InvalidSshKey(path.to_path_buf());

    let file = File::open(path).map_err(|err| {
        debug!(path = %path.display(), %err, "cannot open ssh key");
        invalid()
    })?;

    let mut first_line = String::new();
    BufReader::new(file).read_line(&mut first_line).map_err(|err| {
        debug!(path = %path.display(), %err, "cannot read ssh key");
        invalid()
    })?;

    if first_line.contains(PRIVATE_KEY_MARKER) {
        Ok(())
    } else {
        Err(invalid())
    }
}

/// Parses a credential spec and validates the key file for SSH credentials
pub fn validate_credential(spec: &str) -> Result<Credential, AppError> {
    let credential = parse_credential(spec)?;
    if let Credential::SshKey(path) = &credential {
        validate_ssh_key(Path::new(path))?;
    }
    Ok(credential)
}
