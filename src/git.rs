use std::process::{Command, Output};

use tracing::debug;

use crate::{error::AppError, store::ConfigStore};

/// Exit code `git config` uses when the requested key or pattern matches nothing
const GIT_CONFIG_NOT_FOUND: i32 = 1;

/// Repository-local git config, reached through the `git` executable
#[derive(Debug, Clone)]
pub struct GitConfig {
    program: String,
}

impl GitConfig {
    /// Creates a handle that shells out to `program` for every config access
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into() }
    }

    /// Checks that the current directory is inside a Git repository so the local config is usable
    pub fn ensure_repository(&self) -> Result<(), AppError> {
        let git_command_output: Output = self.run(&["rev-parse", "--git-dir"])?;

        if !git_command_output.status.success() {
            debug!(
                stderr = %String::from_utf8_lossy(&git_command_output.stderr).trim(),
                "repository check failed"
            );
            return Err(AppError::StoreUnreachable);
        }

        Ok(())
    }

    fn run(&self, args: &[&str]) -> Result<Output, AppError> {
        debug!(program = %self.program, ?args, "running git");
        Ok(Command::new(&self.program).args(args).output()?)
    }

    /// Runs a `git config --local` command, mapping the "nothing matched" exit code to `None`
    fn config(&self, args: &[&str]) -> Result<Option<String>, AppError> {
        let mut full_args = vec!["config", "--local"];
        full_args.extend_from_slice(args);
        let git_command_output: Output = self.run(&full_args)?;

        if git_command_output.status.success() {
            return Ok(Some(String::from_utf8(git_command_output.stdout)?));
        }

        if git_command_output.status.code() == Some(GIT_CONFIG_NOT_FOUND) {
            return Ok(None);
        }

        Err(AppError::GitCommand(
            String::from_utf8(git_command_output.stderr)?.trim().to_string(),
        ))
    }
}

/// Removes the single newline `git config --get` appends, keeping any the value itself ends with
fn strip_line_ending(mut value: String) -> String {
    if value.ends_with('\n') {
        value.pop();
    }
    value
}

impl ConfigStore for GitConfig {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.config(&["--get", key])?.map(strip_line_ending))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        match self.config(&[key, value])? {
            Some(_) => Ok(()),
            None => Err(AppError::GitCommand(format!("invalid config key: {key}"))),
        }
    }

    fn remove_section(&self, section: &str) -> Result<(), AppError> {
        match self.config(&["--remove-section", section])? {
            Some(_) => Ok(()),
            None => Err(AppError::GitCommand(format!("no such section: {section}"))),
        }
    }

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, AppError> {
        let pattern = format!("^{}", prefix.replace('.', "\\."));
        let names = self
            .config(&["--name-only", "--get-regexp", pattern.as_str()])?
            .unwrap_or_default();

        Ok(names
            .lines()
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }
}
