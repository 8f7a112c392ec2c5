mod cli;
mod commands;
mod config;
mod error;
mod git;
mod hook;
mod identity;
mod output;
mod session;
mod store;
mod validation;

use std::{env, process::ExitCode};

use clap::{Parser, error::ErrorKind};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::{
    cli::{Cli, Commands},
    config::{LOG_ENV, Settings},
    hook::Invocation,
};

// Main
fn main() -> ExitCode {
    let args: Vec<String> = env::args_os()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();

    let command = match hook::classify(args.get(1..).unwrap_or_default()) {
        Invocation::Ssh(args) => {
            init_tracing(false, env::var(LOG_ENV).ok().as_deref());
            Commands::SshHook { args }
        }
        Invocation::Askpass(prompt) => {
            init_tracing(false, env::var(LOG_ENV).ok().as_deref());
            Commands::Askpass { prompt }
        }
        Invocation::Command => match Cli::try_parse_from(&args) {
            Ok(cli) => {
                init_tracing(cli.verbose, cli.log.as_deref());
                cli.command
            }
            Err(err) => {
                init_tracing(false, env::var(LOG_ENV).ok().as_deref());
                return usage_error(err);
            }
        },
    };

    match commands::execute(command, &Settings::from_env()) {
        Ok(code) => code,
        Err(err) => {
            output::error(&err.to_string());
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr; stdout is reserved for data and shell statements
fn init_tracing(verbose: bool, directives: Option<&str>) {
    let filter = directives
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| {
            if verbose {
                EnvFilter::new("git_id=debug")
            } else {
                EnvFilter::new("git_id=warn")
            }
        });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();
}

/// Prints clap's usage output; anything but an explicit help or version request is a failure
fn usage_error(err: clap::Error) -> ExitCode {
    if let Err(print_err) = err.print() {
        debug!(%print_err, "failed to print usage");
    }
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    }
}
