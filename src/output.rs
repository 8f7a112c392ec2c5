//! Terminal output helpers.
//!
//! Status messages go to stderr so stdout only carries data and shell
//! statements. Coloring follows `NO_COLOR` through `colored`.

use colored::Colorize;

/// Print a confirmed mutation (`success: ...`).
pub fn success(msg: &str) {
    eprintln!("{} {}", "success:".green().bold(), msg);
}

/// Print a failure (`error: ...`).
pub fn error(msg: &str) {
    eprintln!("{} {}", "error:".red().bold(), msg);
}

/// Print a warning (`warning: ...`).
pub fn warn(msg: &str) {
    eprintln!("{} {}", "warning:".yellow().bold(), msg);
}

/// Print plain data to stdout.
pub fn data(msg: impl std::fmt::Display) {
    println!("{msg}");
}
