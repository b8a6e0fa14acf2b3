//! Terminal output for the binary's own diagnostics.
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically. Command
//! results go to the dispatcher's sinks, never through here.

use colored::Colorize;

/// Print error (red bold "error:" prefix) to stderr.
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "warning:" prefix) to stderr.
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "warning".yellow(), msg);
}
