//! Shared helpers for command handlers.

use std::path::Path;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

/// Whether this invocation renders with color.
pub fn color(global: &GlobalOpts) -> bool {
    output::should_color(global.color)
}

/// Refuse a disruptive operation unless `--yes` was passed.
pub fn require_yes(global: &GlobalOpts) -> Result<(), CliError> {
    if global.yes {
        Ok(())
    } else {
        Err(CliError::ConfirmationRequired)
    }
}

/// Print a one-line status message to stderr unless `--quiet`.
pub fn notice(global: &GlobalOpts, message: &str) {
    if !global.quiet {
        eprintln!("{message}");
    }
}

/// Read and parse a JSON file for `--data-file`.
pub fn read_json_file(path: &Path) -> Result<serde_json::Value, CliError> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| CliError::Validation {
        field: "data-file".into(),
        reason: format!("invalid JSON: {e}"),
    })
}

/// Split a `NAME=VALUE` argument.
pub fn parse_assignment(raw: &str) -> Result<(String, String), CliError> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_owned(), value.to_owned())),
        _ => Err(CliError::Validation {
            field: "var".into(),
            reason: format!("expected NAME=VALUE, got '{raw}'"),
        }),
    }
}
