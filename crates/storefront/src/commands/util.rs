//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::path::Path;

use serde_json::{Map, Value};

use storefront_core::config_object;

use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Without a terminal there is nobody to ask, so the action is refused.
pub fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))
}

/// Read and parse a JSON file for `--from-file` flags.
pub fn read_json_file(path: &Path) -> Result<Value, CliError> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| CliError::Validation {
        field: "from-file".into(),
        reason: format!("invalid JSON: {e}"),
    })
}

/// Parse an inline `--config` argument into a JSON object.
pub fn parse_config_arg(raw: &str) -> Result<Map<String, Value>, CliError> {
    let value: Value = serde_json::from_str(raw).map_err(|e| CliError::Validation {
        field: "config".into(),
        reason: format!("invalid JSON: {e}"),
    })?;
    Ok(config_object(value)?)
}
