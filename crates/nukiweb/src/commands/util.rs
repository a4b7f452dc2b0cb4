//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::sync::Arc;

use nukiweb_core::{Coordinator, Device};

use crate::error::CliError;

/// Resolve a device by smartlock id or (case-insensitive) name.
pub fn resolve_device(coordinator: &Coordinator, identifier: &str) -> Result<Arc<Device>, CliError> {
    let snapshot = coordinator.snapshot();

    if let Ok(id) = identifier.parse() {
        if let Some(device) = snapshot.get(id) {
            return Ok(device);
        }
    }

    snapshot
        .devices()
        .find(|d| d.name.eq_ignore_ascii_case(identifier))
        .cloned()
        .ok_or_else(|| CliError::NotFound {
            resource_type: "device".into(),
            identifier: identifier.into(),
            list_command: "devices list".into(),
        })
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
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

/// `Some(true)` → "yes", `Some(false)` → "no", `None` → "-".
pub fn yes_no(value: Option<bool>) -> &'static str {
    match value {
        Some(true) => "yes",
        Some(false) => "no",
        None => "-",
    }
}

pub fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".into(), |v| v.to_string())
}
