// ── Command API ──
//
// All write operations flow through one `Command` enum. The coordinator
// routes each variant to its endpoint and refreshes on success.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::model::{Device, LockAction, SmartlockId};

/// Which configuration block a setting lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ConfigScope {
    /// `config`, written via `/smartlock/{id}/config`.
    Config,
    /// `advancedConfig`, written via `/smartlock/{id}/advanced/config`.
    Advanced,
}

impl ConfigScope {
    /// Whether the device reports this block at all.
    pub fn is_present(self, device: &Device) -> bool {
        match self {
            Self::Config => device.config.is_some(),
            Self::Advanced => device.advanced_config.is_some(),
        }
    }
}

/// Partial configuration update: only the listed fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ConfigUpdate(Map<String, Value>);

impl ConfigUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-field update.
    pub fn single(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new().set(key, value)
    }

    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Every write the coordinator can issue.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Action {
        device_id: SmartlockId,
        action: LockAction,
        /// Option bitmask; 0 for none.
        option: u8,
    },
    UpdateConfig {
        device_id: SmartlockId,
        update: ConfigUpdate,
    },
    UpdateAdvancedConfig {
        device_id: SmartlockId,
        update: ConfigUpdate,
    },
}

impl Command {
    pub fn action(device_id: SmartlockId, action: LockAction) -> Self {
        Self::Action {
            device_id,
            action,
            option: 0,
        }
    }

    /// Route a partial update to the endpoint for `scope`.
    pub fn update(scope: ConfigScope, device_id: SmartlockId, update: ConfigUpdate) -> Self {
        match scope {
            ConfigScope::Config => Self::UpdateConfig { device_id, update },
            ConfigScope::Advanced => Self::UpdateAdvancedConfig { device_id, update },
        }
    }

    pub fn device_id(&self) -> SmartlockId {
        match self {
            Self::Action { device_id, .. }
            | Self::UpdateConfig { device_id, .. }
            | Self::UpdateAdvancedConfig { device_id, .. } => *device_id,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn config_update_serializes_flat() {
        let update = ConfigUpdate::single("ledBrightness", 3).set("ledEnabled", true);
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({ "ledBrightness": 3, "ledEnabled": true })
        );
    }

    #[test]
    fn update_routes_by_scope() {
        let cmd = Command::update(ConfigScope::Advanced, 5, ConfigUpdate::single("autoLock", true));
        assert!(matches!(cmd, Command::UpdateAdvancedConfig { device_id: 5, .. }));
        assert_eq!(Command::action(9, LockAction::Lock).device_id(), 9);
    }
}
