// Boolean settings from the `config` and `advancedConfig` blocks.

use crate::command::{Command, ConfigScope, ConfigUpdate};
use crate::coordinator::Coordinator;
use crate::error::CoreError;
use crate::model::{Device, SmartlockId};

use super::{DeviceEntity, EntityState, Platform};

/// Static description of one boolean setting.
#[derive(Debug)]
pub struct SwitchDescription {
    /// Wire field name; also the unique id suffix.
    pub key: &'static str,
    pub translation_key: &'static str,
    pub scope: ConfigScope,
    pub value: fn(&Device) -> Option<bool>,
}

pub static SWITCHES: &[SwitchDescription] = &[
    SwitchDescription {
        key: "autoUnlatch",
        translation_key: "auto_unlatch",
        scope: ConfigScope::Config,
        value: |d| d.config.as_ref()?.auto_unlatch,
    },
    SwitchDescription {
        key: "liftUpHandle",
        translation_key: "lift_up_handle",
        scope: ConfigScope::Config,
        value: |d| d.config.as_ref()?.lift_up_handle,
    },
    SwitchDescription {
        key: "pairingEnabled",
        translation_key: "pairing_enabled",
        scope: ConfigScope::Config,
        value: |d| d.config.as_ref()?.pairing_enabled,
    },
    SwitchDescription {
        key: "buttonEnabled",
        translation_key: "button_enabled",
        scope: ConfigScope::Config,
        value: |d| d.config.as_ref()?.button_enabled,
    },
    SwitchDescription {
        key: "ledEnabled",
        translation_key: "led_enabled",
        scope: ConfigScope::Config,
        value: |d| d.config.as_ref()?.led_enabled,
    },
    SwitchDescription {
        key: "automaticBatteryTypeDetection",
        translation_key: "auto_battery_detection",
        scope: ConfigScope::Advanced,
        value: |d| d.advanced_config.as_ref()?.automatic_battery_type_detection,
    },
    SwitchDescription {
        key: "detachedCylinder",
        translation_key: "detached_cylinder",
        scope: ConfigScope::Advanced,
        value: |d| d.advanced_config.as_ref()?.detached_cylinder,
    },
    SwitchDescription {
        key: "autoUpdateEnabled",
        translation_key: "auto_update_enabled",
        scope: ConfigScope::Advanced,
        value: |d| d.advanced_config.as_ref()?.auto_update_enabled,
    },
    SwitchDescription {
        key: "autoLock",
        translation_key: "auto_lock",
        scope: ConfigScope::Advanced,
        value: |d| d.advanced_config.as_ref()?.auto_lock,
    },
];

#[derive(Debug, Clone)]
pub struct SwitchEntity {
    coordinator: Coordinator,
    device_id: SmartlockId,
    description: &'static SwitchDescription,
}

impl SwitchEntity {
    pub fn new(
        coordinator: Coordinator,
        device_id: SmartlockId,
        description: &'static SwitchDescription,
    ) -> Self {
        Self {
            coordinator,
            device_id,
            description,
        }
    }

    pub fn description(&self) -> &'static SwitchDescription {
        self.description
    }

    pub fn is_on(&self) -> Option<bool> {
        let device = self.device()?;
        (self.description.value)(&device)
    }

    pub async fn turn_on(&self) -> Result<(), CoreError> {
        self.set(true).await
    }

    pub async fn turn_off(&self) -> Result<(), CoreError> {
        self.set(false).await
    }

    /// Write the setting; the new value shows up after the follow-up refresh.
    pub async fn set(&self, on: bool) -> Result<(), CoreError> {
        let update = ConfigUpdate::single(self.description.key, on);
        self.coordinator
            .execute(Command::update(
                self.description.scope,
                self.device_id,
                update,
            ))
            .await
    }
}

impl DeviceEntity for SwitchEntity {
    fn coordinator(&self) -> &Coordinator {
        &self.coordinator
    }

    fn device_id(&self) -> SmartlockId {
        self.device_id
    }

    fn unique_suffix(&self) -> &str {
        self.description.key
    }

    fn platform(&self) -> Platform {
        Platform::Switch
    }

    fn translation_key(&self) -> Option<&'static str> {
        Some(self.description.translation_key)
    }

    fn state(&self) -> EntityState {
        EntityState::Binary { on: self.is_on() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_split_by_scope() {
        let config = SWITCHES
            .iter()
            .filter(|d| d.scope == ConfigScope::Config)
            .count();
        let advanced = SWITCHES
            .iter()
            .filter(|d| d.scope == ConfigScope::Advanced)
            .count();
        assert_eq!((config, advanced), (5, 4));
    }
}
