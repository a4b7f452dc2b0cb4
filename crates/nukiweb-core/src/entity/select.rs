use crate::command::{Command, ConfigScope, ConfigUpdate};
use crate::coordinator::Coordinator;
use crate::error::CoreError;
use crate::model::options::{
    BATTERY_TYPE, BUTTON_PRESS_ACTION, LNG_TIMEOUT, MOTOR_SPEED, UNLATCH_DURATION,
};
use crate::model::{Device, OptionTable, SmartlockId};

use super::{DeviceEntity, EntityState, Platform};

/// Static description of one enumerated setting.
#[derive(Debug)]
pub struct SelectDescription {
    pub key: &'static str,
    pub translation_key: &'static str,
    pub scope: ConfigScope,
    pub table: OptionTable,
    pub value: fn(&Device) -> Option<i64>,
}

pub static SELECTS: &[SelectDescription] = &[
    SelectDescription {
        key: "lngTimeout",
        translation_key: "lng_timeout",
        scope: ConfigScope::Advanced,
        table: LNG_TIMEOUT,
        value: |d| d.advanced_config.as_ref()?.lng_timeout,
    },
    SelectDescription {
        key: "unlatchDuration",
        translation_key: "unlatch_duration",
        scope: ConfigScope::Advanced,
        table: UNLATCH_DURATION,
        value: |d| d.advanced_config.as_ref()?.unlatch_duration,
    },
    SelectDescription {
        key: "batteryType",
        translation_key: "battery_type",
        scope: ConfigScope::Advanced,
        table: BATTERY_TYPE,
        value: |d| d.advanced_config.as_ref()?.battery_type,
    },
    SelectDescription {
        key: "singleButtonPressAction",
        translation_key: "single_button_action",
        scope: ConfigScope::Advanced,
        table: BUTTON_PRESS_ACTION,
        value: |d| d.advanced_config.as_ref()?.single_button_press_action,
    },
    SelectDescription {
        key: "doubleButtonPressAction",
        translation_key: "double_button_action",
        scope: ConfigScope::Advanced,
        table: BUTTON_PRESS_ACTION,
        value: |d| d.advanced_config.as_ref()?.double_button_press_action,
    },
    SelectDescription {
        key: "motorSpeed",
        translation_key: "motor_speed",
        scope: ConfigScope::Advanced,
        table: MOTOR_SPEED,
        value: |d| d.advanced_config.as_ref()?.motor_speed,
    },
];

#[derive(Debug, Clone)]
pub struct SelectEntity {
    coordinator: Coordinator,
    device_id: SmartlockId,
    description: &'static SelectDescription,
}

impl SelectEntity {
    pub fn new(
        coordinator: Coordinator,
        device_id: SmartlockId,
        description: &'static SelectDescription,
    ) -> Self {
        Self {
            coordinator,
            device_id,
            description,
        }
    }

    pub fn description(&self) -> &'static SelectDescription {
        self.description
    }

    pub fn options(&self) -> Vec<&'static str> {
        self.description.table.labels()
    }

    pub fn current_option(&self) -> Option<String> {
        let device = self.device()?;
        let raw = (self.description.value)(&device)?;
        Some(self.description.table.label_for(raw))
    }

    /// Write the wire value for `label`. Labels outside the table are
    /// rejected without contacting the API.
    pub async fn select_option(&self, label: &str) -> Result<(), CoreError> {
        let d = self.description;
        let value = d
            .table
            .value_for(label)
            .ok_or_else(|| CoreError::ValidationFailed {
                message: format!(
                    "invalid option '{label}' for {}; expected one of: {}",
                    d.key,
                    d.table.labels().join(", ")
                ),
            })?;
        self.coordinator
            .execute(Command::update(
                d.scope,
                self.device_id,
                ConfigUpdate::single(d.key, value),
            ))
            .await
    }
}

impl DeviceEntity for SelectEntity {
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
        Platform::Select
    }

    fn translation_key(&self) -> Option<&'static str> {
        Some(self.description.translation_key)
    }

    fn state(&self) -> EntityState {
        EntityState::Select {
            option: self.current_option(),
            options: self.options(),
        }
    }
}
