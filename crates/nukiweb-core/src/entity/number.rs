use crate::command::{Command, ConfigScope, ConfigUpdate};
use crate::coordinator::Coordinator;
use crate::error::CoreError;
use crate::model::{Device, SmartlockId};

use super::{DeviceEntity, EntityState, Platform};

/// Static description of one integer setting with a closed range.
#[derive(Debug)]
pub struct NumberDescription {
    pub key: &'static str,
    pub translation_key: &'static str,
    pub scope: ConfigScope,
    pub min: i64,
    pub max: i64,
    pub step: i64,
    pub value: fn(&Device) -> Option<i64>,
}

pub static NUMBERS: &[NumberDescription] = &[NumberDescription {
    key: "ledBrightness",
    translation_key: "led_brightness",
    scope: ConfigScope::Config,
    min: 0,
    max: 5,
    step: 1,
    value: |d| d.config.as_ref()?.led_brightness,
}];

#[derive(Debug, Clone)]
pub struct NumberEntity {
    coordinator: Coordinator,
    device_id: SmartlockId,
    description: &'static NumberDescription,
}

impl NumberEntity {
    pub fn new(
        coordinator: Coordinator,
        device_id: SmartlockId,
        description: &'static NumberDescription,
    ) -> Self {
        Self {
            coordinator,
            device_id,
            description,
        }
    }

    pub fn description(&self) -> &'static NumberDescription {
        self.description
    }

    #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
    pub fn native_value(&self) -> Option<f64> {
        let device = self.device()?;
        (self.description.value)(&device).map(|v| v as f64)
    }

    /// Write a new value. Fractions are truncated; values outside
    /// `min..=max` are rejected without contacting the API.
    pub async fn set_value(&self, value: f64) -> Result<(), CoreError> {
        let value = self.validate(value)?;
        let update = ConfigUpdate::single(self.description.key, value);
        self.coordinator
            .execute(Command::update(
                self.description.scope,
                self.device_id,
                update,
            ))
            .await
    }

    #[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
    fn validate(&self, value: f64) -> Result<i64, CoreError> {
        let d = self.description;
        let truncated = value.trunc();
        if !truncated.is_finite() || truncated < d.min as f64 || truncated > d.max as f64 {
            return Err(CoreError::ValidationFailed {
                message: format!("{} must be between {} and {}, got {value}", d.key, d.min, d.max),
            });
        }
        Ok(truncated as i64)
    }
}

impl DeviceEntity for NumberEntity {
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
        Platform::Number
    }

    fn translation_key(&self) -> Option<&'static str> {
        Some(self.description.translation_key)
    }

    fn state(&self) -> EntityState {
        EntityState::Number {
            value: self.native_value(),
        }
    }
}
