use serde::Serialize;

use crate::coordinator::Coordinator;
use crate::model::SmartlockId;

use super::{DeviceEntity, EntityState, Platform};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorKind {
    /// Battery charge in percent.
    BatteryCharge,
}

#[derive(Debug, Clone)]
pub struct SensorEntity {
    coordinator: Coordinator,
    device_id: SmartlockId,
    kind: SensorKind,
}

impl SensorEntity {
    pub fn new(coordinator: Coordinator, device_id: SmartlockId, kind: SensorKind) -> Self {
        Self {
            coordinator,
            device_id,
            kind,
        }
    }

    pub fn native_value(&self) -> Option<i64> {
        let device = self.device()?;
        match self.kind {
            SensorKind::BatteryCharge => device.battery_charge().map(i64::from),
        }
    }

    pub fn unit(&self) -> &'static str {
        match self.kind {
            SensorKind::BatteryCharge => "%",
        }
    }
}

impl DeviceEntity for SensorEntity {
    fn coordinator(&self) -> &Coordinator {
        &self.coordinator
    }

    fn device_id(&self) -> SmartlockId {
        self.device_id
    }

    fn unique_suffix(&self) -> &str {
        match self.kind {
            SensorKind::BatteryCharge => "battery",
        }
    }

    fn platform(&self) -> Platform {
        Platform::Sensor
    }

    fn translation_key(&self) -> Option<&'static str> {
        Some("battery")
    }

    fn state(&self) -> EntityState {
        EntityState::Measurement {
            value: self.native_value(),
            unit: self.unit(),
        }
    }
}
