use serde::Serialize;

use crate::coordinator::Coordinator;
use crate::model::{DoorState, SmartlockId};

use super::{DeviceEntity, EntityState, Platform};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BinarySensorKind {
    /// Lock battery needs replacing. Every device has one.
    BatteryCritical,
    /// Door sensor open/closed. Only when the device reports a door state.
    Door,
    /// Opener ring-to-open mode. Openers only.
    RingToOpen,
}

impl BinarySensorKind {
    fn suffix(self) -> &'static str {
        match self {
            Self::BatteryCritical => "battery_critical",
            Self::Door => "door",
            Self::RingToOpen => "rto",
        }
    }

    fn translation_key(self) -> &'static str {
        match self {
            Self::BatteryCritical => "battery_critical",
            Self::Door => "door",
            Self::RingToOpen => "ring_to_open",
        }
    }
}

#[derive(Debug, Clone)]
pub struct BinarySensorEntity {
    coordinator: Coordinator,
    device_id: SmartlockId,
    kind: BinarySensorKind,
}

impl BinarySensorEntity {
    pub fn new(coordinator: Coordinator, device_id: SmartlockId, kind: BinarySensorKind) -> Self {
        Self {
            coordinator,
            device_id,
            kind,
        }
    }

    pub fn kind(&self) -> BinarySensorKind {
        self.kind
    }

    pub fn is_on(&self) -> Option<bool> {
        let device = self.device()?;
        match self.kind {
            BinarySensorKind::BatteryCritical => device.battery_critical(),
            BinarySensorKind::Door => device.door_state().and_then(DoorState::is_open),
            BinarySensorKind::RingToOpen => device.ring_to_open_active(),
        }
    }
}

impl DeviceEntity for BinarySensorEntity {
    fn coordinator(&self) -> &Coordinator {
        &self.coordinator
    }

    fn device_id(&self) -> SmartlockId {
        self.device_id
    }

    fn unique_suffix(&self) -> &str {
        self.kind.suffix()
    }

    fn platform(&self) -> Platform {
        Platform::BinarySensor
    }

    fn translation_key(&self) -> Option<&'static str> {
        Some(self.kind.translation_key())
    }

    fn state(&self) -> EntityState {
        EntityState::Binary { on: self.is_on() }
    }
}
