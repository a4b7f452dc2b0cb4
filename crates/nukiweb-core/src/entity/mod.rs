// ── Entity layer ──
//
// Device-scoped views over the coordinator snapshot. Each entity reads
// its device from the latest snapshot on every access and writes through
// `Coordinator::execute`. Shared behaviour lives in `DeviceEntity`.

mod binary_sensor;
mod lock;
mod number;
mod select;
mod sensor;
mod switch;

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::coordinator::Coordinator;
use crate::model::{Device, SmartlockId};
use crate::registry::DeviceInfo;

pub use binary_sensor::{BinarySensorEntity, BinarySensorKind};
pub use lock::LockEntity;
pub use number::{NUMBERS, NumberDescription, NumberEntity};
pub use select::{SELECTS, SelectDescription, SelectEntity};
pub use sensor::{SensorEntity, SensorKind};
pub use switch::{SWITCHES, SwitchDescription, SwitchEntity};

// ── Platform ─────────────────────────────────────────────────────

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Platform {
    Lock,
    BinarySensor,
    Sensor,
    Switch,
    Number,
    Select,
}

// ── EntityState ──────────────────────────────────────────────────

/// Point-in-time state of one entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntityState {
    Lock {
        locked: Option<bool>,
        locking: Option<bool>,
        unlocking: Option<bool>,
        jammed: Option<bool>,
    },
    Binary {
        on: Option<bool>,
    },
    Measurement {
        value: Option<i64>,
        unit: &'static str,
    },
    Number {
        value: Option<f64>,
    },
    Select {
        option: Option<String>,
        options: Vec<&'static str>,
    },
    Unavailable,
}

impl fmt::Display for EntityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lock {
                locked,
                locking,
                unlocking,
                jammed,
            } => {
                let label = if *jammed == Some(true) {
                    "jammed"
                } else if *locking == Some(true) {
                    "locking"
                } else if *unlocking == Some(true) {
                    "unlocking"
                } else {
                    match locked {
                        Some(true) => "locked",
                        Some(false) => "unlocked",
                        None => "unknown",
                    }
                };
                f.write_str(label)
            }
            Self::Binary { on } => f.write_str(match on {
                Some(true) => "on",
                Some(false) => "off",
                None => "unknown",
            }),
            Self::Measurement { value, unit } => match value {
                Some(v) => write!(f, "{v} {unit}"),
                None => f.write_str("unknown"),
            },
            Self::Number { value } => match value {
                Some(v) => write!(f, "{v}"),
                None => f.write_str("unknown"),
            },
            Self::Select { option, .. } => f.write_str(option.as_deref().unwrap_or("unknown")),
            Self::Unavailable => f.write_str("unavailable"),
        }
    }
}

// ── DeviceEntity ─────────────────────────────────────────────────

/// Behaviour shared by every entity bound to one smartlock.
pub trait DeviceEntity: Send + Sync {
    fn coordinator(&self) -> &Coordinator;

    fn device_id(&self) -> SmartlockId;

    /// Suffix appended to the device id to form the unique id.
    fn unique_suffix(&self) -> &str;

    fn platform(&self) -> Platform;

    /// Name key of the entity; `None` means "named after the device".
    fn translation_key(&self) -> Option<&'static str> {
        None
    }

    /// Current state, computed from the latest snapshot.
    fn state(&self) -> EntityState;

    fn unique_id(&self) -> String {
        format!("{}_{}", self.device_id(), self.unique_suffix())
    }

    /// Last update succeeded and the device is still in the snapshot.
    fn available(&self) -> bool {
        let coordinator = self.coordinator();
        coordinator.last_update_success() && coordinator.snapshot().contains(self.device_id())
    }

    /// The device record, only while available.
    fn device(&self) -> Option<Arc<Device>> {
        let coordinator = self.coordinator();
        if !coordinator.last_update_success() {
            return None;
        }
        coordinator.snapshot().get(self.device_id())
    }

    fn device_info(&self) -> Option<DeviceInfo> {
        self.device()
            .map(|d| DeviceInfo::for_device(self.coordinator().domain(), &d))
    }
}

// ── Entity ───────────────────────────────────────────────────────

/// Any entity produced by [`setup_entities`].
#[derive(Debug, Clone)]
pub enum Entity {
    Lock(LockEntity),
    BinarySensor(BinarySensorEntity),
    Sensor(SensorEntity),
    Switch(SwitchEntity),
    Number(NumberEntity),
    Select(SelectEntity),
}

impl Entity {
    pub fn as_device_entity(&self) -> &dyn DeviceEntity {
        match self {
            Self::Lock(e) => e,
            Self::BinarySensor(e) => e,
            Self::Sensor(e) => e,
            Self::Switch(e) => e,
            Self::Number(e) => e,
            Self::Select(e) => e,
        }
    }

    pub fn unique_id(&self) -> String {
        self.as_device_entity().unique_id()
    }

    pub fn platform(&self) -> Platform {
        self.as_device_entity().platform()
    }

    pub fn device_id(&self) -> SmartlockId {
        self.as_device_entity().device_id()
    }

    /// Setting or sensor key, `"lock"` for the lock entity.
    pub fn key(&self) -> &str {
        self.as_device_entity().unique_suffix()
    }

    pub fn available(&self) -> bool {
        self.as_device_entity().available()
    }

    pub fn state(&self) -> EntityState {
        let entity = self.as_device_entity();
        if entity.available() {
            entity.state()
        } else {
            EntityState::Unavailable
        }
    }
}

// ── Setup ────────────────────────────────────────────────────────

/// Build every entity for the devices in the current snapshot and
/// register each device in the coordinator's registry.
pub fn setup_entities(coordinator: &Coordinator) -> Vec<Entity> {
    let snapshot = coordinator.snapshot();
    let mut entities = Vec::new();

    for device in snapshot.devices() {
        coordinator
            .registry()
            .register(DeviceInfo::for_device(coordinator.domain(), device));
        entities.extend(entities_for_device(coordinator, device));
    }

    info!(
        devices = snapshot.len(),
        entities = entities.len(),
        "entities set up"
    );
    entities
}

/// Build the entities one device supports. Leaves the registry alone.
pub fn entities_for_device(coordinator: &Coordinator, device: &Device) -> Vec<Entity> {
    let id = device.id;
    let mut out = vec![
        Entity::Lock(LockEntity::new(coordinator.clone(), id)),
        Entity::BinarySensor(BinarySensorEntity::new(
            coordinator.clone(),
            id,
            BinarySensorKind::BatteryCritical,
        )),
    ];

    if device.state.door_state.is_some() {
        out.push(Entity::BinarySensor(BinarySensorEntity::new(
            coordinator.clone(),
            id,
            BinarySensorKind::Door,
        )));
    }
    if device.is_opener() {
        out.push(Entity::BinarySensor(BinarySensorEntity::new(
            coordinator.clone(),
            id,
            BinarySensorKind::RingToOpen,
        )));
    }
    if device.state.battery_charge.is_some() {
        out.push(Entity::Sensor(SensorEntity::new(
            coordinator.clone(),
            id,
            SensorKind::BatteryCharge,
        )));
    }

    out.extend(
        SWITCHES
            .iter()
            .filter(|d| d.scope.is_present(device))
            .map(|d| Entity::Switch(SwitchEntity::new(coordinator.clone(), id, d))),
    );
    out.extend(
        NUMBERS
            .iter()
            .filter(|d| d.scope.is_present(device))
            .map(|d| Entity::Number(NumberEntity::new(coordinator.clone(), id, d))),
    );
    out.extend(
        SELECTS
            .iter()
            .filter(|d| d.scope.is_present(device))
            .map(|d| Entity::Select(SelectEntity::new(coordinator.clone(), id, d))),
    );

    out
}
