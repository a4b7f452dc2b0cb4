// ── Device domain type ──

use std::fmt;

use nukiweb_api::{SmartlockAdvancedConfig, SmartlockConfig, SmartlockId, SmartlockState};
use serde::{Deserialize, Serialize};

use super::state::{DoorState, LockState, OpenerState};

/// Hardware family, decoded from the wire `type` code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum DeviceType {
    Keyturner,
    Bridge,
    Opener,
    SmartDoor,
    SmartLock3,
    Unknown(u8),
}

impl From<u8> for DeviceType {
    fn from(code: u8) -> Self {
        match code {
            0 => Self::Keyturner,
            1 => Self::Bridge,
            2 => Self::Opener,
            3 => Self::SmartDoor,
            4 => Self::SmartLock3,
            other => Self::Unknown(other),
        }
    }
}

impl From<DeviceType> for u8 {
    fn from(kind: DeviceType) -> Self {
        match kind {
            DeviceType::Keyturner => 0,
            DeviceType::Bridge => 1,
            DeviceType::Opener => 2,
            DeviceType::SmartDoor => 3,
            DeviceType::SmartLock3 => 4,
            DeviceType::Unknown(code) => code,
        }
    }
}

/// Model name shown in the device registry.
impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keyturner => f.write_str("Smart Lock"),
            Self::Bridge => f.write_str("Bridge"),
            Self::Opener => f.write_str("Opener"),
            Self::SmartDoor => f.write_str("Smart Door"),
            Self::SmartLock3 => f.write_str("Smart Lock 3.0/4. Gen"),
            Self::Unknown(code) => write!(f, "Unknown ({code})"),
        }
    }
}

/// A smartlock as held in the coordinator snapshot.
///
/// The raw `state`, `config`, and `advanced_config` blocks are kept as
/// received; the typed accessors below decode them on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: SmartlockId,
    pub account_id: Option<i64>,
    pub device_type: DeviceType,
    pub name: String,
    pub firmware_version: Option<u64>,
    pub state: SmartlockState,
    pub config: Option<SmartlockConfig>,
    pub advanced_config: Option<SmartlockAdvancedConfig>,
}

impl Device {
    pub fn is_opener(&self) -> bool {
        self.device_type == DeviceType::Opener
    }

    /// Decoded lock state; `None` for openers or when absent.
    pub fn lock_state(&self) -> Option<LockState> {
        if self.is_opener() {
            return None;
        }
        self.state.state.map(LockState::from)
    }

    /// Decoded opener state; `None` for non-openers or when absent.
    pub fn opener_state(&self) -> Option<OpenerState> {
        if !self.is_opener() {
            return None;
        }
        self.state.state.map(OpenerState::from)
    }

    /// Door sensor state; `None` when the device reports none.
    pub fn door_state(&self) -> Option<DoorState> {
        self.state.door_state.map(DoorState::from)
    }

    /// Ring-to-open flag. Only meaningful for openers.
    pub fn ring_to_open_active(&self) -> Option<bool> {
        self.opener_state().map(OpenerState::is_ring_to_open_active)
    }

    pub fn battery_critical(&self) -> Option<bool> {
        self.state.battery_critical
    }

    pub fn battery_charge(&self) -> Option<u8> {
        self.state.battery_charge
    }

    /// Human-readable device state, `"unknown"` when not reported.
    pub fn state_label(&self) -> &'static str {
        if let Some(state) = self.opener_state() {
            state.label()
        } else if let Some(state) = self.lock_state() {
            state.label()
        } else {
            "unknown"
        }
    }

    /// Firmware version as reported, rendered as a plain string.
    pub fn sw_version(&self) -> Option<String> {
        self.firmware_version.map(|v| v.to_string())
    }
}
