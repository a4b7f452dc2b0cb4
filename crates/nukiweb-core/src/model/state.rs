// ── Device state codes ──
//
// Raw state integers from the `state` block, decoded per device type.
// Locks and openers share the `state.state` field but not its meaning.

use serde::{Deserialize, Serialize};

/// Lock state of a keyturner / smart lock / smart door.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LockState {
    Uncalibrated,
    Locked,
    Unlocking,
    Unlocked,
    Locking,
    Unlatched,
    /// Unlocked by a lock 'n' go action, relocks after the timeout.
    UnlockedLockNGo,
    Unlatching,
    MotorBlocked,
    Undefined,
    Other(u8),
}

impl From<u8> for LockState {
    fn from(code: u8) -> Self {
        match code {
            0 => Self::Uncalibrated,
            1 => Self::Locked,
            2 => Self::Unlocking,
            3 => Self::Unlocked,
            4 => Self::Locking,
            5 => Self::Unlatched,
            6 => Self::UnlockedLockNGo,
            7 => Self::Unlatching,
            254 => Self::MotorBlocked,
            255 => Self::Undefined,
            other => Self::Other(other),
        }
    }
}

impl LockState {
    pub fn is_locked(self) -> bool {
        matches!(self, Self::Locked)
    }

    pub fn is_locking(self) -> bool {
        matches!(self, Self::Locking)
    }

    pub fn is_unlocking(self) -> bool {
        matches!(self, Self::Unlocking | Self::Unlatching)
    }

    pub fn is_jammed(self) -> bool {
        matches!(self, Self::MotorBlocked)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Uncalibrated => "uncalibrated",
            Self::Locked => "locked",
            Self::Unlocking => "unlocking",
            Self::Unlocked => "unlocked",
            Self::Locking => "locking",
            Self::Unlatched => "unlatched",
            Self::UnlockedLockNGo => "unlocked (lock 'n' go)",
            Self::Unlatching => "unlatching",
            Self::MotorBlocked => "motor blocked",
            Self::Undefined => "undefined",
            Self::Other(_) => "unknown",
        }
    }
}

/// State of an opener (intercom) device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpenerState {
    Untrained,
    Online,
    RingToOpenActive,
    Open,
    Opening,
    BootRun,
    Undefined,
    Other(u8),
}

impl From<u8> for OpenerState {
    fn from(code: u8) -> Self {
        match code {
            0 => Self::Untrained,
            1 => Self::Online,
            3 => Self::RingToOpenActive,
            5 => Self::Open,
            7 => Self::Opening,
            253 => Self::BootRun,
            255 => Self::Undefined,
            other => Self::Other(other),
        }
    }
}

impl OpenerState {
    /// An idle opener counts as "locked" for the lock entity.
    pub fn is_locked(self) -> bool {
        matches!(self, Self::Online)
    }

    pub fn is_unlocking(self) -> bool {
        matches!(self, Self::Opening)
    }

    pub fn is_ring_to_open_active(self) -> bool {
        matches!(self, Self::RingToOpenActive)
    }

    /// Openers share the motor-blocked code with locks.
    pub fn is_jammed(self) -> bool {
        matches!(self, Self::Other(254))
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Untrained => "untrained",
            Self::Online => "online",
            Self::RingToOpenActive => "rto active",
            Self::Open => "open",
            Self::Opening => "opening",
            Self::BootRun => "boot run",
            Self::Undefined => "undefined",
            Self::Other(254) => "motor blocked",
            Self::Other(_) => "unknown",
        }
    }
}

/// Door sensor state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DoorState {
    Unavailable,
    Deactivated,
    Closed,
    Open,
    Unknown,
    Calibrating,
    Other(u8),
}

impl From<u8> for DoorState {
    fn from(code: u8) -> Self {
        match code {
            0 => Self::Unavailable,
            1 => Self::Deactivated,
            2 => Self::Closed,
            3 => Self::Open,
            4 => Self::Unknown,
            5 => Self::Calibrating,
            other => Self::Other(other),
        }
    }
}

impl DoorState {
    /// `Some(true)` when open, `Some(false)` when closed, `None` otherwise.
    pub fn is_open(self) -> Option<bool> {
        match self {
            Self::Open => Some(true),
            Self::Closed => Some(false),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Unavailable => "unavailable",
            Self::Deactivated => "deactivated",
            Self::Closed => "closed",
            Self::Open => "open",
            Self::Unknown | Self::Other(_) => "unknown",
            Self::Calibrating => "calibrating",
        }
    }
}
