use crate::command::Command;
use crate::coordinator::Coordinator;
use crate::error::CoreError;
use crate::model::{LockAction, LockState, OpenerState, SmartlockId};

use super::{DeviceEntity, EntityState, Platform};

/// The lock itself; one per device, named after the device.
///
/// Openers map onto the same surface: "locked" means idle, "open"
/// actuates the electric strike.
#[derive(Debug, Clone)]
pub struct LockEntity {
    coordinator: Coordinator,
    device_id: SmartlockId,
}

impl LockEntity {
    pub fn new(coordinator: Coordinator, device_id: SmartlockId) -> Self {
        Self {
            coordinator,
            device_id,
        }
    }

    pub fn is_locked(&self) -> Option<bool> {
        let device = self.device()?;
        if device.is_opener() {
            device.opener_state().map(OpenerState::is_locked)
        } else {
            device.lock_state().map(LockState::is_locked)
        }
    }

    /// Openers have no locking motion.
    pub fn is_locking(&self) -> Option<bool> {
        self.device()?.lock_state().map(LockState::is_locking)
    }

    pub fn is_unlocking(&self) -> Option<bool> {
        let device = self.device()?;
        if device.is_opener() {
            device.opener_state().map(OpenerState::is_unlocking)
        } else {
            device.lock_state().map(LockState::is_unlocking)
        }
    }

    pub fn is_jammed(&self) -> Option<bool> {
        let device = self.device()?;
        if device.is_opener() {
            device.opener_state().map(OpenerState::is_jammed)
        } else {
            device.lock_state().map(LockState::is_jammed)
        }
    }

    pub async fn lock(&self) -> Result<(), CoreError> {
        self.action(LockAction::Lock).await
    }

    pub async fn unlock(&self) -> Result<(), CoreError> {
        self.action(LockAction::Unlock).await
    }

    /// Unlatch the door (opener: buzz the strike).
    pub async fn open(&self) -> Result<(), CoreError> {
        self.action(LockAction::Unlatch).await
    }

    /// Unlock and relock after the lock 'n' go timeout, optionally
    /// unlatching first.
    pub async fn lock_n_go(&self, unlatch: bool) -> Result<(), CoreError> {
        self.action(if unlatch {
            LockAction::LockNGoUnlatch
        } else {
            LockAction::LockNGo
        })
        .await
    }

    async fn action(&self, action: LockAction) -> Result<(), CoreError> {
        self.coordinator
            .execute(Command::action(self.device_id, action))
            .await
    }
}

impl DeviceEntity for LockEntity {
    fn coordinator(&self) -> &Coordinator {
        &self.coordinator
    }

    fn device_id(&self) -> SmartlockId {
        self.device_id
    }

    fn unique_suffix(&self) -> &str {
        "lock"
    }

    fn platform(&self) -> Platform {
        Platform::Lock
    }

    fn state(&self) -> EntityState {
        EntityState::Lock {
            locked: self.is_locked(),
            locking: self.is_locking(),
            unlocking: self.is_unlocking(),
            jammed: self.is_jammed(),
        }
    }
}
