// ── Device snapshot ──
//
// Immutable id-keyed view of one successful device list fetch.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use nukiweb_api::{Smartlock, SmartlockId};
use serde::Serialize;

use crate::model::Device;

/// All devices from the most recent successful refresh, keyed by id.
///
/// Later entries win when the server repeats an id.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeviceSnapshot {
    devices: BTreeMap<SmartlockId, Arc<Device>>,
    fetched_at: Option<DateTime<Utc>>,
}

impl DeviceSnapshot {
    pub fn from_smartlocks(smartlocks: Vec<Smartlock>, fetched_at: DateTime<Utc>) -> Self {
        let devices = smartlocks
            .into_iter()
            .map(Device::from)
            .map(|d| (d.id, Arc::new(d)))
            .collect();
        Self {
            devices,
            fetched_at: Some(fetched_at),
        }
    }

    pub fn get(&self, id: SmartlockId) -> Option<Arc<Device>> {
        self.devices.get(&id).cloned()
    }

    pub fn contains(&self, id: SmartlockId) -> bool {
        self.devices.contains_key(&id)
    }

    pub fn ids(&self) -> impl Iterator<Item = SmartlockId> + '_ {
        self.devices.keys().copied()
    }

    pub fn devices(&self) -> impl Iterator<Item = &Arc<Device>> {
        self.devices.values()
    }

    pub fn as_map(&self) -> &BTreeMap<SmartlockId, Arc<Device>> {
        &self.devices
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// When the list was fetched; `None` for the empty initial snapshot.
    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }
}
