// ── Device registry ──
//
// The host-side catalogue of devices known to an integration. The
// coordinator only ever removes entries from it; entities register
// their device info on setup.

use dashmap::DashMap;
use serde::Serialize;
use tracing::debug;

use crate::config::MANUFACTURER;
use crate::model::{Device, SmartlockId};

/// `(domain, device id)` pair naming one registered device.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DeviceIdentifier {
    pub domain: String,
    pub device_id: String,
}

impl DeviceIdentifier {
    pub fn new(domain: impl Into<String>, device_id: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            device_id: device_id.into(),
        }
    }

    pub fn for_device(domain: &str, id: SmartlockId) -> Self {
        Self::new(domain, id.to_string())
    }

    /// The device id as a smartlock id, if it parses as one.
    pub fn smartlock_id(&self) -> Option<SmartlockId> {
        self.device_id.parse().ok()
    }
}

impl std::fmt::Display for DeviceIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.domain, self.device_id)
    }
}

/// Registry metadata for one physical device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceInfo {
    pub identifier: DeviceIdentifier,
    pub name: String,
    pub manufacturer: String,
    pub model: String,
    pub sw_version: Option<String>,
}

impl DeviceInfo {
    pub fn for_device(domain: &str, device: &Device) -> Self {
        Self {
            identifier: DeviceIdentifier::for_device(domain, device.id),
            name: device.name.clone(),
            manufacturer: MANUFACTURER.to_owned(),
            model: device.device_type.to_string(),
            sw_version: device.sw_version(),
        }
    }
}

/// Storage the coordinator reconciles against.
pub trait DeviceRegistry: Send + Sync {
    /// Every entry registered under `domain`.
    fn devices(&self, domain: &str) -> Vec<DeviceInfo>;

    /// Insert or replace the entry for `info.identifier`.
    fn register(&self, info: DeviceInfo);

    /// Remove an entry; returns whether it existed.
    fn remove(&self, identifier: &DeviceIdentifier) -> bool;

    fn get(&self, identifier: &DeviceIdentifier) -> Option<DeviceInfo>;
}

/// In-process registry backed by a concurrent map.
#[derive(Debug, Default)]
pub struct MemoryDeviceRegistry {
    entries: DashMap<DeviceIdentifier, DeviceInfo>,
}

impl MemoryDeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl DeviceRegistry for MemoryDeviceRegistry {
    fn devices(&self, domain: &str) -> Vec<DeviceInfo> {
        let mut out: Vec<DeviceInfo> = self
            .entries
            .iter()
            .filter(|e| e.key().domain == domain)
            .map(|e| e.value().clone())
            .collect();
        out.sort_by(|a, b| a.identifier.cmp(&b.identifier));
        out
    }

    fn register(&self, info: DeviceInfo) {
        debug!(identifier = %info.identifier, "registering device");
        self.entries.insert(info.identifier.clone(), info);
    }

    fn remove(&self, identifier: &DeviceIdentifier) -> bool {
        self.entries.remove(identifier).is_some()
    }

    fn get(&self, identifier: &DeviceIdentifier) -> Option<DeviceInfo> {
        self.entries.get(identifier).map(|e| e.value().clone())
    }
}
