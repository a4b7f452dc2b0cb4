// nukiweb-core: Polling coordinator and entity layer over nukiweb-api.

pub mod command;
pub mod config;
pub mod convert;
pub mod coordinator;
pub mod entity;
pub mod error;
pub mod model;
pub mod registry;
pub mod setup;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use command::{Command, ConfigScope, ConfigUpdate};
pub use config::{CoordinatorConfig, DEFAULT_SCAN_INTERVAL, DOMAIN, MANUFACTURER};
pub use coordinator::{Coordinator, UpdateStatus};
pub use entity::{
    DeviceEntity, Entity, EntityState, Platform, entities_for_device, setup_entities,
};
pub use error::CoreError;
pub use registry::{DeviceIdentifier, DeviceInfo, DeviceRegistry, MemoryDeviceRegistry};
pub use setup::{IntegrationEntry, setup_entry, validate_credentials};
pub use store::DeviceSnapshot;
pub use stream::SnapshotStream;

pub use nukiweb_api::DEFAULT_BASE_URL;

pub use model::{Device, DeviceType, DoorState, LockAction, LockState, OpenerState, SmartlockId};
