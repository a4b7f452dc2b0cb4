// ── Domain model ──
//
// Typed views over the wire records: device identity, decoded state
// codes, action codes, and select option tables.

pub mod action;
pub mod device;
pub mod options;
pub mod state;

pub use action::LockAction;
pub use device::{Device, DeviceType};
pub use options::{OptionKind, OptionTable, SelectOption};
pub use state::{DoorState, LockState, OpenerState};

pub use nukiweb_api::{SmartlockAdvancedConfig, SmartlockConfig, SmartlockId, SmartlockState};
