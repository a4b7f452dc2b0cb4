// ── API-to-domain type conversions ──
//
// Bridges raw `nukiweb_api` records into `nukiweb_core::model` types.
// The wire `type` code becomes a `DeviceType`; state and config blocks
// pass through untouched.

use nukiweb_api::Smartlock;

use crate::model::{Device, DeviceType};

impl From<Smartlock> for Device {
    fn from(raw: Smartlock) -> Self {
        Device {
            id: raw.smartlock_id,
            account_id: raw.account_id,
            device_type: DeviceType::from(raw.smartlock_type),
            name: raw.name,
            firmware_version: raw.firmware_version,
            state: raw.state,
            config: raw.config,
            advanced_config: raw.advanced_config,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::DoorState;
    use serde_json::json;

    #[test]
    fn smartlock_to_device() {
        let raw: Smartlock = serde_json::from_value(json!({
            "smartlockId": 42,
            "accountId": 7,
            "type": 2,
            "name": "Intercom",
            "firmwareVersion": 197_893,
            "state": { "state": 3, "batteryCritical": false, "doorState": 3 },
            "config": { "ledEnabled": true }
        }))
        .unwrap();

        let device = Device::from(raw);
        assert_eq!(device.id, 42);
        assert_eq!(device.account_id, Some(7));
        assert_eq!(device.device_type, DeviceType::Opener);
        assert_eq!(device.door_state(), Some(DoorState::Open));
        assert_eq!(device.ring_to_open_active(), Some(true));
        assert_eq!(device.config.unwrap().led_enabled, Some(true));
        assert!(device.advanced_config.is_none());
    }
}
