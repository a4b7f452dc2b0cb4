// Nuki Web API wire types
//
// Field names follow the camelCase JSON of `GET /smartlock`. Only the
// fields the workspace reads are typed; everything else the server sends
// is preserved in the flattened `extra` maps.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identifier of a smartlock (lock, opener, or door) as assigned by Nuki.
pub type SmartlockId = i64;

/// One entry of the `GET /smartlock` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Smartlock {
    pub smartlock_id: SmartlockId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<i64>,
    /// Device type code: 0 keyturner, 1 box, 2 opener, 3 smartdoor,
    /// 4 smartlock 3.0/4th generation.
    #[serde(rename = "type")]
    pub smartlock_type: u8,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firmware_version: Option<u64>,
    #[serde(default)]
    pub state: SmartlockState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<SmartlockConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advanced_config: Option<SmartlockAdvancedConfig>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Live state block reported by the device.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmartlockState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<u8>,
    /// Lock or opener state code; interpretation depends on the device type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_action: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery_critical: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery_charging: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery_charge: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keypad_battery_critical: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doorsensor_battery_critical: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub door_state: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ring_to_open_timer: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub night_mode: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `config` block; writable via `POST /smartlock/{id}/config`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(clippy::struct_excessive_bools)]
pub struct SmartlockConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_unlatch: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lift_up_handle: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pairing_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub led_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub led_brightness: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `advancedConfig` block; writable via
/// `POST /smartlock/{id}/advanced/config`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmartlockAdvancedConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng_timeout: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub single_button_press_action: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub double_button_press_action: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detached_cylinder: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery_type: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub automatic_battery_type_detection: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlatch_duration: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_update_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_lock: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motor_speed: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of `POST /smartlock/{id}/action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub(crate) struct ActionRequest {
    pub action: u8,
    pub option: u8,
}
