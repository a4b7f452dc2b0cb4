//! `set <device> <setting> <value>`: write one device setting.
//!
//! Settings are matched by their wire key (`autoUnlatch`) or their
//! snake_case name (`auto_unlatch`).

use nukiweb_core::entity::{NumberEntity, SelectEntity, SwitchEntity};
use nukiweb_core::{Coordinator, DeviceEntity, Entity, EntityState, entities_for_device};

use crate::cli::{GlobalOpts, SetArgs};
use crate::error::CliError;

use super::util;

fn matches_setting(key: &str, translation_key: &str, wanted: &str) -> bool {
    key.eq_ignore_ascii_case(wanted) || translation_key.eq_ignore_ascii_case(wanted)
}

fn parse_switch(raw: &str) -> Result<bool, CliError> {
    match raw.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" | "enable" | "enabled" => Ok(true),
        "off" | "false" | "no" | "0" | "disable" | "disabled" => Ok(false),
        _ => Err(CliError::Validation {
            field: "value".into(),
            reason: format!("expected on or off, got '{raw}'"),
        }),
    }
}

fn parse_number(raw: &str) -> Result<f64, CliError> {
    raw.parse().map_err(|_| CliError::Validation {
        field: "value".into(),
        reason: format!("expected a number, got '{raw}'"),
    })
}

/// An entity that accepts writes.
enum Writable {
    Switch(SwitchEntity),
    Number(NumberEntity),
    Select(SelectEntity),
}

impl Writable {
    fn from_entity(entity: Entity, wanted: &str) -> Option<Self> {
        match entity {
            Entity::Switch(s) => {
                let d = s.description();
                matches_setting(d.key, d.translation_key, wanted).then_some(Self::Switch(s))
            }
            Entity::Number(n) => {
                let d = n.description();
                matches_setting(d.key, d.translation_key, wanted).then_some(Self::Number(n))
            }
            Entity::Select(s) => {
                let d = s.description();
                matches_setting(d.key, d.translation_key, wanted).then_some(Self::Select(s))
            }
            _ => None,
        }
    }

    async fn write(&self, raw: &str) -> Result<(), CliError> {
        match self {
            Self::Switch(s) => s.set(parse_switch(raw)?).await?,
            Self::Number(n) => n.set_value(parse_number(raw)?).await?,
            Self::Select(s) => s.select_option(raw).await?,
        }
        Ok(())
    }

    fn state(&self) -> EntityState {
        match self {
            Self::Switch(s) => s.state(),
            Self::Number(n) => n.state(),
            Self::Select(s) => s.state(),
        }
    }
}

pub async fn handle(
    coordinator: &Coordinator,
    args: SetArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let device = util::resolve_device(coordinator, &args.device)?;
    let setting = entities_for_device(coordinator, &device)
        .into_iter()
        .find_map(|e| Writable::from_entity(e, &args.setting))
        .ok_or_else(|| CliError::NotFound {
            resource_type: "setting".into(),
            identifier: args.setting.clone(),
            list_command: format!("entities --device {}", device.id),
        })?;

    setting.write(&args.value).await?;

    if !global.quiet {
        eprintln!(
            "{} on {} is now {}",
            args.setting,
            device.name,
            setting.state()
        );
    }
    Ok(())
}
