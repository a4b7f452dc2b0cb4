//! Entity listing.

use serde::Serialize;
use tabled::Tabled;

use nukiweb_core::{Coordinator, Entity, EntityState, Platform, SmartlockId, entities_for_device};

use crate::cli::{EntitiesArgs, GlobalOpts, PlatformFilter};
use crate::error::CliError;
use crate::output;

use super::util;

/// Serializable view of one entity.
#[derive(Debug, Serialize)]
pub struct EntityView {
    pub unique_id: String,
    pub device_id: SmartlockId,
    pub platform: Platform,
    pub key: String,
    pub available: bool,
    pub state: EntityState,
}

impl From<&Entity> for EntityView {
    fn from(e: &Entity) -> Self {
        Self {
            unique_id: e.unique_id(),
            device_id: e.device_id(),
            platform: e.platform(),
            key: e.key().to_owned(),
            available: e.available(),
            state: e.state(),
        }
    }
}

#[derive(Tabled)]
struct EntityRow {
    #[tabled(rename = "Unique ID")]
    unique_id: String,
    #[tabled(rename = "Platform")]
    platform: String,
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Options")]
    options: String,
}

impl EntityRow {
    fn new(v: &EntityView, color: bool) -> Self {
        let options = match v.state {
            EntityState::Select { ref options, .. } => options.join(", "),
            _ => String::new(),
        };
        Self {
            unique_id: v.unique_id.clone(),
            platform: v.platform.to_string(),
            key: v.key.clone(),
            state: output::paint_state(&v.state.to_string(), color),
            options,
        }
    }
}

impl From<PlatformFilter> for Platform {
    fn from(filter: PlatformFilter) -> Self {
        match filter {
            PlatformFilter::Lock => Self::Lock,
            PlatformFilter::BinarySensor => Self::BinarySensor,
            PlatformFilter::Sensor => Self::Sensor,
            PlatformFilter::Switch => Self::Switch,
            PlatformFilter::Number => Self::Number,
            PlatformFilter::Select => Self::Select,
        }
    }
}

pub fn handle(
    coordinator: &Coordinator,
    args: &EntitiesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let device_id = args
        .device
        .as_deref()
        .map(|d| util::resolve_device(coordinator, d).map(|d| d.id))
        .transpose()?;
    let platform = args.platform.map(Platform::from);

    let snapshot = coordinator.snapshot();
    let views: Vec<EntityView> = snapshot
        .devices()
        .filter(|d| device_id.is_none_or(|id| d.id == id))
        .flat_map(|d| entities_for_device(coordinator, d))
        .filter(|e| platform.is_none_or(|p| e.platform() == p))
        .map(|e| EntityView::from(&e))
        .collect();

    let color = output::should_color(&global.color);
    let out = output::render_list(
        &global.output,
        &views,
        |v| EntityRow::new(v, color),
        |v| v.unique_id.clone(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
