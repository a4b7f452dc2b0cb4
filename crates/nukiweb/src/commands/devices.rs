//! Device command handlers.

use std::fmt::Write as _;
use std::sync::Arc;

use tabled::Tabled;

use nukiweb_core::{Coordinator, Device};

use crate::cli::{DevicesArgs, DevicesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ────────────────────────────────────────────────────────

#[derive(Tabled)]
pub struct DeviceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Door")]
    door: String,
    #[tabled(rename = "Battery")]
    battery: String,
    #[tabled(rename = "Firmware")]
    firmware: String,
}

impl DeviceRow {
    pub fn new(d: &Device, color: bool) -> Self {
        let battery = match (d.battery_charge(), d.battery_critical()) {
            (Some(charge), Some(true)) => format!("{charge}% {}", output::paint_state("critical", color)),
            (Some(charge), _) => format!("{charge}%"),
            (None, Some(true)) => output::paint_state("critical", color),
            (None, _) => "-".into(),
        };
        Self {
            id: d.id.to_string(),
            name: d.name.clone(),
            kind: d.device_type.to_string(),
            state: output::paint_state(d.state_label(), color),
            door: d
                .door_state()
                .map_or_else(|| "-".into(), |s| s.label().to_owned()),
            battery,
            firmware: util::or_dash(d.sw_version()),
        }
    }
}

// ── Detail view ──────────────────────────────────────────────────────

fn detail(d: &Device) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "ID:        {}", d.id);
    let _ = writeln!(out, "Name:      {}", d.name);
    let _ = writeln!(out, "Type:      {}", d.device_type);
    let _ = writeln!(out, "State:     {}", d.state_label());
    if let Some(door) = d.door_state() {
        let _ = writeln!(out, "Door:      {}", door.label());
    }
    let _ = writeln!(out, "Battery:   {}%", util::or_dash(d.battery_charge()));
    let _ = writeln!(out, "Critical:  {}", util::yes_no(d.battery_critical()));
    let _ = writeln!(out, "Firmware:  {}", util::or_dash(d.sw_version()));
    if let Some(account) = d.account_id {
        let _ = writeln!(out, "Account:   {account}");
    }
    let _ = write!(
        out,
        "Settings:  config {}, advanced {}",
        if d.config.is_some() { "present" } else { "absent" },
        if d.advanced_config.is_some() { "present" } else { "absent" },
    );
    out
}

// ── Handler ──────────────────────────────────────────────────────────

pub fn handle(
    coordinator: &Coordinator,
    args: DevicesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        DevicesCommand::List => {
            print_devices(coordinator, global);
            Ok(())
        }

        DevicesCommand::Get { device } => {
            let found = util::resolve_device(coordinator, &device)?;
            let out = output::render_single(&global.output, found.as_ref(), detail, |d| {
                d.id.to_string()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

/// Render the current snapshot as a device list.
pub fn print_devices(coordinator: &Coordinator, global: &GlobalOpts) {
    let color = output::should_color(&global.color);
    let snapshot = coordinator.snapshot();
    let devices: Vec<&Device> = snapshot.devices().map(Arc::as_ref).collect();
    let out = output::render_list(
        &global.output,
        &devices,
        |d| DeviceRow::new(d, color),
        |d| d.id.to_string(),
    );
    output::print_output(&out, global.quiet);
}
