//! `watch`: run the polling scheduler and print every refresh.

use std::sync::Arc;

use chrono::Local;
use tracing::{debug, warn};

use nukiweb_core::{Coordinator, CoordinatorConfig, MemoryDeviceRegistry, setup_entry};

use crate::cli::{GlobalOpts, OutputFormat, WatchArgs};
use crate::error::CliError;

use super::devices;

pub async fn handle(
    mut config: CoordinatorConfig,
    args: &WatchArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if let Some(interval) = args.interval {
        if interval.is_zero() {
            return Err(CliError::Validation {
                field: "interval".into(),
                reason: "must be greater than zero".into(),
            });
        }
        config.scan_interval = interval;
    }
    let interval = config.scan_interval;

    let entry = setup_entry(config, Arc::new(MemoryDeviceRegistry::new())).await?;
    let coordinator = entry.coordinator.clone();
    let mut snapshots = coordinator.subscribe();
    let mut status = coordinator.status();

    if !global.quiet && matches!(global.output, OutputFormat::Table) {
        eprintln!(
            "Watching {} devices every {} (Ctrl-C to stop)",
            coordinator.snapshot().len(),
            humantime::format_duration(interval)
        );
    }
    devices::print_devices(&coordinator, global);

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                debug!("interrupted");
                break;
            }
            changed = snapshots.changed() => {
                if changed.is_none() {
                    break;
                }
                print_stamp(&coordinator, global);
                devices::print_devices(&coordinator, global);
            }
            Ok(()) = status.changed() => {
                let current = status.borrow_and_update().clone();
                if !current.last_update_success {
                    warn!(
                        error = current.last_error.as_deref().unwrap_or("unknown"),
                        "refresh failed, showing last known state"
                    );
                }
            }
        }
    }

    entry.unload().await;
    Ok(())
}

/// Table output gets a local-time header per refresh.
fn print_stamp(coordinator: &Coordinator, global: &GlobalOpts) {
    if global.quiet || !matches!(global.output, OutputFormat::Table) {
        return;
    }
    if let Some(at) = coordinator.snapshot().fetched_at() {
        eprintln!("── {} ──", at.with_timezone(&Local).format("%H:%M:%S"));
    }
}
