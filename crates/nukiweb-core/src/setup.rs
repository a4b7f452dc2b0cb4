// ── Integration lifecycle ──
//
// Credential check before configuring, and setup/unload of one
// configured account: coordinator, first refresh, entities, scheduler.

use std::sync::Arc;

use tracing::info;

use nukiweb_api::{NukiWebClient, TransportConfig};

use crate::config::CoordinatorConfig;
use crate::coordinator::Coordinator;
use crate::entity::{Entity, setup_entities};
use crate::error::CoreError;
use crate::registry::DeviceRegistry;

/// Probe the token with one device list request.
///
/// Any failure, including a malformed token or URL, yields `false`.
pub async fn validate_credentials(config: &CoordinatorConfig) -> bool {
    let transport = TransportConfig::with_timeout(config.timeout);
    match NukiWebClient::from_token(config.base_url.as_str(), &config.token, &transport) {
        Ok(client) => client.validate_token().await,
        Err(_) => false,
    }
}

/// A running account: its coordinator and the entities bound to it.
#[derive(Debug)]
pub struct IntegrationEntry {
    pub coordinator: Coordinator,
    pub entities: Vec<Entity>,
}

/// Set up one account.
///
/// Fails if the first refresh fails: `AuthenticationFailed` for a
/// rejected token, `SetupFailed` otherwise. On success the periodic
/// refresh is running.
pub async fn setup_entry(
    config: CoordinatorConfig,
    registry: Arc<dyn DeviceRegistry>,
) -> Result<IntegrationEntry, CoreError> {
    let coordinator = Coordinator::new(config, registry)?;
    coordinator.first_refresh().await?;

    let entities = setup_entities(&coordinator);
    coordinator.start().await;

    info!(
        devices = coordinator.snapshot().len(),
        entities = entities.len(),
        "integration set up"
    );
    Ok(IntegrationEntry {
        coordinator,
        entities,
    })
}

impl IntegrationEntry {
    /// Stop scheduling and discard the snapshot. Entities become
    /// unavailable.
    pub async fn unload(self) {
        self.coordinator.shutdown().await;
        info!("integration unloaded");
    }
}
