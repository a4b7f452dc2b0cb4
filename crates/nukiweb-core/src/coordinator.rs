// ── Polling coordinator ──
//
// Owns the device snapshot for one Nuki Web account. Refreshes it on a
// fixed schedule and on demand, reconciles the device registry after
// every successful refresh, and routes writes to the API.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use nukiweb_api::{NukiWebClient, TransportConfig};

use crate::command::Command;
use crate::config::CoordinatorConfig;
use crate::error::CoreError;
use crate::registry::{DeviceIdentifier, DeviceRegistry, MemoryDeviceRegistry};
use crate::store::{DeviceSnapshot, SnapshotStore};
use crate::stream::SnapshotStream;

// ── UpdateStatus ─────────────────────────────────────────────────

/// Outcome of the most recent refresh attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateStatus {
    pub last_update_success: bool,
    pub last_error: Option<String>,
    pub last_success_at: Option<DateTime<Utc>>,
}

impl Default for UpdateStatus {
    fn default() -> Self {
        Self {
            last_update_success: true,
            last_error: None,
            last_success_at: None,
        }
    }
}

// ── Coordinator ──────────────────────────────────────────────────

/// Shared owner of the device snapshot.
///
/// Cheaply cloneable; every entity holds a clone. Reads never block,
/// refreshes are serialized.
#[derive(Clone)]
pub struct Coordinator {
    inner: Arc<CoordinatorInner>,
}

struct CoordinatorInner {
    config: CoordinatorConfig,
    client: NukiWebClient,
    registry: Arc<dyn DeviceRegistry>,
    store: SnapshotStore,
    status: watch::Sender<UpdateStatus>,
    refresh_lock: Mutex<()>,
    /// Set once by `shutdown`, under `refresh_lock`.
    closed: AtomicBool,
    cancel: CancellationToken,
    cancel_child: Mutex<CancellationToken>,
    task_handles: Mutex<Vec<JoinHandle<()>>>,
}

impl Coordinator {
    /// Build the API client and an empty coordinator. Does not fetch;
    /// call [`first_refresh()`](Self::first_refresh) next.
    pub fn new(
        config: CoordinatorConfig,
        registry: Arc<dyn DeviceRegistry>,
    ) -> Result<Self, CoreError> {
        let transport = TransportConfig::with_timeout(config.timeout);
        let client = NukiWebClient::from_token(config.base_url.as_str(), &config.token, &transport)?;
        Ok(Self::with_client(config, client, registry))
    }

    /// Build around an existing client.
    pub fn with_client(
        config: CoordinatorConfig,
        client: NukiWebClient,
        registry: Arc<dyn DeviceRegistry>,
    ) -> Self {
        let (status, _) = watch::channel(UpdateStatus::default());
        let cancel = CancellationToken::new();
        let cancel_child = cancel.child_token();

        Self {
            inner: Arc::new(CoordinatorInner {
                config,
                client,
                registry,
                store: SnapshotStore::new(),
                status,
                refresh_lock: Mutex::new(()),
                closed: AtomicBool::new(false),
                cancel,
                cancel_child: Mutex::new(cancel_child),
                task_handles: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn config(&self) -> &CoordinatorConfig {
        &self.inner.config
    }

    pub fn domain(&self) -> &str {
        &self.inner.config.domain
    }

    pub fn client(&self) -> &NukiWebClient {
        &self.inner.client
    }

    pub fn registry(&self) -> &Arc<dyn DeviceRegistry> {
        &self.inner.registry
    }

    // ── Refresh ──────────────────────────────────────────────────

    /// Fetch the device list and swap in a new snapshot.
    ///
    /// On failure the previous snapshot stays in place and the error is
    /// recorded in [`UpdateStatus`].
    pub async fn refresh(&self) -> Result<(), CoreError> {
        self.fetch_and_apply()
            .await
            .map_err(|e| CoreError::UpdateFailed {
                message: format!("Error communicating with API: {e}"),
            })
    }

    /// Mandatory initial fetch before entities are built.
    pub async fn first_refresh(&self) -> Result<(), CoreError> {
        self.fetch_and_apply().await.map_err(|e| {
            if e.is_auth_error() {
                CoreError::AuthenticationFailed {
                    message: e.to_string(),
                }
            } else {
                CoreError::SetupFailed {
                    message: format!("Error communicating with API: {e}"),
                }
            }
        })
    }

    /// Refresh on demand; failures are recorded and logged only.
    pub async fn request_refresh(&self) {
        if let Err(e) = self.refresh().await {
            debug!(error = %e, "requested refresh failed");
        }
    }

    async fn fetch_and_apply(&self) -> Result<(), nukiweb_api::Error> {
        let _guard = self.inner.refresh_lock.lock().await;
        if self.is_closed() {
            debug!("coordinator is shut down, skipping refresh");
            return Ok(());
        }

        match self.inner.client.list_smartlocks().await {
            Ok(smartlocks) => {
                let now = Utc::now();
                let snapshot = self
                    .inner
                    .store
                    .replace(DeviceSnapshot::from_smartlocks(smartlocks, now));
                let removed = self.reconcile_devices();
                self.inner.status.send_replace(UpdateStatus {
                    last_update_success: true,
                    last_error: None,
                    last_success_at: Some(now),
                });
                debug!(
                    devices = snapshot.len(),
                    removed = removed.len(),
                    "refresh complete"
                );
                Ok(())
            }
            Err(e) => {
                if e.is_transient() {
                    info!(error = %e, "device update failed, retrying on next poll");
                } else {
                    warn!(error = %e, "device update failed");
                }
                let message = e.to_string();
                self.inner.status.send_modify(|status| {
                    status.last_update_success = false;
                    status.last_error = Some(message);
                });
                Err(e)
            }
        }
    }

    /// Remove registry entries whose device vanished from the snapshot.
    ///
    /// Only entries under this coordinator's domain are considered, and
    /// entries are never added here. Returns what was removed.
    pub fn reconcile_devices(&self) -> Vec<DeviceIdentifier> {
        let snapshot = self.inner.store.current();
        let registry = &self.inner.registry;

        let stale: Vec<DeviceIdentifier> = registry
            .devices(self.domain())
            .into_iter()
            .map(|info| info.identifier)
            .filter(|id| !id.smartlock_id().is_some_and(|sid| snapshot.contains(sid)))
            .collect();

        for identifier in &stale {
            if registry.remove(identifier) {
                info!(%identifier, "removed stale device");
            }
        }
        stale
    }

    // ── Command execution ────────────────────────────────────────

    /// Issue a write, then refresh so the result becomes visible.
    ///
    /// Write errors propagate unchanged and leave the snapshot alone.
    pub async fn execute(&self, cmd: Command) -> Result<(), CoreError> {
        if self.is_closed() {
            return Err(CoreError::Internal("coordinator is shut down".into()));
        }
        route_command(&self.inner.client, &cmd).await?;
        self.request_refresh().await;
        Ok(())
    }

    // ── Scheduling ───────────────────────────────────────────────

    /// Spawn the periodic refresh task. No-op if already running, if the
    /// scan interval is zero, or after [`shutdown()`](Self::shutdown).
    pub async fn start(&self) {
        let interval = self.inner.config.scan_interval;
        if interval.is_zero() || self.is_closed() {
            return;
        }

        let mut handles = self.inner.task_handles.lock().await;
        if !handles.is_empty() {
            return;
        }

        let child = self.inner.cancel.child_token();
        *self.inner.cancel_child.lock().await = child.clone();

        handles.push(tokio::spawn(refresh_task(self.clone(), interval, child)));
        info!(interval_secs = interval.as_secs(), "refresh scheduler started");
    }

    /// Stop scheduling, wait for the task, and discard the snapshot.
    ///
    /// Terminal: later refreshes publish nothing and writes fail.
    pub async fn shutdown(&self) {
        self.inner.cancel_child.lock().await.cancel();

        let mut handles = self.inner.task_handles.lock().await;
        for handle in handles.drain(..) {
            let _ = handle.await;
        }
        drop(handles);

        let _guard = self.inner.refresh_lock.lock().await;
        self.inner.closed.store(true, Ordering::Release);
        self.inner.store.clear();
        debug!("coordinator shut down");
    }

    // ── One-shot convenience ─────────────────────────────────────

    /// Fetch once, run the closure, shut down. No scheduler.
    pub async fn oneshot<F, Fut, T>(config: CoordinatorConfig, f: F) -> Result<T, CoreError>
    where
        F: FnOnce(Coordinator) -> Fut,
        Fut: Future<Output = Result<T, CoreError>>,
    {
        let coordinator = Coordinator::new(config, Arc::new(MemoryDeviceRegistry::new()))?;
        coordinator.first_refresh().await?;
        let result = f(coordinator.clone()).await;
        coordinator.shutdown().await;
        result
    }

    // ── State observation ────────────────────────────────────────

    pub fn snapshot(&self) -> Arc<DeviceSnapshot> {
        self.inner.store.current()
    }

    pub fn subscribe(&self) -> SnapshotStream {
        SnapshotStream::new(self.inner.store.subscribe())
    }

    pub fn status(&self) -> watch::Receiver<UpdateStatus> {
        self.inner.status.subscribe()
    }

    pub fn last_update_success(&self) -> bool {
        self.inner.status.borrow().last_update_success
    }

    /// Whether [`shutdown()`](Self::shutdown) has run.
    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::Acquire)
    }
}

impl std::fmt::Debug for Coordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Coordinator")
            .field("domain", &self.inner.config.domain)
            .field("devices", &self.snapshot().len())
            .field("last_update_success", &self.last_update_success())
            .finish_non_exhaustive()
    }
}

// ── Background tasks ─────────────────────────────────────────────

async fn refresh_task(coordinator: Coordinator, period: Duration, cancel: CancellationToken) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval.tick().await; // first tick is immediate

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => {
                if let Err(e) = coordinator.refresh().await {
                    debug!(error = %e, "periodic refresh failed");
                }
            }
        }
    }
    debug!("refresh task stopped");
}

async fn route_command(client: &NukiWebClient, cmd: &Command) -> Result<(), CoreError> {
    match cmd {
        Command::Action {
            device_id,
            action,
            option,
        } => client.post_action(*device_id, action.code(), *option).await?,
        Command::UpdateConfig { device_id, update } => {
            client.update_config(*device_id, update).await?;
        }
        Command::UpdateAdvancedConfig { device_id, update } => {
            client.update_advanced_config(*device_id, update).await?;
        }
    }
    Ok(())
}
