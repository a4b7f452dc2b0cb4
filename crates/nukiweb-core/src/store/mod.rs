// ── Snapshot store ──
//
// Holds the current device snapshot behind a watch channel. Writers swap
// whole snapshots; readers get an `Arc` and never block the writer.

mod snapshot;

use std::sync::Arc;

use tokio::sync::watch;

pub use snapshot::DeviceSnapshot;

pub(crate) struct SnapshotStore {
    tx: watch::Sender<Arc<DeviceSnapshot>>,
}

impl SnapshotStore {
    pub(crate) fn new() -> Self {
        let (tx, _) = watch::channel(Arc::new(DeviceSnapshot::default()));
        Self { tx }
    }

    pub(crate) fn current(&self) -> Arc<DeviceSnapshot> {
        self.tx.borrow().clone()
    }

    /// Publish a new snapshot, waking every subscriber.
    pub(crate) fn replace(&self, snapshot: DeviceSnapshot) -> Arc<DeviceSnapshot> {
        let snapshot = Arc::new(snapshot);
        self.tx.send_replace(Arc::clone(&snapshot));
        snapshot
    }

    pub(crate) fn clear(&self) {
        self.tx.send_replace(Arc::new(DeviceSnapshot::default()));
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<Arc<DeviceSnapshot>> {
        self.tx.subscribe()
    }
}
