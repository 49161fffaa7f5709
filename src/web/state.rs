use crate::feeder::SharedStore;
use crate::snapshot::SnapshotStore;

#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
}

impl AppState {
    /// Point-in-time copy of the store. Snapshots are shared, so this only
    /// clones pointers and releases the lock before any computation.
    pub async fn view(&self) -> SnapshotStore {
        self.store.read().await.clone()
    }
}
