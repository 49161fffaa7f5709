mod error;
pub mod ingest;
mod store;
mod types;

pub use error::{IngestError, SnapshotError};
pub use store::{SnapshotStore, LOOKBACK_HOURS};
pub use types::{Position, Snapshot};
