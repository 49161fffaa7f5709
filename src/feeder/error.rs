use thiserror::Error;

use crate::snapshot::{IngestError, SnapshotError};
use crate::web::config::ConfigError;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("ingest error: {0}")]
    Ingest(#[from] IngestError),
    #[error("store error: {0}")]
    Store(#[from] SnapshotError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}
