use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("offset {0} is outside the lookback window")]
    OffsetOutOfRange(usize),
    #[error("snapshot directory not found: {0}")]
    DirectoryNotFound(String),
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("snapshot payload is not an array")]
    NotAnArray,
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
