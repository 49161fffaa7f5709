use chrono::Utc;
use log::{debug, warn};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

use crate::snapshot::ingest::ingest_str;
use crate::snapshot::{Snapshot, SnapshotError};

/// Number of hourly offsets kept, 0 (now) through 23.
pub const LOOKBACK_HOURS: usize = 24;

/// Hourly snapshots keyed by hours-ago offset. An absent offset is a hole,
/// never an empty snapshot. Snapshots are only ever replaced whole.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    snapshots: Vec<Option<Arc<Snapshot>>>,
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self {
            snapshots: vec![None; LOOKBACK_HOURS],
        }
    }

    pub fn get(&self, offset: usize) -> Option<&Snapshot> {
        self.snapshots.get(offset)?.as_deref()
    }

    /// Slot count of the most recent snapshot, 0 while it is missing.
    pub fn latest_len(&self) -> usize {
        self.get(0).map(Snapshot::len).unwrap_or(0)
    }

    pub fn replace(&mut self, offset: usize, mut snapshot: Snapshot) -> Result<(), SnapshotError> {
        let entry = self
            .snapshots
            .get_mut(offset)
            .ok_or(SnapshotError::OffsetOutOfRange(offset))?;
        snapshot.fetched_at = Utc::now();
        *entry = Some(Arc::new(snapshot));
        Ok(())
    }

    /// Stores `snapshot` unless the offset already holds one from a later
    /// request. Returns whether the snapshot was stored.
    pub fn replace_if_newer(
        &mut self,
        offset: usize,
        snapshot: Snapshot,
    ) -> Result<bool, SnapshotError> {
        if let Some(current) = self.get(offset) {
            if current.requested_at > snapshot.requested_at {
                debug!(
                    "Discarding stale snapshot for offset {} (requested {}, have {})",
                    offset, snapshot.requested_at, current.requested_at
                );
                return Ok(false);
            }
        }
        self.replace(offset, snapshot)?;
        Ok(true)
    }

    /// Present snapshots in offset order, holes skipped.
    pub fn present(&self) -> impl Iterator<Item = (usize, &Snapshot)> {
        self.snapshots
            .iter()
            .enumerate()
            .filter_map(|(offset, s)| s.as_deref().map(|s| (offset, s)))
    }

    /// The maximal run of present snapshots starting at `start`, stopping at
    /// the first hole.
    pub fn contiguous_from(&self, start: usize) -> Vec<(usize, &Snapshot)> {
        self.snapshots
            .iter()
            .enumerate()
            .skip(start)
            .map_while(|(offset, s)| s.as_deref().map(|s| (offset, s)))
            .collect()
    }

    /// Load `00.json` .. `23.json` from a directory. Missing or unparsable
    /// files are left as holes.
    pub fn load_dir(dir: &Path) -> Result<Self, SnapshotError> {
        if !dir.is_dir() {
            return Err(SnapshotError::DirectoryNotFound(dir.display().to_string()));
        }

        let mut store = Self::new();
        for offset in 0..LOOKBACK_HOURS {
            let path = dir.join(format!("{:02}.json", offset));

            let content = match fs::read_to_string(&path) {
                Ok(content) => content,
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    debug!("No snapshot file for offset {}", offset);
                    continue;
                }
                Err(e) => {
                    warn!("Failed to read snapshot {}: {}", path.display(), e);
                    continue;
                }
            };

            match ingest_str(&content) {
                Ok(positions) => {
                    store.replace(offset, Snapshot::new(positions, Utc::now()))?;
                }
                Err(e) => warn!("Failed to ingest snapshot {}: {}", path.display(), e),
            }
        }

        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::Position;
    use chrono::{Duration, Utc};
    use std::path::PathBuf;

    fn snapshot(len: usize) -> Snapshot {
        Snapshot::new(
            (0..len)
                .map(|i| Position::new(i as f64, i as f64, 12.0))
                .collect(),
            Utc::now(),
        )
    }

    fn temp_dir(name: &str) -> PathBuf {
        let dir =
            std::env::temp_dir().join(format!("balloon-tracker-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_absent_offset_is_a_hole() {
        let mut store = SnapshotStore::new();
        store.replace(0, snapshot(0)).unwrap();

        assert!(store.get(0).is_some());
        assert!(store.get(0).unwrap().is_empty());
        assert!(store.get(1).is_none());
        assert!(store.get(99).is_none());
        assert_eq!(store.latest_len(), 0);
    }

    #[test]
    fn test_replace_rejects_out_of_range_offset() {
        let mut store = SnapshotStore::new();
        assert!(matches!(
            store.replace(LOOKBACK_HOURS, snapshot(1)),
            Err(SnapshotError::OffsetOutOfRange(24))
        ));
    }

    #[test]
    fn test_latest_len_reports_offset_zero() {
        let mut store = SnapshotStore::new();
        assert_eq!(store.latest_len(), 0);
        store.replace(1, snapshot(7)).unwrap();
        assert_eq!(store.latest_len(), 0);
        store.replace(0, snapshot(3)).unwrap();
        assert_eq!(store.latest_len(), 3);
    }

    #[test]
    fn test_contiguous_run_stops_at_hole() {
        let mut store = SnapshotStore::new();
        for offset in [0, 1, 3, 4] {
            store.replace(offset, snapshot(2)).unwrap();
        }

        let offsets: Vec<usize> = store.contiguous_from(0).iter().map(|(o, _)| *o).collect();
        assert_eq!(offsets, vec![0, 1]);

        let offsets: Vec<usize> = store.contiguous_from(3).iter().map(|(o, _)| *o).collect();
        assert_eq!(offsets, vec![3, 4]);

        assert!(store.contiguous_from(2).is_empty());
        assert!(store.contiguous_from(40).is_empty());
    }

    #[test]
    fn test_stale_snapshot_is_discarded() {
        let mut store = SnapshotStore::new();
        let now = Utc::now();
        let newer = Snapshot::new(vec![Position::new(1.0, 1.0, 1.0)], now);
        let older = Snapshot::new(vec![], now - Duration::minutes(5));

        assert!(store.replace_if_newer(0, newer).unwrap());
        assert!(!store.replace_if_newer(0, older).unwrap());
        assert_eq!(store.latest_len(), 1);

        let latest = Snapshot::new(vec![], now + Duration::minutes(5));
        assert!(store.replace_if_newer(0, latest).unwrap());
        assert_eq!(store.latest_len(), 0);
    }

    #[test]
    fn test_replace_stamps_fetched_at() {
        let mut store = SnapshotStore::new();
        let requested_at = Utc::now() - Duration::minutes(10);
        store.replace(2, Snapshot::new(vec![], requested_at)).unwrap();

        let stored = store.get(2).unwrap();
        assert_eq!(stored.requested_at, requested_at);
        assert!(stored.fetched_at > requested_at);
    }

    #[test]
    fn test_load_dir_leaves_missing_files_as_holes() {
        let dir = temp_dir("load-dir");
        fs::write(dir.join("00.json"), "[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]").unwrap();
        fs::write(dir.join("01.json"), "[[1.0, 2.0, 3.0], [400.0, 5.0, 6.0]]").unwrap();
        fs::write(dir.join("02.json"), "{\"broken\": true}").unwrap();
        fs::write(dir.join("05.json"), "[]").unwrap();

        let store = SnapshotStore::load_dir(&dir).unwrap();
        assert_eq!(store.get(0).map(Snapshot::len), Some(2));
        assert_eq!(store.get(1).map(Snapshot::len), Some(1));
        assert!(store.get(2).is_none());
        assert!(store.get(3).is_none());
        assert_eq!(store.get(5).map(Snapshot::len), Some(0));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_dir_requires_directory() {
        let missing = std::env::temp_dir().join("balloon-tracker-does-not-exist");
        assert!(matches!(
            SnapshotStore::load_dir(&missing),
            Err(SnapshotError::DirectoryNotFound(_))
        ));
    }
}
