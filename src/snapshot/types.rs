use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::altitude::BandFilter;

/// One balloon position record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub lat: f64,
    pub lon: f64,
    pub altitude_km: f64,
}

impl Position {
    pub fn new(lat: f64, lon: f64, altitude_km: f64) -> Self {
        Self {
            lat,
            lon,
            altitude_km,
        }
    }

    /// Latitude/longitude bounds check. Altitude is not checked.
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
            && self.altitude_km.is_finite()
    }
}

/// All positions for a single hour offset. The index of a record is the
/// only identity a balloon has.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    positions: Vec<Position>,
    pub requested_at: DateTime<Utc>,
    /// When the snapshot entered the store.
    pub fetched_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn new(positions: Vec<Position>, requested_at: DateTime<Utc>) -> Self {
        Self {
            positions,
            requested_at,
            fetched_at: requested_at,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn get(&self, slot: usize) -> Option<&Position> {
        self.positions.get(slot)
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Positions allowed by `filter`, keeping their original slot index.
    pub fn filtered<'a>(
        &'a self,
        filter: &'a BandFilter,
    ) -> impl Iterator<Item = (usize, &'a Position)> + 'a {
        self.positions
            .iter()
            .enumerate()
            .filter(move |(_, p)| filter.allows(p))
    }
}
