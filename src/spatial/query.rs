use serde::Serialize;
use utoipa::ToSchema;

use crate::altitude::BandFilter;
use crate::geodesy::distance_km;
use crate::snapshot::{Snapshot, SnapshotStore};

/// Centre point and radius of an area query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusQuery {
    pub lat: f64,
    pub lon: f64,
    pub radius_km: f64,
}

impl RadiusQuery {
    pub fn new(lat: f64, lon: f64, radius_km: f64) -> Self {
        Self {
            lat,
            lon,
            radius_km,
        }
    }

    fn distance_to(&self, lat: f64, lon: f64) -> f64 {
        distance_km(self.lat, self.lon, lat, lon)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CurrentMatch {
    pub index: usize,
    pub distance_km: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct HistoricalMatch {
    pub index: usize,
    pub hours_ago: usize,
    pub distance_km: f64,
}

/// Balloons of the displayed snapshot inside the radius, nearest first.
/// The boundary is inclusive.
pub fn current_matches(
    snapshot: &Snapshot,
    filter: &BandFilter,
    query: &RadiusQuery,
) -> Vec<CurrentMatch> {
    let mut matches: Vec<CurrentMatch> = snapshot
        .filtered(filter)
        .map(|(index, p)| CurrentMatch {
            index,
            distance_km: query.distance_to(p.lat, p.lon),
        })
        .filter(|m| m.distance_km <= query.radius_km)
        .collect();

    matches.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    matches
}

/// Every (slot, hour) pair inside the radius across all present offsets,
/// ordered by hour and then distance. Slots are bounded by the shortest
/// present snapshot.
pub fn historical_matches(store: &SnapshotStore, query: &RadiusQuery) -> Vec<HistoricalMatch> {
    let Some(slots) = store.present().map(|(_, s)| s.len()).min() else {
        return Vec::new();
    };

    let mut matches: Vec<HistoricalMatch> = store
        .present()
        .flat_map(|(offset, snapshot)| {
            snapshot.positions()[..slots]
                .iter()
                .enumerate()
                .map(move |(index, p)| HistoricalMatch {
                    index,
                    hours_ago: offset,
                    distance_km: query.distance_to(p.lat, p.lon),
                })
        })
        .filter(|m| m.distance_km <= query.radius_km)
        .collect();

    matches.sort_by(|a, b| {
        a.hours_ago
            .cmp(&b.hours_ago)
            .then(a.distance_km.total_cmp(&b.distance_km))
    });
    matches
}
