use serde::Serialize;
use utoipa::ToSchema;

use crate::altitude::{AltitudeBand, BandFilter};
use crate::naming::display_name;
use crate::snapshot::SnapshotStore;
use crate::trajectory::{build_trajectory, FlightStats, Trajectory};

/// Everything shown for a selected balloon.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BalloonCard {
    pub balloon_id: usize,
    pub name: String,
    pub current_altitude_km: f64,
    pub band: AltitudeBand,
    pub hours_tracked: usize,
    pub stats: FlightStats,
    pub trajectory: Trajectory,
}

impl BalloonCard {
    pub fn build(
        store: &SnapshotStore,
        start_offset: usize,
        slot: usize,
        filter: &BandFilter,
    ) -> Option<Self> {
        let trajectory = build_trajectory(store, start_offset, slot, filter)?;
        let stats = FlightStats::from_path(&trajectory.path_data)?;
        let current_altitude_km = trajectory.path_data.first()?.altitude_km;

        Some(BalloonCard {
            balloon_id: slot,
            name: display_name(slot),
            current_altitude_km,
            band: AltitudeBand::classify(current_altitude_km),
            hours_tracked: trajectory.path_data.len(),
            stats,
            trajectory,
        })
    }
}
