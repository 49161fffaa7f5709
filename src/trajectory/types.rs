use serde::Serialize;
use utoipa::ToSchema;

use crate::snapshot::Position;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PathPoint {
    /// `[lat, lon]`
    #[schema(value_type = Vec<f64>)]
    pub position: [f64; 2],
    pub altitude_km: f64,
    pub hours_ago: usize,
}

impl PathPoint {
    pub fn new(position: &Position, hours_ago: usize) -> Self {
        Self {
            position: [position.lat, position.lon],
            altitude_km: position.altitude_km,
            hours_ago,
        }
    }
}

/// Reconstructed path of one slot, most recent point first.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Trajectory {
    pub balloon_id: usize,
    #[schema(value_type = Vec<Vec<f64>>)]
    pub path: Vec<[f64; 2]>,
    pub path_data: Vec<PathPoint>,
}

impl Trajectory {
    pub fn from_points(balloon_id: usize, path_data: Vec<PathPoint>) -> Self {
        Self {
            balloon_id,
            path: path_data.iter().map(|p| p.position).collect(),
            path_data,
        }
    }

    /// The oldest point, where the tracked flight starts.
    pub fn origin(&self) -> Option<&PathPoint> {
        self.path_data.last()
    }
}
