use utoipa::OpenApi;

use super::api::balloons::{BalloonEntry, BalloonListResponse, BandLegend, SnapshotStatus};
use super::api::error::ErrorResponse;
use super::api::radius::{CurrentEntry, HistoricalEntry, RadiusResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::balloons::list_balloons,
        super::api::balloons::get_balloon,
        super::api::balloons::list_trajectories,
        super::api::balloons::list_bands,
        super::api::balloons::snapshot_status,
        super::api::radius::radius_analysis,
    ),
    components(
        schemas(
            BalloonEntry,
            BalloonListResponse,
            BandLegend,
            SnapshotStatus,
            CurrentEntry,
            HistoricalEntry,
            RadiusResponse,
            ErrorResponse,
            crate::altitude::AltitudeBand,
            crate::trajectory::BalloonCard,
            crate::trajectory::FlightStats,
            crate::trajectory::Trajectory,
            crate::trajectory::PathPoint,
        )
    ),
    info(
        title = "Balloon Tracker API",
        description = "Balloon positions, reconstructed trajectories and radius analysis",
        version = "0.1.0"
    ),
    tags(
        (name = "balloons", description = "Balloon positions and trajectories"),
        (name = "radius", description = "Radius analysis"),
        (name = "snapshots", description = "Hourly snapshot availability")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_routes() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/balloons",
            "/api/balloons/{id}",
            "/api/trajectories",
            "/api/radius",
            "/api/snapshots",
            "/api/bands",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
