use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::altitude::AltitudeBand;
use crate::naming::display_name;
use crate::snapshot::LOOKBACK_HOURS;
use crate::trajectory::{build_trajectories, BalloonCard, Trajectory};
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::api::view::ViewQuery;
use crate::web::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct BalloonEntry {
    pub id: usize,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub altitude_km: f64,
    pub band: AltitudeBand,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BalloonListResponse {
    pub offset: usize,
    pub tracked: usize,
    pub latest_count: usize,
    pub balloons: Vec<BalloonEntry>,
}

#[utoipa::path(
    get,
    path = "/api/balloons",
    tag = "balloons",
    params(ViewQuery),
    responses(
        (status = 200, description = "Balloons of the displayed hour", body = BalloonListResponse),
        (status = 400, description = "Invalid offset or band list", body = ErrorResponse)
    )
)]
pub async fn list_balloons(
    State(state): State<AppState>,
    Query(query): Query<ViewQuery>,
) -> ApiResult<Json<BalloonListResponse>> {
    let (offset, filter) = query.resolve()?;
    let store = state.view().await;

    let balloons: Vec<BalloonEntry> = store
        .get(offset)
        .map(|snapshot| {
            snapshot
                .filtered(&filter)
                .map(|(id, p)| BalloonEntry {
                    id,
                    name: display_name(id),
                    lat: p.lat,
                    lon: p.lon,
                    altitude_km: p.altitude_km,
                    band: AltitudeBand::classify(p.altitude_km),
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(Json(BalloonListResponse {
        offset,
        tracked: balloons.len(),
        latest_count: store.latest_len(),
        balloons,
    }))
}

#[utoipa::path(
    get,
    path = "/api/balloons/{id}",
    tag = "balloons",
    params(
        ("id" = usize, Path, description = "Slot index of the balloon"),
        ViewQuery
    ),
    responses(
        (status = 200, description = "Balloon card with trajectory and stats", body = BalloonCard),
        (status = 400, description = "Invalid offset or band list", body = ErrorResponse),
        (status = 404, description = "No trajectory for this balloon", body = ErrorResponse)
    )
)]
pub async fn get_balloon(
    State(state): State<AppState>,
    Path(id): Path<usize>,
    Query(query): Query<ViewQuery>,
) -> ApiResult<Json<BalloonCard>> {
    let (offset, filter) = query.resolve()?;
    let store = state.view().await;

    BalloonCard::build(&store, offset, id, &filter)
        .map(Json)
        .ok_or(ApiError::NotFound("trajectory_not_found"))
}

#[utoipa::path(
    get,
    path = "/api/trajectories",
    tag = "balloons",
    params(ViewQuery),
    responses(
        (status = 200, description = "All reconstructed trajectories", body = Vec<Trajectory>),
        (status = 400, description = "Invalid offset or band list", body = ErrorResponse)
    )
)]
pub async fn list_trajectories(
    State(state): State<AppState>,
    Query(query): Query<ViewQuery>,
) -> ApiResult<Json<Vec<Trajectory>>> {
    let (offset, filter) = query.resolve()?;
    let store = state.view().await;
    Ok(Json(build_trajectories(&store, offset, &filter)))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SnapshotStatus {
    pub offset: usize,
    pub present: bool,
    pub count: usize,
    pub requested_at: Option<DateTime<Utc>>,
    pub fetched_at: Option<DateTime<Utc>>,
}

#[utoipa::path(
    get,
    path = "/api/snapshots",
    tag = "snapshots",
    responses(
        (status = 200, description = "Availability of each hourly snapshot", body = Vec<SnapshotStatus>)
    )
)]
pub async fn snapshot_status(State(state): State<AppState>) -> Json<Vec<SnapshotStatus>> {
    let store = state.view().await;
    let status = (0..LOOKBACK_HOURS)
        .map(|offset| {
            let snapshot = store.get(offset);
            SnapshotStatus {
                offset,
                present: snapshot.is_some(),
                count: snapshot.map(|s| s.len()).unwrap_or(0),
                requested_at: snapshot.map(|s| s.requested_at),
                fetched_at: snapshot.map(|s| s.fetched_at),
            }
        })
        .collect();
    Json(status)
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BandLegend {
    pub band: AltitudeBand,
    pub label: String,
    pub color: String,
}

#[utoipa::path(
    get,
    path = "/api/bands",
    tag = "balloons",
    responses(
        (status = 200, description = "Altitude band legend", body = Vec<BandLegend>)
    )
)]
pub async fn list_bands() -> Json<Vec<BandLegend>> {
    Json(
        AltitudeBand::ALL
            .iter()
            .map(|band| BandLegend {
                band: *band,
                label: band.label().to_string(),
                color: band.color().to_string(),
            })
            .collect(),
    )
}
