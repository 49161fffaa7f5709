use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::naming::display_name;
use crate::spatial::{current_matches, historical_matches, RadiusQuery};
use crate::web::api::error::{ApiResult, ErrorResponse};
use crate::web::api::view::ViewQuery;
use crate::web::state::AppState;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RadiusParams {
    pub lat: f64,
    pub lon: f64,
    /// Search radius in km, inclusive.
    pub radius_km: f64,
    /// Hours to rewind for the current pass, 0 (now) to 23.
    #[serde(default)]
    pub offset: Option<usize>,
    /// Comma separated visible bands for the current pass.
    #[serde(default)]
    pub bands: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CurrentEntry {
    pub index: usize,
    pub name: String,
    pub distance_km: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HistoricalEntry {
    pub index: usize,
    pub name: String,
    pub hours_ago: usize,
    pub distance_km: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RadiusResponse {
    pub current: Vec<CurrentEntry>,
    pub historical: Vec<HistoricalEntry>,
}

#[utoipa::path(
    get,
    path = "/api/radius",
    tag = "radius",
    params(RadiusParams),
    responses(
        (status = 200, description = "Balloons inside the radius now and over the lookback window", body = RadiusResponse),
        (status = 400, description = "Invalid parameters", body = ErrorResponse)
    )
)]
pub async fn radius_analysis(
    State(state): State<AppState>,
    Query(params): Query<RadiusParams>,
) -> ApiResult<Json<RadiusResponse>> {
    let (offset, filter) = ViewQuery {
        offset: params.offset,
        bands: params.bands,
    }
    .resolve()?;
    let query = RadiusQuery::new(params.lat, params.lon, params.radius_km);
    let store = state.view().await;

    let current = store
        .get(offset)
        .map(|snapshot| current_matches(snapshot, &filter, &query))
        .unwrap_or_default()
        .into_iter()
        .map(|m| CurrentEntry {
            index: m.index,
            name: display_name(m.index),
            distance_km: m.distance_km,
        })
        .collect();

    let historical = historical_matches(&store, &query)
        .into_iter()
        .map(|m| HistoricalEntry {
            index: m.index,
            name: display_name(m.index),
            hours_ago: m.hours_ago,
            distance_km: m.distance_km,
        })
        .collect();

    Ok(Json(RadiusResponse {
        current,
        historical,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{Position, Snapshot, SnapshotStore};
    use chrono::Utc;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    #[tokio::test]
    async fn test_radius_analysis_names_matches() {
        let mut store = SnapshotStore::new();
        store
            .replace(
                0,
                Snapshot::new(
                    vec![Position::new(50.0, 8.0, 12.0), Position::new(0.0, 0.0, 12.0)],
                    Utc::now(),
                ),
            )
            .unwrap();
        store
            .replace(
                1,
                Snapshot::new(
                    vec![Position::new(0.1, 0.1, 12.0), Position::new(0.2, 0.2, 12.0)],
                    Utc::now(),
                ),
            )
            .unwrap();
        let state = AppState {
            store: Arc::new(RwLock::new(store)),
        };

        let params = RadiusParams {
            lat: 0.0,
            lon: 0.0,
            radius_km: 100.0,
            offset: None,
            bands: None,
        };
        let Json(response) = radius_analysis(State(state), Query(params)).await.unwrap();

        assert_eq!(response.current.len(), 1);
        assert_eq!(response.current[0].index, 1);
        assert_eq!(response.current[0].name, display_name(1));

        let keys: Vec<(usize, usize)> = response
            .historical
            .iter()
            .map(|m| (m.hours_ago, m.index))
            .collect();
        assert_eq!(keys, vec![(0, 1), (1, 0), (1, 1)]);
    }
}
