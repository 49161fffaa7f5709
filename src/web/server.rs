use axum::{routing::get, Router};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::feeder::Feeder;
use crate::snapshot::SnapshotStore;

use super::api::balloons as balloon_handlers;
use super::api::radius as radius_handlers;
use super::api_doc::ApiDoc;
use super::config::Config;
use super::state::AppState;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Balloon endpoints
        .route("/api/balloons", get(balloon_handlers::list_balloons))
        .route("/api/balloons/{id}", get(balloon_handlers::get_balloon))
        .route(
            "/api/trajectories",
            get(balloon_handlers::list_trajectories),
        )
        .route("/api/bands", get(balloon_handlers::list_bands))
        .route("/api/snapshots", get(balloon_handlers::snapshot_status))
        // Radius analysis
        .route("/api/radius", get(radius_handlers::radius_analysis))
        // OpenAPI / Swagger
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(config: Config) -> std::io::Result<()> {
    let bind_addr = config.web.bind.clone();
    let store = Arc::new(RwLock::new(SnapshotStore::new()));

    let feeder = Feeder::new(config.source.clone(), store.clone())
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    let handles = feeder.spawn();
    log::info!("Started {} snapshot fetch tasks", handles.len());

    let app = router(AppState { store });

    log::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await
}
