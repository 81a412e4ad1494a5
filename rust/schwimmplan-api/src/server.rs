use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use tower_http::trace::TraceLayer;

use schwimmplan_core::{metrics, PublishedState};

use crate::state::SharedState;

/// Build the host router: published state, liveness, metrics.
pub fn create_app(state: SharedState) -> Router {
    Router::new()
        .route("/api/v1/state", get(get_state))
        .route("/healthz", get(healthz))
        .route("/metrics", get(get_metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn get_state(State(state): State<SharedState>) -> Json<PublishedState> {
    Json(state.snapshot().await)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn get_metrics() -> String {
    metrics::get_metrics()
}
