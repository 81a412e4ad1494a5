//! Route tests for the host HTTP surface.

use axum_test::TestServer;

use schwimmplan_api::server::create_app;
use schwimmplan_api::state::SharedState;
use schwimmplan_core::{metrics, PublishedState, RefreshStatus};

#[tokio::test]
async fn state_route_serves_initializing_before_first_cycle() {
    let server = TestServer::new(create_app(SharedState::new())).unwrap();

    let response = server.get("/api/v1/state").await;
    response.assert_status_ok();

    let state: PublishedState = response.json();
    assert_eq!(state.status, RefreshStatus::Initializing);
    assert!(state.next_event.is_none());
    assert!(state.upcoming.is_empty());
}

#[tokio::test]
async fn state_route_serves_the_latest_published_state() {
    let shared = SharedState::new();
    let server = TestServer::new(create_app(shared.clone())).unwrap();

    shared.publish(PublishedState::download_error()).await;

    let state: PublishedState = server.get("/api/v1/state").await.json();
    assert_eq!(state.status, RefreshStatus::ErrorPdfDownload);
}

#[tokio::test]
async fn state_route_uses_the_wire_status_form() {
    let shared = SharedState::new();
    let server = TestServer::new(create_app(shared.clone())).unwrap();

    shared.publish(PublishedState::no_dates()).await;

    let body: serde_json::Value = server.get("/api/v1/state").await.json();
    assert_eq!(body["status"], "no_dates_found");
    assert!(body["next_event"].is_null());
}

#[tokio::test]
async fn healthz_answers_ok() {
    let server = TestServer::new(create_app(SharedState::new())).unwrap();
    let response = server.get("/healthz").await;
    response.assert_status_ok();
    response.assert_text("ok");
}

#[tokio::test]
async fn metrics_route_serves_prometheus_text() {
    metrics::init_metrics().unwrap();
    metrics::record_cycle("ok", 0.1);

    let server = TestServer::new(create_app(SharedState::new())).unwrap();
    let response = server.get("/metrics").await;
    response.assert_status_ok();
    assert!(response.text().contains("schwimmplan_refresh_cycles_total"));
}
