//! schwimmplan host: owns the refresh timer and serves the published state.

use anyhow::Result;
use tokio::time::MissedTickBehavior;
use tracing_subscriber::EnvFilter;

use schwimmplan_api::server::create_app;
use schwimmplan_api::state::SharedState;
use schwimmplan_core::{metrics, Config, RefreshOrchestrator};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!("Starting schwimmplan v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::load()?;
    tracing::info!(
        base_url = %config.source.base_url,
        interval_secs = config.refresh.interval_secs,
        "Configuration loaded"
    );

    if let Err(e) = metrics::init_metrics() {
        tracing::warn!(error = %e, "Metrics unavailable");
    }

    let state = SharedState::new();
    let orchestrator = RefreshOrchestrator::new(&config)?;

    // One loop serializes cycles: the first tick fires immediately, a slow
    // cycle simply delays the next one. Runs never overlap.
    let refresh_state = state.clone();
    let refresh_interval = config.refresh_interval();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(refresh_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let new_state = orchestrator.refresh().await;
            refresh_state.publish(new_state).await;
        }
    });

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "State server listening");

    axum::serve(listener, create_app(state)).await?;
    Ok(())
}
