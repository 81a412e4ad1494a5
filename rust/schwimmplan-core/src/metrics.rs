use anyhow::{Context, Result};
use prometheus::{
    register_counter_vec, register_gauge, register_histogram, CounterVec, Encoder, Gauge,
    Histogram, TextEncoder,
};
use std::sync::OnceLock;

// Refresh metrics
pub static REFRESH_CYCLES: OnceLock<CounterVec> = OnceLock::new(); // labels: status
pub static REFRESH_DURATION: OnceLock<Histogram> = OnceLock::new();

// Schedule metrics
pub static EVENTS_PARSED: OnceLock<Gauge> = OnceLock::new();
pub static EVENTS_UPCOMING: OnceLock<Gauge> = OnceLock::new();

// Thread-safe initialization result
static INIT_RESULT: OnceLock<Result<()>> = OnceLock::new();

/// Record one finished refresh cycle.
pub fn record_cycle(status: &str, duration_secs: f64) {
    if let Some(cycles) = REFRESH_CYCLES.get() {
        cycles.with_label_values(&[status]).inc();
    }
    if let Some(duration) = REFRESH_DURATION.get() {
        duration.observe(duration_secs);
    }
}

/// Record the event counts of the last parsed document.
pub fn record_events(parsed: usize, upcoming: usize) {
    if let Some(gauge) = EVENTS_PARSED.get() {
        gauge.set(parsed as f64);
    }
    if let Some(gauge) = EVENTS_UPCOMING.get() {
        gauge.set(upcoming as f64);
    }
}

/// Encode all registered metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    // If encoding fails, return empty metrics rather than panic
    if encoder.encode(&metric_families, &mut buffer).is_err() {
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_else(|_| String::new())
}

/// Register all collectors. Safe to call more than once.
pub fn init_metrics() -> Result<()> {
    match INIT_RESULT.get_or_init(init_metrics_internal) {
        Ok(()) => Ok(()),
        Err(e) => Err(anyhow::anyhow!("Metrics initialization failed: {}", e)),
    }
}

fn init_metrics_internal() -> Result<()> {
    if REFRESH_CYCLES.get().is_some() {
        return Ok(()); // Already initialized, not an error
    }

    let refresh_cycles = register_counter_vec!(
        "schwimmplan_refresh_cycles_total",
        "Refresh cycles by published status",
        &["status"]
    )
    .context("Failed to register REFRESH_CYCLES metric")?;

    let refresh_duration = register_histogram!(
        "schwimmplan_refresh_duration_seconds",
        "Wall-clock duration of a full refresh cycle"
    )
    .context("Failed to register REFRESH_DURATION metric")?;

    let events_parsed = register_gauge!(
        "schwimmplan_events_parsed",
        "Entries parsed out of the last schedule document"
    )
    .context("Failed to register EVENTS_PARSED metric")?;

    let events_upcoming = register_gauge!(
        "schwimmplan_events_upcoming",
        "Upcoming events in the last published state"
    )
    .context("Failed to register EVENTS_UPCOMING metric")?;

    let _ = REFRESH_CYCLES.set(refresh_cycles);
    let _ = REFRESH_DURATION.set(refresh_duration);
    let _ = EVENTS_PARSED.set(events_parsed);
    let _ = EVENTS_UPCOMING.set(events_upcoming);

    Ok(())
}
