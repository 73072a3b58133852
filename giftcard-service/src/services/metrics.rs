use anyhow::Result;
use metrics::counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::{Mutex, OnceLock};

pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Serializes recorder installation; the global recorder can only be set once.
static INIT_LOCK: Mutex<()> = Mutex::new(());

/// Install the global Prometheus recorder. Safe to call more than once, also
/// concurrently.
pub fn init_metrics() -> Result<()> {
    let _guard = INIT_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

    if METRICS_HANDLE.get().is_some() {
        return Ok(());
    }

    let handle = PrometheusBuilder::new().install_recorder()?;
    let _ = METRICS_HANDLE.set(handle);

    Ok(())
}

pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string())
}

/// Count a finished lookup by outcome: `success`, `rejected`, `unreachable`,
/// `transport` or `invalid_payload`.
pub fn record_lookup(outcome: &'static str) {
    counter!("card_lookups_total", "outcome" => outcome).increment(1);
}
