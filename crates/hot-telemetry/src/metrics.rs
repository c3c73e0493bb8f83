//! Prometheus metrics for the Hot ledger.
//!
//! All metrics follow the naming convention: `hot_<component>_<metric>_<unit>`

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, Counter, CounterVec, Encoder, Gauge, Histogram, Opts, Registry,
    TextEncoder,
};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    /// Transfers by outcome (committed / rejected)
    pub static ref TRANSFERS: CounterVec = CounterVec::new(
        Opts::new("hot_ledger_transfers_total", "Transfers processed by the ledger"),
        &["outcome"]
    ).expect("metric creation failed");

    /// Emergency withdrawals by outcome (committed / expired / invalid_signature / ...)
    pub static ref EMERGENCY_WITHDRAWALS: CounterVec = CounterVec::new(
        Opts::new(
            "hot_ledger_emergency_withdrawals_total",
            "Emergency withdraw authorizations processed"
        ),
        &["outcome"]
    ).expect("metric creation failed");

    /// Credits whose final holder differs from the nominal destination
    pub static ref REROUTED_CREDITS: Counter = Counter::new(
        "hot_ledger_rerouted_credits_total",
        "Credits rerouted through emergency recipients"
    ).expect("metric creation failed");

    /// Hops walked per successful resolution
    pub static ref RESOLUTION_HOPS: Histogram = Histogram::with_opts(
        prometheus::HistogramOpts::new(
            "hot_resolver_hops",
            "Emergency recipient hops walked per resolution"
        ).buckets(exponential_buckets(1.0, 2.0, 8).expect("static bucket layout"))
    ).expect("metric creation failed");

    /// Accounts currently blacklisted
    pub static ref BLACKLISTED_ACCOUNTS: Gauge = Gauge::new(
        "hot_blacklist_accounts",
        "Number of blacklisted accounts"
    ).expect("metric creation failed");

    /// Ledger errors by kind
    pub static ref LEDGER_ERRORS: CounterVec = CounterVec::new(
        Opts::new("hot_ledger_errors_total", "Rejected ledger operations by error kind"),
        &["kind"]
    ).expect("metric creation failed");
}

/// Register all metrics with the global registry.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(TRANSFERS.clone()),
        Box::new(EMERGENCY_WITHDRAWALS.clone()),
        Box::new(REROUTED_CREDITS.clone()),
        Box::new(RESOLUTION_HOPS.clone()),
        Box::new(BLACKLISTED_ACCOUNTS.clone()),
        Box::new(LEDGER_ERRORS.clone()),
    ];

    for metric in metrics {
        REGISTRY
            .register(metric)
            .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    }

    Ok(())
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}
