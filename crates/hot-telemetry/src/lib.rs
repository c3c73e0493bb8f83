//! # Hot Telemetry
//!
//! Logging and metrics for the Hot ledger.
//!
//! ## Components
//!
//! - **Logs**: `tracing-subscriber` with `EnvFilter`, pretty or JSON output
//! - **Metrics**: Prometheus counters, gauges and histograms in a global registry
//!
//! ## Usage
//!
//! ```rust,ignore
//! use hot_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     init_telemetry(&TelemetryConfig::from_env())?;
//!     // Ledger operations now log and record metrics
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `HOT_SERVICE_NAME` | `hot-ledger` | Service name in logs |
//! | `HOT_LOG_LEVEL` | `info` | Log level filter (falls back to `RUST_LOG`) |
//! | `HOT_JSON_LOGS` | `false` | JSON log lines |

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod logging;
pub mod metrics;

pub use config::TelemetryConfig;
pub use logging::init_logging;
pub use metrics::{
    encode_metrics, register_metrics, BLACKLISTED_ACCOUNTS, EMERGENCY_WITHDRAWALS, LEDGER_ERRORS,
    REROUTED_CREDITS, RESOLUTION_HOPS, TRANSFERS,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The global subscriber could not be installed
    #[error("Failed to initialize logger: {0}")]
    LoggerInit(String),

    /// A collector could not be registered or encoded
    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    /// The configuration does not parse
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize logging and register metrics.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    register_metrics()?;
    init_logging(config)
}

/// Convenience macro for recording a metric increment.
#[macro_export]
macro_rules! metric_inc {
    ($metric:expr) => {
        $metric.inc()
    };
    ($metric:expr, $labels:expr) => {
        $metric.with_label_values($labels).inc()
    };
}

/// Convenience macro for recording a metric with a value.
#[macro_export]
macro_rules! metric_observe {
    ($metric:expr, $value:expr) => {
        $metric.observe($value)
    };
    ($metric:expr, $labels:expr, $value:expr) => {
        $metric.with_label_values($labels).observe($value)
    };
}
