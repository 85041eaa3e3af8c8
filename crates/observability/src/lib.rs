//! # Observability
//!
//! Tracing setup and codec metrics for services that exchange pipeline events.
//!
//! ## Features
//!
//! - Tracing initialization (JSON/Pretty/Compact)
//! - `metrics` counters for encoded/decoded events, per kind
//! - In-memory aggregation of codec outcomes for summaries
//!
//! No exporter is installed here; a long-running service installs its own
//! `metrics` recorder.
//!
//! ## Example
//!
//! ```ignore
//! use observability::{init_with_config, metrics::record_decoded};
//!
//! init_with_config(ObservabilityConfig::default())?;
//!
//! let result = contracts::decode::<PngCreatedEvent>(&bytes);
//! record_decoded(EventKind::PngCreated, bytes.len(), result.as_ref().err());
//! ```

pub mod metrics;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

// Re-exports
pub use crate::metrics::{
    record_decoded, record_encoded, CodecStatsAggregator, CodecStatsSummary, KindStats,
    SizeStats,
};

/// Initialize tracing with defaults (JSON, `info`)
pub fn init() -> Result<()> {
    init_with_config(ObservabilityConfig::default())
}

/// Observability configuration
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Log format
    pub log_format: LogFormat,
    /// Level used when `RUST_LOG` is unset
    pub default_log_level: String,
    /// Ignore `RUST_LOG` (e.g. for `--quiet`)
    pub ignore_env: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Json,
            default_log_level: "info".to_string(),
            ignore_env: false,
        }
    }
}

/// Log format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// JSON structured logs
    #[default]
    Json,
    /// Human-readable
    Pretty,
    /// Single line
    Compact,
}

impl ObservabilityConfig {
    fn filter(&self) -> EnvFilter {
        if self.ignore_env {
            return EnvFilter::new(&self.default_log_level);
        }
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.default_log_level))
    }
}

/// Initialize tracing with a custom configuration
///
/// Logs go to stderr so command output on stdout stays machine-readable.
pub fn init_with_config(config: ObservabilityConfig) -> Result<()> {
    let fmt_layer = match config.log_format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_file(true)
            .with_line_number(true)
            .boxed(),
        LogFormat::Pretty => fmt::layer().pretty().with_writer(std::io::stderr).boxed(),
        LogFormat::Compact => fmt::layer().compact().with_writer(std::io::stderr).boxed(),
    };

    tracing_subscriber::registry()
        .with(config.filter())
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialize tracing subscriber")?;

    tracing::debug!(
        log_format = ?config.log_format,
        level = %config.default_log_level,
        "Observability initialized"
    );

    Ok(())
}
