//! ADAS Route Analyzer
//!
//! End-to-end pipeline from intersection records to an ADAS route plan:
//! validation, road-type grouping and merging, per-level feature rules,
//! map colouring, driver advisories and curvature detection.

use thiserror::Error;
use tracing_subscriber::FmtSubscriber;

mod analyzer;
mod input;
pub mod overlay;
pub mod settings;

pub use analyzer::{ColoredAdasSegment, RouteAnalysis, RouteAnalyzer, RouteSummary};
pub use input::RouteInput;
pub use overlay::{advisory_at, closest_index, paint_route, Advisory, RouteStretch};
pub use settings::{AdvisoryConfig, AnalyzerConfig, LoggingConfig};

/// Analyzer errors
#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("Invalid intersection records: {0}")]
    Validation(#[from] route_data::ValidationError),

    #[error("Route extraction failed: {0}")]
    Extract(#[from] route_data::ExtractError),

    #[error("Malformed route document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

/// Initialize logging
///
/// Logs go to stderr so stdout stays free for the JSON report.
pub fn init_logging(config: &LoggingConfig) {
    let builder = FmtSubscriber::builder()
        .with_max_level(config.max_level())
        .with_target(true)
        .with_writer(std::io::stderr);

    let result = if config.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };
    result.expect("Failed to set tracing subscriber");
}
