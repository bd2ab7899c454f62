//! Analyzer settings

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::Level;

use crate::AnalyzerError;

/// Environment variable prefix, e.g. `ADAS_ROUTE_AUTONOMY_LEVEL`
pub const ENV_PREFIX: &str = "ADAS_ROUTE";

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Max level (trace, debug, info, warn, error)
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl LoggingConfig {
    /// Configured level, INFO if it does not parse
    pub fn max_level(&self) -> Level {
        self.level.parse().unwrap_or(Level::INFO)
    }
}

/// Driver advisory windows, in polyline points
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisoryConfig {
    /// Points before a segment start at which "Enable" is shown
    pub enable_lead_points: usize,

    /// Half-width of the "Disable" window around a segment end
    pub disable_window_points: usize,
}

impl Default for AdvisoryConfig {
    fn default() -> Self {
        Self {
            enable_lead_points: 5,
            disable_window_points: 10,
        }
    }
}

/// Analyzer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Autonomy level selector ("Level 0", "Level 1", "Level 2")
    pub autonomy_level: String,

    pub logging: LoggingConfig,

    pub advisory: AdvisoryConfig,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            autonomy_level: "Level 0".to_string(),
            logging: LoggingConfig::default(),
            advisory: AdvisoryConfig::default(),
        }
    }
}

impl AnalyzerConfig {
    /// Defaults, overlaid by an optional file, overlaid by `ADAS_ROUTE_*` env vars
    pub fn load(path: Option<&Path>) -> Result<Self, AnalyzerError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        );

        Ok(builder.build()?.try_deserialize()?)
    }
}
