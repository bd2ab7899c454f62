//! Route Data Error Types

use thiserror::Error;

/// Errors during record validation
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    /// Value out of allowed range
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// NaN or infinite value where a measurement is required
    #[error("{field} is not a finite number")]
    NotFinite { field: &'static str },

    /// A record in a batch failed validation
    #[error("Record {index} rejected: {source}")]
    InvalidRecord {
        index: usize,
        #[source]
        source: Box<ValidationError>,
    },
}

/// Highway tag lookup failure (reported by the external map-data service)
#[derive(Debug, Clone, Error)]
#[error("Highway tag lookup failed: {0}")]
pub struct LookupError(pub String);

/// Errors while turning routing-service output into intersection records
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Routing service answered with a non-Ok code
    #[error("Routing service error: {code} - {message}")]
    Service { code: String, message: String },

    /// Response carried no route
    #[error("Routing response contains no route")]
    NoRoute,

    /// Step is missing a field the pipeline cannot default
    #[error("Step {step} is missing required field: {field}")]
    MissingField { step: usize, field: &'static str },

    /// Step geometry has no vertices
    #[error("Step {step} has an empty geometry")]
    EmptyGeometry { step: usize },

    /// Malformed JSON payload
    #[error("Invalid routing response: {0}")]
    Json(#[from] serde_json::Error),
}
