//! Advanced Driver Assistance System (ADAS)
//!
//! Route-level feature planning:
//! - Feature codes and per-level feature catalog
//! - Rule tables mapping segment length/duration to active features
//! - Rule engine for autonomy levels 0, 1 and 2
//! - Map colour precedence for feature sets

pub mod analysis;
pub mod engine;
pub mod feature;
pub mod policy;

pub use analysis::{AdasSegment, MapColor, DEFAULT_ROUTE_COLOR};
pub use engine::AdasRuleEngine;
pub use feature::{AutonomyLevel, FeatureCode, FeatureSet};
pub use policy::{Condition, Fallback, LevelPolicy, Rule, RulePass, RulePolicy, SegmentSource};

use thiserror::Error;

/// ADAS error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdasError {
    #[error("Unknown ADAS feature code: {0}")]
    UnknownFeature(String),

    #[error("Unknown autonomy level: {0}")]
    UnknownLevel(String),
}
