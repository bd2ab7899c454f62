//! ADAS feature codes and autonomy levels

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::AdasError;

/// Assistance feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FeatureCode {
    /// Lane Departure Warning
    #[serde(rename = "LDW")]
    Ldw,
    /// Traffic Sign Recognition
    #[serde(rename = "TSR")]
    Tsr,
    /// Adaptive Cruise Control
    #[serde(rename = "ACC")]
    Acc,
    /// Emergency Lane Keeping Assist
    #[serde(rename = "ELKA")]
    Elka,
    /// Lane Keeping Assist
    #[serde(rename = "LKA")]
    Lka,
    /// Automated Lane Change
    #[serde(rename = "ALC")]
    Alc,
    /// Traffic Jam Assist
    #[serde(rename = "TJA")]
    Tja,
    /// Collision Avoidance System
    #[serde(rename = "CAS")]
    Cas,
    /// Park Assist
    #[serde(rename = "PA")]
    Pa,
}

impl FeatureCode {
    pub fn code(&self) -> &'static str {
        match self {
            FeatureCode::Ldw => "LDW",
            FeatureCode::Tsr => "TSR",
            FeatureCode::Acc => "ACC",
            FeatureCode::Elka => "ELKA",
            FeatureCode::Lka => "LKA",
            FeatureCode::Alc => "ALC",
            FeatureCode::Tja => "TJA",
            FeatureCode::Cas => "CAS",
            FeatureCode::Pa => "PA",
        }
    }
}

impl FromStr for FeatureCode {
    type Err = AdasError;

    /// Case-insensitive
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LDW" => Ok(FeatureCode::Ldw),
            "TSR" => Ok(FeatureCode::Tsr),
            "ACC" => Ok(FeatureCode::Acc),
            "ELKA" => Ok(FeatureCode::Elka),
            "LKA" => Ok(FeatureCode::Lka),
            "ALC" => Ok(FeatureCode::Alc),
            "TJA" => Ok(FeatureCode::Tja),
            "CAS" => Ok(FeatureCode::Cas),
            "PA" => Ok(FeatureCode::Pa),
            _ => Err(AdasError::UnknownFeature(s.to_string())),
        }
    }
}

impl fmt::Display for FeatureCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Label of the "no feature active" set
pub const NONE_LABEL: &str = "None";

/// Ordered set of active features
///
/// An empty set is the "None" sentinel and serializes as `["None"]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<String>", try_from = "Vec<String>")]
pub struct FeatureSet {
    codes: Vec<FeatureCode>,
}

impl FeatureSet {
    pub fn none() -> Self {
        Self::default()
    }

    /// Keeps the given order, dropping repeats
    pub fn of(codes: &[FeatureCode]) -> Self {
        let mut set = Self::none();
        for code in codes {
            if !set.codes.contains(code) {
                set.codes.push(*code);
            }
        }
        set
    }

    pub fn is_none(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn contains(&self, code: FeatureCode) -> bool {
        self.codes.contains(&code)
    }

    /// Number of active features (0 for the sentinel)
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Exactly this one feature and nothing else
    pub fn is_only(&self, code: FeatureCode) -> bool {
        self.codes.len() == 1 && self.codes[0] == code
    }

    pub fn codes(&self) -> &[FeatureCode] {
        &self.codes
    }

    pub fn labels(&self) -> Vec<String> {
        if self.is_none() {
            vec![NONE_LABEL.to_string()]
        } else {
            self.codes.iter().map(|c| c.code().to_string()).collect()
        }
    }
}

impl fmt::Display for FeatureSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.labels().join(", "))
    }
}

impl From<FeatureSet> for Vec<String> {
    fn from(set: FeatureSet) -> Self {
        set.labels()
    }
}

impl TryFrom<Vec<String>> for FeatureSet {
    type Error = AdasError;

    fn try_from(labels: Vec<String>) -> Result<Self, Self::Error> {
        let mut codes = Vec::with_capacity(labels.len());
        for label in &labels {
            if label.eq_ignore_ascii_case(NONE_LABEL) {
                continue;
            }
            codes.push(label.parse::<FeatureCode>()?);
        }
        Ok(FeatureSet::of(&codes))
    }
}

/// Autonomy level selecting the rule table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AutonomyLevel {
    #[serde(rename = "Level 0")]
    Level0,
    #[serde(rename = "Level 1")]
    Level1,
    #[serde(rename = "Level 2")]
    Level2,
}

impl AutonomyLevel {
    pub const ALL: [AutonomyLevel; 3] = [
        AutonomyLevel::Level0,
        AutonomyLevel::Level1,
        AutonomyLevel::Level2,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AutonomyLevel::Level0 => "Level 0",
            AutonomyLevel::Level1 => "Level 1",
            AutonomyLevel::Level2 => "Level 2",
        }
    }

    /// Parse a UI selector such as "Level 1"; anything else is `None`
    pub fn from_selector(selector: &str) -> Option<Self> {
        match selector.trim() {
            "Level 0" => Some(AutonomyLevel::Level0),
            "Level 1" => Some(AutonomyLevel::Level1),
            "Level 2" => Some(AutonomyLevel::Level2),
            _ => None,
        }
    }

    /// Features a vehicle at this level may offer
    pub fn supported_features(&self) -> &'static [FeatureCode] {
        use FeatureCode::*;
        match self {
            AutonomyLevel::Level0 => &[Ldw, Tsr],
            AutonomyLevel::Level1 => &[Ldw, Tsr, Acc, Elka],
            AutonomyLevel::Level2 => &[Tsr, Lka, Acc, Alc, Tja, Cas, Pa],
        }
    }
}

impl FromStr for AutonomyLevel {
    type Err = AdasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AutonomyLevel::from_selector(s).ok_or_else(|| AdasError::UnknownLevel(s.to_string()))
    }
}

impl fmt::Display for AutonomyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
