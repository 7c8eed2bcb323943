//! Triage assessment and its display derivations.

use serde::{Deserialize, Serialize};

use crate::wire::null_as_default;

/// Routing shown when the backend did not recommend one.
pub const DEFAULT_ROUTING: &str = "L1 Support";

/// Priority band label computed by the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PriorityBand {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

impl PriorityBand {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }

    /// Badge class for the band label. Unknown labels deserialize as `Low`.
    pub fn badge_class(self) -> &'static str {
        match self {
            Self::Critical => "slds-badge_inverse badge-critical",
            Self::High => "slds-badge_inverse badge-high",
            Self::Medium => "slds-badge_inverse badge-medium",
            Self::Low => "slds-badge_inverse badge-low",
        }
    }
}

impl From<String> for PriorityBand {
    fn from(label: String) -> Self {
        match label.trim() {
            "Critical" => Self::Critical,
            "High" => Self::High,
            "Medium" => Self::Medium,
            _ => Self::Low,
        }
    }
}

impl From<PriorityBand> for String {
    fn from(band: PriorityBand) -> Self {
        band.as_str().to_string()
    }
}

/// Color class derived from the numeric score alone.
///
/// Independent of [`PriorityBand`]: the backend may return a band
/// label that disagrees with the score, and both are displayed as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreClass {
    Low,
    Medium,
    High,
    Critical,
}

impl ScoreClass {
    /// `>= 80` critical, `>= 60` high, `>= 30` medium, otherwise low.
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Self::Critical
        } else if score >= 60.0 {
            Self::High
        } else if score >= 30.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn badge_class(self) -> &'static str {
        match self {
            Self::Critical => "score-badge score-critical",
            Self::High => "score-badge score-high",
            Self::Medium => "score-badge score-medium",
            Self::Low => "score-badge score-low",
        }
    }
}

/// Priority assessment for a case, computed entirely by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriageAssessment {
    #[serde(default, deserialize_with = "null_as_default")]
    pub priority_score: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub priority_band: PriorityBand,
    #[serde(default)]
    pub recommended_routing: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reasons: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub suggested_actions: Vec<String>,
}

impl TriageAssessment {
    pub fn score_class(&self) -> ScoreClass {
        ScoreClass::from_score(self.priority_score)
    }
}
