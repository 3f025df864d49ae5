//! Interview answers collected from the educator.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::curation::matching;

/// Answers to the five questionnaire questions.
///
/// Every field except `assessment` is free text; interpretation is permissive
/// and never fails (see [`crate::curation::matching`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewResponse {
    /// Available time, e.g. "45 minutes"
    #[serde(default)]
    pub time: String,
    /// Grade or age description, e.g. "5th grade"
    #[serde(default)]
    pub grade_level: String,
    /// Learning environment, e.g. "library"
    #[serde(default)]
    pub environment: String,
    /// One of the [`ConfidenceLevel`] labels (matched by substring)
    #[serde(default)]
    pub confidence: String,
    /// Whether assessment content is wanted
    #[serde(default)]
    pub assessment: bool,
}

impl InterviewResponse {
    pub fn available_minutes(&self) -> i64 {
        matching::available_minutes(&self.time)
    }

    pub fn grade_bucket(&self) -> GradeBucket {
        matching::normalize_grade(&self.grade_level)
    }

    pub fn is_low_confidence(&self) -> bool {
        matching::is_low_confidence(&self.confidence)
    }

    pub fn is_informal_setting(&self) -> bool {
        matching::is_informal_setting(&self.environment)
    }
}

/// Canonical grade categories used to key the curation tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradeBucket {
    Kindergarten,
    #[serde(rename = "1st")]
    First,
    #[serde(rename = "2nd")]
    Second,
    #[serde(rename = "3rd")]
    Third,
    #[serde(rename = "4th")]
    Fourth,
    #[serde(rename = "5th")]
    Fifth,
    Middle,
}

impl GradeBucket {
    /// All buckets in matching priority order
    pub const ALL: [GradeBucket; 7] = [
        GradeBucket::Kindergarten,
        GradeBucket::First,
        GradeBucket::Second,
        GradeBucket::Third,
        GradeBucket::Fourth,
        GradeBucket::Fifth,
        GradeBucket::Middle,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            GradeBucket::Kindergarten => "kindergarten",
            GradeBucket::First => "1st",
            GradeBucket::Second => "2nd",
            GradeBucket::Third => "3rd",
            GradeBucket::Fourth => "4th",
            GradeBucket::Fifth => "5th",
            GradeBucket::Middle => "middle",
        }
    }
}

impl fmt::Display for GradeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Options offered by the confidence question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceLevel {
    VeryConfident,
    SomewhatConfident,
    NotVeryConfident,
    NeedSupport,
}

impl ConfidenceLevel {
    pub const ALL: [ConfidenceLevel; 4] = [
        ConfidenceLevel::VeryConfident,
        ConfidenceLevel::SomewhatConfident,
        ConfidenceLevel::NotVeryConfident,
        ConfidenceLevel::NeedSupport,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ConfidenceLevel::VeryConfident => "Very confident",
            ConfidenceLevel::SomewhatConfident => "Somewhat confident",
            ConfidenceLevel::NotVeryConfident => "Not very confident",
            ConfidenceLevel::NeedSupport => "Need support",
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for ConfidenceLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|level| level.label().to_lowercase() == lower)
            .ok_or_else(|| {
                format!(
                    "Unknown confidence level '{}'. Valid values: {}",
                    s,
                    Self::ALL.map(|l| l.label()).join(", ")
                )
            })
    }
}
