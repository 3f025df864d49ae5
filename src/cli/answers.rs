//! Interview answers from files and command-line flags.

use std::path::Path;

use crate::types::{InterviewResponse, PlanError, Result};

/// Flag values that replace answers loaded from a file
#[derive(Debug, Clone, Default)]
pub struct AnswerOverrides {
    pub time: Option<String>,
    pub grade_level: Option<String>,
    pub environment: Option<String>,
    pub confidence: Option<String>,
    pub assessment: Option<bool>,
}

impl AnswerOverrides {
    pub fn is_empty(&self) -> bool {
        self.time.is_none()
            && self.grade_level.is_none()
            && self.environment.is_none()
            && self.confidence.is_none()
            && self.assessment.is_none()
    }

    pub fn apply(self, response: &mut InterviewResponse) {
        if let Some(time) = self.time {
            response.time = time;
        }
        if let Some(grade_level) = self.grade_level {
            response.grade_level = grade_level;
        }
        if let Some(environment) = self.environment {
            response.environment = environment;
        }
        if let Some(confidence) = self.confidence {
            response.confidence = confidence;
        }
        if let Some(assessment) = self.assessment {
            response.assessment = assessment;
        }
    }
}

/// Load answers from a JSON or YAML file, chosen by extension.
/// Anything that isn't `.yaml`/`.yml` is read as JSON.
pub fn load_answers(path: &Path) -> Result<InterviewResponse> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| PlanError::Answers(format!("{}: {}", path.display(), e)))?;

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    let parsed = if is_yaml {
        serde_yaml::from_str(&content).map_err(|e| e.to_string())
    } else {
        serde_json::from_str(&content).map_err(|e| e.to_string())
    };
    parsed.map_err(|e| PlanError::Answers(format!("{}: {}", path.display(), e)))
}

/// File answers (if any) with flag overrides applied on top
pub fn resolve_answers(path: Option<&Path>, overrides: AnswerOverrides) -> Result<InterviewResponse> {
    let mut response = match path {
        Some(path) => load_answers(path)?,
        None => InterviewResponse::default(),
    };
    overrides.apply(&mut response);
    Ok(response)
}
