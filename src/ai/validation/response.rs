//! Response Validation
//!
//! Content checks on provider output that parsed into the expected shape:
//! - A plan must have a title and at least one procedure step
//! - Multiple-choice questions must carry at least two options
//! - Empty lists and stray options are reported but tolerated

use std::fmt;

use crate::types::{Assessment, LessonFeedback, LessonPlan, QuestionKind};

/// Severity levels for validation issues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueSeverity {
    /// Output is unusable
    Error,
    /// Usable but degraded
    Warning,
}

impl fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueSeverity::Error => write!(f, "ERROR"),
            IssueSeverity::Warning => write!(f, "WARN"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ValidationIssue {
    pub severity: IssueSeverity,
    pub message: String,
    pub location: Option<String>,
}

impl ValidationIssue {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: IssueSeverity::Error,
            message: message.into(),
            location: None,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: IssueSeverity::Warning,
            message: message.into(),
            location: None,
        }
    }

    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(location) => write!(f, "[{}] {}: {}", self.severity, location, self.message),
            None => write!(f, "[{}] {}", self.severity, self.message),
        }
    }
}

/// All issues found in one response
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// No errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        !self
            .issues
            .iter()
            .any(|i| i.severity == IssueSeverity::Error)
    }

    pub fn error_count(&self) -> usize {
        self.count(IssueSeverity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(IssueSeverity::Warning)
    }

    /// Error messages joined for a single-line failure reason
    pub fn error_summary(&self) -> String {
        self.issues
            .iter()
            .filter(|i| i.severity == IssueSeverity::Error)
            .map(ValidationIssue::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn count(&self, severity: IssueSeverity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }

    fn add(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ResponseValidator;

impl ResponseValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate_lesson(
        &self,
        plan: &LessonPlan,
        assessment: Option<&Assessment>,
    ) -> ValidationResult {
        let mut result = ValidationResult::default();

        if plan.title.trim().is_empty() {
            result.add(ValidationIssue::error("title is empty").at("lessonPlan.title"));
        }
        if plan.procedure.is_empty() {
            result.add(ValidationIssue::error("procedure has no steps").at("lessonPlan.procedure"));
        }
        if plan.objectives.is_empty() {
            result.add(ValidationIssue::warning("no objectives").at("lessonPlan.objectives"));
        }
        if plan.materials.is_empty() {
            result.add(ValidationIssue::warning("no materials").at("lessonPlan.materials"));
        }

        if let Some(assessment) = assessment {
            self.validate_assessment(assessment, &mut result);
        }

        result
    }

    fn validate_assessment(&self, assessment: &Assessment, result: &mut ValidationResult) {
        if assessment.questions.is_empty() {
            result.add(ValidationIssue::warning("no questions").at("assessment.questions"));
        }

        for (idx, q) in assessment.questions.iter().enumerate() {
            let location = format!("assessment.questions[{idx}]");

            if q.question.trim().is_empty() {
                result.add(ValidationIssue::error("question text is empty").at(&location));
            }

            let option_count = q.options.as_ref().map_or(0, Vec::len);
            match q.kind {
                QuestionKind::MultipleChoice if option_count < 2 => {
                    result.add(
                        ValidationIssue::error(format!(
                            "multiple-choice question has {option_count} options, needs at least 2"
                        ))
                        .at(&location),
                    );
                }
                QuestionKind::OpenEnded if option_count > 0 => {
                    result.add(
                        ValidationIssue::warning("open-ended question carries options")
                            .at(&location),
                    );
                }
                _ => {}
            }
        }
    }

    pub fn validate_feedback(&self, feedback: &LessonFeedback) -> ValidationResult {
        let mut result = ValidationResult::default();
        if feedback.is_empty() {
            result.add(ValidationIssue::warning("feedback has no entries"));
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Question;

    fn plan() -> LessonPlan {
        LessonPlan {
            title: "Gliders".to_string(),
            objectives: vec!["Lift".to_string()],
            materials: vec!["Paper".to_string()],
            procedure: vec!["Fold (5 minutes)".to_string()],
            extensions: vec![],
        }
    }

    #[test]
    fn test_valid_plan() {
        let result = ResponseValidator::new().validate_lesson(&plan(), None);
        assert!(result.is_valid());
        assert_eq!(result.warning_count(), 0);
    }

    #[test]
    fn test_empty_title_and_procedure_are_errors() {
        let bad = LessonPlan {
            title: "  ".to_string(),
            procedure: vec![],
            ..plan()
        };
        let result = ResponseValidator::new().validate_lesson(&bad, None);
        assert!(!result.is_valid());
        assert_eq!(result.error_count(), 2);
        assert!(result.error_summary().contains("lessonPlan.title"));
    }

    #[test]
    fn test_multiple_choice_needs_two_options() {
        let assessment = Assessment {
            questions: vec![
                Question::multiple_choice("Which wing?", vec!["Long".to_string()]),
                Question {
                    options: None,
                    ..Question::multiple_choice("Why?", vec![])
                },
                Question::multiple_choice("Best?", vec!["A".to_string(), "B".to_string()]),
            ],
        };
        let result = ResponseValidator::new().validate_lesson(&plan(), Some(&assessment));
        assert_eq!(result.error_count(), 2);
        assert!(result.error_summary().contains("questions[0]"));
        assert!(result.error_summary().contains("questions[1]"));
    }

    #[test]
    fn test_open_ended_with_options_is_warning() {
        let mut q = Question::open_ended("Describe it");
        q.options = Some(vec!["x".to_string()]);
        let assessment = Assessment { questions: vec![q] };
        let result = ResponseValidator::new().validate_lesson(&plan(), Some(&assessment));
        assert!(result.is_valid());
        assert_eq!(result.warning_count(), 1);
    }

    #[test]
    fn test_empty_feedback_warns() {
        let result = ResponseValidator::new().validate_feedback(&LessonFeedback::default());
        assert!(result.is_valid());
        assert_eq!(result.warning_count(), 1);
    }
}
