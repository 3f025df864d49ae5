//! Generated lesson content: plans, assessments and feedback.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A lesson plan for the flying machines activity
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LessonPlan {
    pub title: String,
    /// Each objective can be expanded on request via `explain`
    #[serde(default)]
    pub objectives: Vec<String>,
    #[serde(default)]
    pub materials: Vec<String>,
    /// Steps, usually ending in a "(N minutes)" annotation
    #[serde(default)]
    pub procedure: Vec<String>,
    #[serde(default)]
    pub extensions: Vec<String>,
}

/// Question format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionKind {
    MultipleChoice,
    OpenEnded,
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionKind::MultipleChoice => write!(f, "multiple-choice"),
            QuestionKind::OpenEnded => write!(f, "open-ended"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    /// Required when `kind` is multiple-choice
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl Question {
    pub fn open_ended(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            kind: QuestionKind::OpenEnded,
            options: None,
        }
    }

    pub fn multiple_choice(question: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            question: question.into(),
            kind: QuestionKind::MultipleChoice,
            options: Some(options),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Assessment {
    pub questions: Vec<Question>,
}

/// Which producer built a lesson
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentSource {
    /// Generated by the AI provider
    Ai,
    /// Built from the static grade tables
    Curated,
}

impl fmt::Display for ContentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentSource::Ai => write!(f, "ai"),
            ContentSource::Curated => write!(f, "curated"),
        }
    }
}

/// Output of either producer, same shape regardless of source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedLesson {
    pub lesson_plan: LessonPlan,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assessment: Option<Assessment>,
    pub source: ContentSource,
    pub generated_at: DateTime<Utc>,
}

impl GeneratedLesson {
    pub fn new(
        lesson_plan: LessonPlan,
        assessment: Option<Assessment>,
        source: ContentSource,
    ) -> Self {
        Self {
            lesson_plan,
            assessment,
            source,
            generated_at: Utc::now(),
        }
    }
}

/// Review of a lesson plan returned by the AI provider
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LessonFeedback {
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub improvements: Vec<String>,
    #[serde(default)]
    pub tips: Vec<String>,
}

impl LessonFeedback {
    pub fn is_empty(&self) -> bool {
        self.suggestions.is_empty() && self.improvements.is_empty() && self.tips.is_empty()
    }
}
