pub mod error;
pub mod interview;
pub mod lesson;

pub use error::{ErrorCategory, ErrorClassifier, LlmError, PlanError, Result};
pub use interview::{ConfidenceLevel, GradeBucket, InterviewResponse};
pub use lesson::{
    Assessment, ContentSource, GeneratedLesson, LessonFeedback, LessonPlan, Question,
    QuestionKind,
};
