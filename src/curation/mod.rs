//! Deterministic Content Curation
//!
//! Table-driven producer of lesson plans and assessments. It is the offline
//! counterpart to AI generation and returns the same output shape.
//!
//! ## Modules
//!
//! - `matching`: free-text answer interpretation (grade, time, confidence, setting)
//! - `lesson`: per-grade lesson templates and procedure time scaling
//! - `assessment`: per-grade questions and their adjustments
//!
//! Nothing here fails, blocks or holds shared state.

pub mod assessment;
pub mod lesson;
pub mod matching;

pub use assessment::{curate_assessment, question_template};
pub use lesson::{LessonTemplate, curate_lesson_plan, lesson_template, scale_procedure};
pub use matching::{available_minutes, is_informal_setting, is_low_confidence, normalize_grade};

use crate::types::{ContentSource, GeneratedLesson, InterviewResponse};

/// Curate a full lesson. The assessment is included only when requested.
pub fn curate(response: &InterviewResponse) -> GeneratedLesson {
    let lesson_plan = curate_lesson_plan(response);
    let assessment = response.assessment.then(|| curate_assessment(response));

    tracing::debug!(
        grade = %response.grade_bucket(),
        minutes = response.available_minutes(),
        with_assessment = assessment.is_some(),
        "Curated lesson from grade tables"
    );

    GeneratedLesson::new(lesson_plan, assessment, ContentSource::Curated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_curate_respects_assessment_flag() {
        let mut response = InterviewResponse {
            time: "45 minutes".to_string(),
            grade_level: "1st grade".to_string(),
            environment: "classroom".to_string(),
            confidence: "Somewhat confident".to_string(),
            assessment: false,
        };
        let without = curate(&response);
        assert!(without.assessment.is_none());
        assert_eq!(without.source, ContentSource::Curated);

        response.assessment = true;
        let with = curate(&response);
        assert_eq!(with.assessment.map(|a| a.questions.len()), Some(3));
        assert_eq!(with.lesson_plan, without.lesson_plan);
    }

    proptest! {
        #[test]
        fn prop_curation_is_pure_and_total(
            time in ".*",
            grade in ".*",
            environment in ".*",
            confidence in ".*",
            assessment in any::<bool>(),
        ) {
            let response = InterviewResponse { time, grade_level: grade, environment, confidence, assessment };

            let plan = curate_lesson_plan(&response);
            prop_assert_eq!(&plan, &curate_lesson_plan(&response));
            prop_assert!(!plan.title.is_empty());
            prop_assert_eq!(plan.procedure.len(), 6);

            let questions = curate_assessment(&response);
            prop_assert_eq!(&questions, &curate_assessment(&response));
            prop_assert!(questions.questions.len() >= 2);
        }
    }
}
