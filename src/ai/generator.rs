//! AI Lesson Generator
//!
//! Wraps a provider behind the request gate. Every call is admitted by the
//! gate before the provider sees it, and every reply is decoded into a typed
//! value before it reaches the caller.

use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::gate::{GateSnapshot, RequestGate};
use super::prompt::{PromptTemplates, roles};
use super::provider::{ChatRequest, SharedProvider};
use super::validation::{ProviderReply, ResponseValidator, parse_reply};
use crate::types::{
    Assessment, ContentSource, GeneratedLesson, InterviewResponse, LessonFeedback, LessonPlan,
    PlanError, Result,
};

/// Expected shape of a lesson reply
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LessonReply {
    lesson_plan: LessonPlan,
    #[serde(default)]
    assessment: Option<Assessment>,
}

pub struct LessonGenerator {
    provider: SharedProvider,
    gate: Arc<RequestGate>,
    validator: ResponseValidator,
}

impl LessonGenerator {
    pub fn new(provider: SharedProvider, gate: Arc<RequestGate>) -> Self {
        Self {
            provider,
            gate,
            validator: ResponseValidator::new(),
        }
    }

    /// Gate counters, for status lines between calls
    pub async fn gate_snapshot(&self) -> GateSnapshot {
        self.gate.snapshot().await
    }

    /// Generate a lesson plan, plus an assessment when the educator asked for one
    pub async fn generate_lesson(&self, response: &InterviewResponse) -> Result<GeneratedLesson> {
        let request = ChatRequest::json(
            roles::LESSON_DESIGNER,
            PromptTemplates::lesson_plan(response).build(),
        );
        let raw = self.call(&request).await?;

        let reply: LessonReply = parse_reply(&raw).into_result()?;
        let assessment = if response.assessment {
            reply.assessment
        } else {
            if reply.assessment.is_some() {
                debug!("Dropping assessment that was not requested");
            }
            None
        };

        let validation = self
            .validator
            .validate_lesson(&reply.lesson_plan, assessment.as_ref());
        if !validation.is_valid() {
            return Err(PlanError::malformed(validation.error_summary()));
        }
        for issue in &validation.issues {
            warn!("Lesson reply: {}", issue);
        }

        info!(
            provider = self.provider.name(),
            title = %reply.lesson_plan.title,
            with_assessment = assessment.is_some(),
            "Generated lesson"
        );
        Ok(GeneratedLesson::new(
            reply.lesson_plan,
            assessment,
            ContentSource::Ai,
        ))
    }

    /// Review an existing lesson plan
    pub async fn feedback(&self, plan: &LessonPlan) -> Result<LessonFeedback> {
        let request = ChatRequest::json(
            roles::LESSON_REVIEWER,
            PromptTemplates::feedback(plan).build(),
        );
        let raw = self.call(&request).await?;

        let feedback: LessonFeedback = parse_reply(&raw).into_result()?;
        for issue in &self.validator.validate_feedback(&feedback).issues {
            warn!("Feedback reply: {}", issue);
        }
        Ok(feedback)
    }

    /// Plain-text explanation of a concept, e.g. one lesson objective
    pub async fn explain(&self, concept: &str) -> Result<String> {
        let request = ChatRequest::text(
            roles::CONCEPT_EXPLAINER,
            PromptTemplates::explanation(concept).build(),
        );
        let raw = self.call(&request).await?;

        let text = raw.trim();
        let reply = if text.is_empty() {
            ProviderReply::Malformed {
                reason: "explanation is empty".to_string(),
                preview: String::new(),
            }
        } else {
            ProviderReply::Parsed(text.to_string())
        };
        reply.into_result()
    }

    async fn call(&self, request: &ChatRequest) -> Result<String> {
        self.gate.admit().await?;

        let response = self.provider.complete(request).await?;
        debug!(
            provider = %response.metadata.provider,
            model = %response.metadata.model,
            tokens = response.usage.total(),
            elapsed_ms = response.timing.total_ms,
            "Provider call complete"
        );
        Ok(response.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::gate::{GateLimits, ManualClock};
    use crate::ai::provider::ScriptedProvider;
    use crate::types::{ErrorCategory, QuestionKind};

    const LESSON_JSON: &str = r#"{
        "lessonPlan": {
            "title": "Rubber Band Flyers",
            "objectives": ["Explore thrust"],
            "materials": ["Propeller"],
            "procedure": ["Wind the band (5 minutes)"],
            "extensions": []
        },
        "assessment": {
            "questions": [
                {"question": "Which part spins?", "type": "multiple-choice", "options": ["Wing", "Propeller"]},
                {"question": "What surprised you?", "type": "open-ended"}
            ]
        }
    }"#;

    fn answers(assessment: bool) -> InterviewResponse {
        InterviewResponse {
            time: "45 minutes".to_string(),
            grade_level: "4th".to_string(),
            environment: "classroom".to_string(),
            confidence: "Very confident".to_string(),
            assessment,
        }
    }

    fn generator(provider: ScriptedProvider, limits: GateLimits) -> (LessonGenerator, Arc<ScriptedProvider>) {
        let provider = Arc::new(provider);
        let gate = Arc::new(RequestGate::with_clock(limits, Arc::new(ManualClock::new())));
        (LessonGenerator::new(provider.clone(), gate), provider)
    }

    #[tokio::test]
    async fn test_generate_lesson_with_assessment() {
        let (generator, provider) =
            generator(ScriptedProvider::new().reply(LESSON_JSON), GateLimits::default());

        let lesson = generator.generate_lesson(&answers(true)).await.unwrap();
        assert_eq!(lesson.source, ContentSource::Ai);
        assert_eq!(lesson.lesson_plan.title, "Rubber Band Flyers");
        let questions = lesson.assessment.unwrap().questions;
        assert_eq!(questions[0].kind, QuestionKind::MultipleChoice);
        assert_eq!(questions[1].options, None);

        let request = &provider.requests()[0];
        assert!(request.json_mode);
        assert_eq!(request.system, roles::LESSON_DESIGNER);
    }

    #[tokio::test]
    async fn test_unrequested_assessment_is_dropped() {
        let (generator, _) =
            generator(ScriptedProvider::new().reply(LESSON_JSON), GateLimits::default());
        let lesson = generator.generate_lesson(&answers(false)).await.unwrap();
        assert!(lesson.assessment.is_none());
    }

    #[tokio::test]
    async fn test_invalid_multiple_choice_is_malformed() {
        let reply = r#"{"lessonPlan": {"title": "T", "procedure": ["a"]},
            "assessment": {"questions": [{"question": "Q", "type": "multiple-choice", "options": ["only"]}]}}"#;
        let (generator, _) = generator(ScriptedProvider::new().reply(reply), GateLimits::default());

        let err = generator.generate_lesson(&answers(true)).await.unwrap_err();
        assert!(matches!(err, PlanError::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn test_gate_rejection_skips_provider() {
        let (generator, provider) = generator(
            ScriptedProvider::new().reply(LESSON_JSON).reply(LESSON_JSON),
            GateLimits {
                per_minute: 1,
                ..GateLimits::default()
            },
        );

        generator.generate_lesson(&answers(false)).await.unwrap();
        let err = generator.generate_lesson(&answers(false)).await.unwrap_err();

        assert!(err.is_rate_limited());
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_feedback_and_explain() {
        let (generator, provider) = generator(
            ScriptedProvider::new()
                .reply(r#"```json
{"suggestions": ["Add a safety talk"], "improvements": [], "tips": []}
```"#)
                .reply("  Lift pushes the wing up.  ")
                .reply("   "),
            GateLimits::default(),
        );

        let feedback = generator.feedback(&LessonPlan::default()).await.unwrap();
        assert_eq!(feedback.suggestions, vec!["Add a safety talk"]);

        let explanation = generator.explain("lift").await.unwrap();
        assert_eq!(explanation, "Lift pushes the wing up.");
        assert!(!provider.requests()[1].json_mode);

        let empty = generator.explain("drag").await.unwrap_err();
        assert!(matches!(empty, PlanError::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn test_provider_failure_propagates() {
        let (generator, _) = generator(
            ScriptedProvider::new().fail(ErrorCategory::Auth),
            GateLimits::default(),
        );
        let err = generator.explain("lift").await.unwrap_err();
        assert!(matches!(err, PlanError::Llm(_)));
    }
}
