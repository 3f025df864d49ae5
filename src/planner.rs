//! Lesson Planner
//!
//! Chooses between the two producers of a [`GeneratedLesson`]:
//!
//! | Mode      | AI provider | Curated tables              |
//! |-----------|-------------|-----------------------------|
//! | `ai`      | always      | never                       |
//! | `curated` | never       | always                      |
//! | `auto`    | first       | on provider or parse failure |
//!
//! Request gate rejections are never replaced by curated content in any
//! mode. They reach the caller with their wait estimate intact.

use std::sync::Arc;
use tracing::{info, warn};

use crate::ai::gate::{GateSnapshot, RequestGate};
use crate::ai::generator::LessonGenerator;
use crate::ai::provider::{SharedProvider, create_provider};
use crate::config::{Config, GenerationMode};
use crate::curation;
use crate::types::{GeneratedLesson, InterviewResponse, LessonFeedback, LessonPlan, PlanError, Result};

pub struct Planner {
    mode: GenerationMode,
    generator: std::result::Result<LessonGenerator, String>,
}

impl Planner {
    /// Planner backed by a provider
    pub fn new(mode: GenerationMode, provider: SharedProvider, gate: Arc<RequestGate>) -> Self {
        Self {
            mode,
            generator: Ok(LessonGenerator::new(provider, gate)),
        }
    }

    /// Planner with no AI provider. Only curated content is available.
    pub fn offline(mode: GenerationMode, reason: impl Into<String>) -> Self {
        Self {
            mode,
            generator: Err(reason.into()),
        }
    }

    /// Build from configuration. A provider that cannot be created is only an
    /// error in `ai` mode; `auto` degrades to curated content.
    pub fn from_config(config: &Config, mode: GenerationMode) -> Result<Self> {
        if mode == GenerationMode::Curated {
            return Ok(Self::offline(mode, "curated mode"));
        }

        let gate = Arc::new(RequestGate::new(config.rate_limit.gate_limits()));
        match create_provider(&config.llm) {
            Ok(provider) => Ok(Self::new(mode, provider, gate)),
            Err(err) if mode == GenerationMode::Auto && err.allows_curated_fallback() => {
                warn!("AI provider unavailable, using curated content: {}", err);
                Ok(Self::offline(mode, err.to_string()))
            }
            Err(err) => Err(err),
        }
    }

    pub fn mode(&self) -> GenerationMode {
        self.mode
    }

    pub fn has_provider(&self) -> bool {
        self.generator.is_ok()
    }

    pub async fn plan(&self, response: &InterviewResponse) -> Result<GeneratedLesson> {
        match self.mode {
            GenerationMode::Curated => Ok(curation::curate(response)),
            GenerationMode::Ai => self.generator()?.generate_lesson(response).await,
            GenerationMode::Auto => {
                let generator = match &self.generator {
                    Ok(generator) => generator,
                    Err(reason) => {
                        info!("No AI provider ({}), using curated content", reason);
                        return Ok(curation::curate(response));
                    }
                };

                match generator.generate_lesson(response).await {
                    Ok(lesson) => Ok(lesson),
                    Err(err) if err.allows_curated_fallback() => {
                        warn!("AI generation failed, using curated content: {}", err);
                        Ok(curation::curate(response))
                    }
                    Err(err) => Err(err),
                }
            }
        }
    }

    /// Feedback needs the AI provider in every mode
    pub async fn feedback(&self, plan: &LessonPlan) -> Result<LessonFeedback> {
        self.generator()?.feedback(plan).await
    }

    /// Explanations need the AI provider in every mode
    pub async fn explain(&self, concept: &str) -> Result<String> {
        self.generator()?.explain(concept).await
    }

    /// Request gate counters, when a provider is configured
    pub async fn gate_snapshot(&self) -> Option<GateSnapshot> {
        match &self.generator {
            Ok(generator) => Some(generator.gate_snapshot().await),
            Err(_) => None,
        }
    }

    fn generator(&self) -> Result<&LessonGenerator> {
        self.generator
            .as_ref()
            .map_err(|reason| PlanError::ProviderUnavailable(reason.clone()))
    }
}
