//! flightplan - Flying Machines Lesson Planner
//!
//! Turns a short educator interview into a lesson plan for a hands-on
//! "flying machines" activity, with an optional assessment.
//!
//! ## Core Features
//!
//! - **AI Generation**: OpenAI-compatible chat completions with JSON replies
//! - **Curated Fallback**: deterministic per-grade lessons that need no network
//! - **Request Gate**: per-minute, per-day and spacing limits on provider calls
//! - **Feedback & Explanations**: review a plan, expand on one objective
//!
//! ## Quick Start
//!
//! ```ignore
//! use flightplan::{Config, GenerationMode, InterviewResponse, Planner};
//!
//! let config = flightplan::ConfigLoader::load()?;
//! let planner = Planner::from_config(&config, GenerationMode::Auto)?;
//! let lesson = planner.plan(&InterviewResponse {
//!     time: "45 minutes".into(),
//!     grade_level: "5th grade".into(),
//!     environment: "classroom".into(),
//!     confidence: "Somewhat confident".into(),
//!     assessment: true,
//! }).await?;
//! ```
//!
//! ## Modules
//!
//! - [`ai`]: provider abstraction, request gate, prompts, reply validation
//! - [`curation`]: table-driven lessons and assessments
//! - [`planner`]: mode selection between the two producers
//! - [`config`]: layered configuration

pub mod ai;
pub mod cli;
pub mod config;
pub mod constants;
pub mod curation;
pub mod planner;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

pub use config::{Config, ConfigLoader, GenerationMode};
pub use planner::Planner;

pub use types::error::{ErrorCategory, PlanError, Result};
pub use types::{
    Assessment, ContentSource, GeneratedLesson, InterviewResponse, LessonFeedback, LessonPlan,
    Question, QuestionKind,
};

pub use curation::curate;

// =============================================================================
// AI Re-exports
// =============================================================================

pub use ai::{
    GateError, GateLimits, LessonGenerator, LlmProvider, LlmResponse, RequestGate, SharedProvider,
};
