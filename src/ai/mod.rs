//! AI Integration Layer
//!
//! Provider abstraction, admission control and reply decoding for
//! AI-generated lessons, feedback and explanations.

pub mod gate;
pub mod generator;
pub mod prompt;
pub mod provider;
pub mod validation;

pub use gate::{
    Clock, GateError, GateLimits, GateSnapshot, ManualClock, RequestGate, SharedGate, SystemClock,
};
pub use generator::LessonGenerator;
pub use prompt::{PromptBuilder, PromptSection, PromptTemplates};
pub use provider::{
    ChatRequest, ErrorCategory, ErrorClassifier, LlmError, LlmProvider, LlmResponse,
    OpenAiProvider, ProviderConfig, ResponseMetadata, ResponseTiming, ScriptedProvider,
    ScriptedReply, SharedProvider, TokenUsage, create_provider,
};
pub use validation::{
    JsonRepairer, ProviderReply, ResponseValidator, ValidationResult, parse_reply,
};
