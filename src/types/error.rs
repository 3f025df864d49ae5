//! Unified Error Type System
//!
//! Centralized error types for the entire application.
//!
//! ## Error Categories
//!
//! - **RateLimit**: provider-side rate limiting (HTTP 429)
//! - **Auth**: authentication failures (fail fast)
//! - **Network**: connectivity issues
//! - **Unavailable**: provider unavailable
//! - **ParseError**: reply could not be parsed into the expected shape
//!
//! Request gate rejections are not provider errors. They are carried by
//! dedicated variants with the wait estimate so callers can show them verbatim.

use thiserror::Error;

use crate::ai::gate::GateError;

// =============================================================================
// Error Categories
// =============================================================================

/// Error categories for provider failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Rate limited by the provider
    RateLimit,
    /// Authentication failed
    Auth,
    /// Network/connectivity issues
    Network,
    /// Provider unavailable
    Unavailable,
    /// Invalid request
    BadRequest,
    /// Parsing the reply failed
    ParseError,
    /// Temporary server issues
    Transient,
    /// Unknown error
    Unknown,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RateLimit => write!(f, "RATE_LIMIT"),
            Self::Auth => write!(f, "AUTH"),
            Self::Network => write!(f, "NETWORK"),
            Self::Unavailable => write!(f, "UNAVAILABLE"),
            Self::BadRequest => write!(f, "BAD_REQUEST"),
            Self::ParseError => write!(f, "PARSE_ERROR"),
            Self::Transient => write!(f, "TRANSIENT"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

// =============================================================================
// LLM Error
// =============================================================================

/// Provider error with category and context
#[derive(Debug, Clone)]
pub struct LlmError {
    /// Error category
    pub category: ErrorCategory,
    /// Detailed error message
    pub message: String,
    /// Provider that produced the error
    pub provider: Option<String>,
}

impl std::fmt::Display for LlmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(provider) = &self.provider {
            write!(f, "[{}:{}] {}", provider, self.category, self.message)
        } else {
            write!(f, "[{}] {}", self.category, self.message)
        }
    }
}

impl std::error::Error for LlmError {}

impl LlmError {
    pub fn new(category: ErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            provider: None,
        }
    }

    pub fn with_provider(
        category: ErrorCategory,
        message: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            category,
            message: message.into(),
            provider: Some(provider.into()),
        }
    }
}

// =============================================================================
// Error Classifier
// =============================================================================

/// Maps transport failures onto error categories
pub struct ErrorClassifier;

impl ErrorClassifier {
    /// Classify HTTP status code directly
    pub fn classify_http_status(status: u16, message: &str, provider: &str) -> LlmError {
        let category = match status {
            429 => ErrorCategory::RateLimit,
            401 | 403 => ErrorCategory::Auth,
            400 | 422 => ErrorCategory::BadRequest,
            500 | 502 | 503 | 504 => ErrorCategory::Transient,
            404 => ErrorCategory::Unavailable,
            _ => ErrorCategory::Unknown,
        };
        LlmError::with_provider(category, message, provider)
    }

    /// Classify a reqwest transport error
    pub fn classify_transport(err: &reqwest::Error, provider: &str) -> LlmError {
        let category = if err.is_timeout() || err.is_connect() {
            ErrorCategory::Network
        } else if err.is_decode() {
            ErrorCategory::ParseError
        } else if let Some(status) = err.status() {
            return Self::classify_http_status(status.as_u16(), &err.to_string(), provider);
        } else {
            ErrorCategory::Unknown
        };
        LlmError::with_provider(category, err.to_string(), provider)
    }
}

// =============================================================================
// Application Error
// =============================================================================

#[derive(Debug, Error)]
pub enum PlanError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // -------------------------------------------------------------------------
    // Request Gate
    // -------------------------------------------------------------------------
    #[error("Daily limit reached. Resets in {hours_remaining} hours.")]
    DailyLimitExceeded { hours_remaining: u64 },

    #[error("Please wait {seconds_remaining} seconds before trying again.")]
    MinuteLimitExceeded { seconds_remaining: u64 },

    // -------------------------------------------------------------------------
    // Provider Errors
    // -------------------------------------------------------------------------
    #[error("LLM error: {0}")]
    Llm(LlmError),

    /// The provider replied, but not with the expected shape
    #[error("Malformed provider response: {reason}")]
    MalformedResponse { reason: String },

    #[error("No AI provider configured: {0}")]
    ProviderUnavailable(String),

    // -------------------------------------------------------------------------
    // Domain Errors
    // -------------------------------------------------------------------------
    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid answers: {0}")]
    Answers(String),
}

impl From<LlmError> for PlanError {
    fn from(err: LlmError) -> Self {
        PlanError::Llm(err)
    }
}

impl From<GateError> for PlanError {
    fn from(err: GateError) -> Self {
        match err {
            GateError::DailyLimitExceeded { hours_remaining } => {
                PlanError::DailyLimitExceeded { hours_remaining }
            }
            GateError::MinuteLimitExceeded { seconds_remaining } => {
                PlanError::MinuteLimitExceeded { seconds_remaining }
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, PlanError>;

impl PlanError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            reason: reason.into(),
        }
    }

    /// Request gate rejections must reach the user verbatim
    pub fn is_rate_limited(&self) -> bool {
        matches!(
            self,
            Self::DailyLimitExceeded { .. } | Self::MinuteLimitExceeded { .. }
        )
    }

    /// Message safe to show an end user. Gate rejections carry their wait
    /// estimate; everything else collapses to a generic retry message.
    pub fn user_message(&self) -> String {
        if self.is_rate_limited() {
            self.to_string()
        } else {
            crate::constants::messages::GENERATION_FAILED.to_string()
        }
    }

    /// Failures of the AI producer that a deterministic result can stand in for
    pub fn allows_curated_fallback(&self) -> bool {
        matches!(
            self,
            Self::Llm(_)
                | Self::MalformedResponse { .. }
                | Self::ProviderUnavailable(_)
        )
    }
}

// =============================================================================
// Tests
// =============================================================================
