//! AI Response Validation
//!
//! Turns raw provider text into typed values:
//! - JSON repair for near-miss replies
//! - Typed decode into the expected shape
//! - Content checks on the decoded value
//!
//! Decoding never panics and never trusts an untyped payload. A reply is
//! either [`ProviderReply::Parsed`] or [`ProviderReply::Malformed`].

mod json_repair;
mod response;

pub use json_repair::{JsonRepairer, preview};
pub use response::{IssueSeverity, ResponseValidator, ValidationIssue, ValidationResult};

use serde::de::DeserializeOwned;

use crate::types::{PlanError, Result};

/// Outcome of decoding one provider reply
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderReply<T> {
    Parsed(T),
    Malformed { reason: String, preview: String },
}

impl<T> ProviderReply<T> {
    pub fn is_parsed(&self) -> bool {
        matches!(self, ProviderReply::Parsed(_))
    }

    pub fn into_result(self) -> Result<T> {
        match self {
            ProviderReply::Parsed(value) => Ok(value),
            ProviderReply::Malformed { reason, preview } => {
                tracing::debug!(%preview, "Malformed provider reply");
                Err(PlanError::malformed(reason))
            }
        }
    }
}

/// Decode a raw reply into `T`, repairing JSON where possible
pub fn parse_reply<T: DeserializeOwned>(raw: &str) -> ProviderReply<T> {
    let value = match JsonRepairer::new().parse_or_repair(raw) {
        Ok((value, _)) => value,
        Err(err) => {
            return ProviderReply::Malformed {
                reason: err.to_string(),
                preview: preview(raw),
            };
        }
    };

    match serde_json::from_value::<T>(value) {
        Ok(parsed) => ProviderReply::Parsed(parsed),
        Err(err) => ProviderReply::Malformed {
            reason: format!("reply does not match the expected shape: {err}"),
            preview: preview(raw),
        },
    }
}
