//! Scripted Provider
//!
//! Test double: replays a fixed queue of replies and records every request
//! it receives. Not selectable through configuration; unit and integration
//! tests construct it directly to exercise generation without network access.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use super::{ChatRequest, LlmProvider, LlmResponse, ResponseMetadata};
use crate::types::{ErrorCategory, LlmError, PlanError, Result};

const PROVIDER_NAME: &str = "scripted";

/// One canned outcome
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    Text(String),
    Fail(ErrorCategory),
}

#[derive(Debug, Default)]
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<ScriptedReply>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful reply
    pub fn reply(self, text: impl Into<String>) -> Self {
        self.push(ScriptedReply::Text(text.into()))
    }

    /// Queue a provider failure
    pub fn fail(self, category: ErrorCategory) -> Self {
        self.push(ScriptedReply::Fail(category))
    }

    fn push(self, reply: ScriptedReply) -> Self {
        self.replies
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push_back(reply);
        self
    }

    /// Requests received so far, in order
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    async fn complete(&self, request: &ChatRequest) -> Result<LlmResponse> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request.clone());

        let next = self
            .replies
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front();

        match next {
            Some(ScriptedReply::Text(content)) => Ok(LlmResponse {
                metadata: ResponseMetadata {
                    model: self.model().to_string(),
                    provider: PROVIDER_NAME.to_string(),
                },
                ..LlmResponse::content_only(content)
            }),
            Some(ScriptedReply::Fail(category)) => Err(PlanError::Llm(
                LlmError::with_provider(category, "scripted failure", PROVIDER_NAME),
            )),
            None => Err(PlanError::ProviderUnavailable(
                "scripted provider has no replies left".to_string(),
            )),
        }
    }

    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn model(&self) -> &str {
        "scripted-model"
    }
}
