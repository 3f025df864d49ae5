//! Configuration Types
//!
//! All configuration structures with sensible defaults.
//! Supports global (platform config dir) and project (.flightplan/) level configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ai::gate::GateLimits;
use crate::ai::provider::ProviderConfig;
use crate::constants::rate_limit;
use crate::types::{PlanError, Result};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// AI provider settings
    pub llm: ProviderConfig,

    /// Request gate caps
    pub rate_limit: RateLimitConfig,

    /// Producer selection
    pub generation: GenerationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            llm: ProviderConfig::default(),
            rate_limit: RateLimitConfig::default(),
            generation: GenerationConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(PlanError::Config(format!(
                "LLM temperature must be between 0.0 and 2.0, got {}",
                self.llm.temperature
            )));
        }

        if self.llm.timeout_secs == 0 {
            return Err(PlanError::Config(
                "LLM timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.llm.max_tokens == 0 {
            return Err(PlanError::Config(
                "LLM max_tokens must be greater than 0".to_string(),
            ));
        }

        if let Some(base) = &self.llm.api_base {
            url::Url::parse(base).map_err(|e| {
                PlanError::Config(format!("LLM api_base is not a valid URL ({base}): {e}"))
            })?;
        }

        if self.rate_limit.requests_per_minute == 0 || self.rate_limit.requests_per_day == 0 {
            return Err(PlanError::Config(
                "rate_limit requests_per_minute and requests_per_day must be greater than 0"
                    .to_string(),
            ));
        }

        Ok(())
    }
}

// =============================================================================
// Rate Limit Configuration
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    pub requests_per_minute: u32,
    pub requests_per_day: u32,
    /// Minimum seconds between two provider calls
    pub min_spacing_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_minute: rate_limit::REQUESTS_PER_MINUTE,
            requests_per_day: rate_limit::REQUESTS_PER_DAY,
            min_spacing_secs: rate_limit::MIN_SPACING_SECS,
        }
    }
}

impl RateLimitConfig {
    pub fn gate_limits(&self) -> GateLimits {
        GateLimits {
            per_minute: self.requests_per_minute,
            per_day: self.requests_per_day,
            min_spacing: Duration::from_secs(self.min_spacing_secs),
            ..GateLimits::default()
        }
    }
}

// =============================================================================
// Generation Configuration
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub mode: GenerationMode,
}

/// Which producer builds lessons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    /// AI provider only; every failure is reported
    Ai,
    /// Static grade tables only; never touches the network
    Curated,
    /// AI provider, with curated content when the provider fails
    #[default]
    Auto,
}

impl std::fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationMode::Ai => write!(f, "ai"),
            GenerationMode::Curated => write!(f, "curated"),
            GenerationMode::Auto => write!(f, "auto"),
        }
    }
}

impl std::str::FromStr for GenerationMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ai" => Ok(GenerationMode::Ai),
            "curated" => Ok(GenerationMode::Curated),
            "auto" => Ok(GenerationMode::Auto),
            _ => Err(format!(
                "Unknown generation mode: {s}. Valid values: ai, curated, auto"
            )),
        }
    }
}
