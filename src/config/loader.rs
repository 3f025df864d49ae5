//! Configuration Loader (Figment-based)
//!
//! Loads and merges configuration from multiple sources using Figment:
//! 1. Built-in defaults (Serialized)
//! 2. Global config (platform config dir, e.g. ~/.config/flightplan/config.toml)
//! 3. Project config (.flightplan/config.toml)
//! 4. Environment variables (FLIGHTPLAN_* prefix)

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
    value::{Uncased, UncasedStr},
};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::types::Config;
use crate::types::{PlanError, Result};

const ENV_PREFIX: &str = "FLIGHTPLAN_";

/// Top-level sections. Env keys are split on the section name only, so
/// `FLIGHTPLAN_RATE_LIMIT_REQUESTS_PER_DAY` maps to `rate_limit.requests_per_day`.
const SECTIONS: [&str; 3] = ["llm", "rate_limit", "generation"];

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with full resolution chain using Figment:
    /// defaults → global → project → env vars
    pub fn load() -> Result<Config> {
        Self::load_from(
            Self::global_config_path().as_deref(),
            &Self::project_config_path(),
        )
    }

    /// Load with explicit file locations. Missing files are skipped.
    pub fn load_from(global: Option<&Path>, project: &Path) -> Result<Config> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        if let Some(global_path) = global
            && global_path.exists()
        {
            debug!("Loading global config from: {}", global_path.display());
            figment = figment.merge(Toml::file(global_path));
        }

        if project.exists() {
            debug!("Loading project config from: {}", project.display());
            figment = figment.merge(Toml::file(project));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).map(env_key));

        let config: Config = figment
            .extract()
            .map_err(|e| PlanError::Config(format!("Configuration error: {e}")))?;

        config.validate()?;

        Ok(config)
    }

    // =========================================================================
    // Path Management
    // =========================================================================

    /// Global config directory (platform-specific)
    pub fn global_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "flightplan").map(|dirs| dirs.config_dir().to_path_buf())
    }

    pub fn global_config_path() -> Option<PathBuf> {
        Self::global_dir().map(|dir| dir.join("config.toml"))
    }

    pub fn project_dir() -> PathBuf {
        PathBuf::from(".flightplan")
    }

    pub fn project_config_path() -> PathBuf {
        Self::project_dir().join("config.toml")
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Effective configuration as TOML or JSON. The API key is never included.
    pub fn render(config: &Config, as_json: bool) -> Result<String> {
        if as_json {
            Ok(serde_json::to_string_pretty(config)?)
        } else {
            toml::to_string_pretty(config).map_err(|e| PlanError::Config(e.to_string()))
        }
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Write the default global config. Returns the file path.
    pub fn init_global(force: bool) -> Result<PathBuf> {
        let global_dir = Self::global_dir().ok_or_else(|| {
            PlanError::Config("Cannot determine global config directory".to_string())
        })?;
        Self::write_default(&global_dir.join("config.toml"), force)
    }

    /// Write the default project config. Returns the file path.
    pub fn init_project(force: bool) -> Result<PathBuf> {
        Self::write_default(&Self::project_config_path(), force)
    }

    fn write_default(path: &Path, force: bool) -> Result<PathBuf> {
        if path.exists() && !force {
            info!("Config exists: {}", path.display());
            return Ok(path.to_path_buf());
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, DEFAULT_CONFIG)?;
        info!("Created config: {}", path.display());
        Ok(path.to_path_buf())
    }
}

/// `LLM_MODEL` → `llm.model`, `RATE_LIMIT_MIN_SPACING_SECS` → `rate_limit.min_spacing_secs`
fn env_key(key: &UncasedStr) -> Uncased<'_> {
    let lower = key.as_str().to_ascii_lowercase();
    for section in SECTIONS {
        if let Some(field) = lower
            .strip_prefix(section)
            .and_then(|rest| rest.strip_prefix('_'))
        {
            return Uncased::from_owned(format!("{section}.{field}"));
        }
    }
    Uncased::from_owned(lower)
}

const DEFAULT_CONFIG: &str = r#"# Flightplan Configuration
# Project settings in .flightplan/config.toml override the global file.
# Environment variables override both, e.g. FLIGHTPLAN_LLM_MODEL=gpt-4o-mini

version = "1.0"

[llm]
# "openai" or "none" (curated content only)
provider = "openai"
model = "gpt-3.5-turbo"
timeout_secs = 120
temperature = 1.0
max_tokens = 2048
# api_key = "sk-..."          # prefer the OPENAI_API_KEY environment variable
# api_base = "https://api.openai.com/v1"

[rate_limit]
requests_per_minute = 3
requests_per_day = 200
min_spacing_secs = 20

[generation]
# "ai", "curated" or "auto" (AI with curated fallback)
mode = "auto"
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GenerationMode;
    use tempfile::TempDir;

    #[test]
    fn test_default_file_parses_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        ConfigLoader::write_default(&path, false).unwrap();

        let config = ConfigLoader::load_from(None, &path).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.llm.model.as_deref(), Some("gpt-3.5-turbo"));
        assert_eq!(config.rate_limit.requests_per_day, 200);
        assert_eq!(config.generation.mode, GenerationMode::Auto);
    }

    #[test]
    fn test_project_overrides_global() {
        let temp_dir = TempDir::new().unwrap();
        let global = temp_dir.path().join("global.toml");
        let project = temp_dir.path().join("project.toml");
        fs::write(&global, "[llm]\nmodel = \"global-model\"\n[generation]\nmode = \"ai\"\n").unwrap();
        fs::write(&project, "[llm]\nmodel = \"project-model\"\n").unwrap();

        let config = ConfigLoader::load_from(Some(&global), &project).unwrap();
        assert_eq!(config.llm.model.as_deref(), Some("project-model"));
        assert_eq!(config.generation.mode, GenerationMode::Ai);
    }

    #[test]
    fn test_missing_files_fall_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = ConfigLoader::load_from(
            Some(&temp_dir.path().join("nope.toml")),
            &temp_dir.path().join("also-nope.toml"),
        )
        .unwrap();
        assert_eq!(config.llm.provider, "openai");
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let project = temp_dir.path().join("config.toml");
        fs::write(&project, "[llm]\ntemperature = 9.0\n").unwrap();

        let err = ConfigLoader::load_from(None, &project).unwrap_err();
        assert!(err.to_string().contains("temperature"));
    }

    #[test]
    fn test_write_default_respects_force() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested/config.toml");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "version = \"custom\"\n").unwrap();

        ConfigLoader::write_default(&path, false).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "version = \"custom\"\n");

        ConfigLoader::write_default(&path, true).unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains("[rate_limit]"));
    }

    #[test]
    fn test_env_key_mapping() {
        assert_eq!(env_key(UncasedStr::new("LLM_MODEL")).as_str(), "llm.model");
        assert_eq!(
            env_key(UncasedStr::new("RATE_LIMIT_MIN_SPACING_SECS")).as_str(),
            "rate_limit.min_spacing_secs"
        );
        assert_eq!(env_key(UncasedStr::new("GENERATION_MODE")).as_str(), "generation.mode");
        assert_eq!(env_key(UncasedStr::new("VERSION")).as_str(), "version");
    }

    #[test]
    fn test_render_omits_api_key() {
        let mut config = Config::default();
        config.llm.api_key = Some("sk-hidden".to_string());
        let toml = ConfigLoader::render(&config, false).unwrap();
        let json = ConfigLoader::render(&config, true).unwrap();
        assert!(!toml.contains("sk-hidden"));
        assert!(!json.contains("sk-hidden"));
        assert!(toml.contains("[rate_limit]"));
    }
}
