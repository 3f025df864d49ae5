//! Plan Command
//!
//! Build a lesson plan from interview answers.
//!
//! Usage:
//!   flightplan plan --answers answers.json [--mode auto|ai|curated]
//!   flightplan plan --time "45 minutes" --grade "5th grade" --assessment
//!   flightplan plan ... --format json --output lesson.json

use std::path::PathBuf;
use std::str::FromStr;
use tracing::debug;

use crate::cli::answers::{AnswerOverrides, resolve_answers};
use crate::cli::ui::{Output, render_lesson};
use crate::config::{ConfigLoader, GenerationMode};
use crate::planner::Planner;
use crate::types::{ContentSource, GeneratedLesson, InterviewResponse, PlanError, Result};

/// How a command prints its result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid format '{}'. Valid values: text, json", s)),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PlanOptions {
    pub answers: Option<PathBuf>,
    pub overrides: AnswerOverrides,
    /// Overrides `generation.mode` from config
    pub mode: Option<GenerationMode>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub quiet: bool,
}

pub async fn run(options: PlanOptions) -> Result<()> {
    if options.answers.is_none() && options.overrides.is_empty() {
        return Err(PlanError::Answers(
            "Provide --answers FILE or at least one answer flag (or run 'flightplan interview')"
                .to_string(),
        ));
    }

    let response = resolve_answers(options.answers.as_deref(), options.overrides)?;
    let out = Output::quiet(options.quiet);
    let planner = load_planner(options.mode)?;
    plan_and_print(&planner, &response, options.format, options.output, &out).await?;
    Ok(())
}

/// Planner from the merged config. `mode` overrides `generation.mode`.
pub(crate) fn load_planner(mode: Option<GenerationMode>) -> Result<Planner> {
    let config = ConfigLoader::load()?;
    let mode = mode.unwrap_or(config.generation.mode);
    debug!("Planning with mode={}", mode);
    Planner::from_config(&config, mode)
}

/// Shared by `plan` and `interview`
pub(crate) async fn plan_and_print(
    planner: &Planner,
    response: &InterviewResponse,
    format: OutputFormat,
    output: Option<PathBuf>,
    out: &Output,
) -> Result<GeneratedLesson> {
    let lesson = planner.plan(response).await?;

    if lesson.source == ContentSource::Curated && planner.mode() != GenerationMode::Curated {
        out.warning("AI generation unavailable, showing a curated lesson plan");
    }

    emit_lesson(&lesson, format, output, out)?;
    Ok(lesson)
}

fn emit_lesson(
    lesson: &GeneratedLesson,
    format: OutputFormat,
    output: Option<PathBuf>,
    out: &Output,
) -> Result<()> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(lesson)?,
        OutputFormat::Text => render_lesson(lesson),
    };

    match output {
        Some(path) => {
            std::fs::write(&path, console::strip_ansi_codes(&rendered).as_bytes())?;
            out.success(&format!("Lesson plan written to {}", path.display()));
        }
        None => println!("{}", rendered),
    }
    Ok(())
}
