//! Feedback Command
//!
//! Ask the AI provider to review a lesson plan.
//!
//! Usage:
//!   flightplan feedback --plan lesson.json [--format json]

use serde::Deserialize;
use std::path::Path;

use super::plan::OutputFormat;
use crate::cli::ui::render_feedback;
use crate::config::{ConfigLoader, GenerationMode};
use crate::planner::Planner;
use crate::types::{GeneratedLesson, LessonPlan, PlanError, Result};

/// Either a bare plan or the full output of `flightplan plan --format json`
#[derive(Deserialize)]
#[serde(untagged)]
enum PlanFile {
    Generated(Box<GeneratedLesson>),
    Plan(LessonPlan),
}

pub fn load_plan(path: &Path) -> Result<LessonPlan> {
    let content = std::fs::read_to_string(path)?;
    let parsed: PlanFile = serde_json::from_str(&content).map_err(|e| {
        PlanError::Answers(format!("{} is not a lesson plan: {}", path.display(), e))
    })?;
    Ok(match parsed {
        PlanFile::Generated(lesson) => lesson.lesson_plan,
        PlanFile::Plan(plan) => plan,
    })
}

pub async fn run(plan_path: &Path, format: OutputFormat) -> Result<()> {
    let plan = load_plan(plan_path)?;
    let config = ConfigLoader::load()?;
    let planner = Planner::from_config(&config, GenerationMode::Ai)?;

    let feedback = planner.feedback(&plan).await?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&feedback)?),
        OutputFormat::Text => print!("{}", render_feedback(&feedback)),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_bare_plan() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plan.json");
        std::fs::write(&path, r#"{"title":"Gliders","procedure":["Fold"]}"#).unwrap();

        let plan = load_plan(&path).unwrap();
        assert_eq!(plan.title, "Gliders");
        assert_eq!(plan.procedure, vec!["Fold"]);
    }

    #[test]
    fn test_load_generated_lesson() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lesson.json");
        std::fs::write(
            &path,
            r#"{"lessonPlan":{"title":"Kites"},"source":"ai","generatedAt":"2026-01-01T00:00:00Z"}"#,
        )
        .unwrap();

        assert_eq!(load_plan(&path).unwrap().title, "Kites");
    }

    #[test]
    fn test_load_rejects_other_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("other.json");
        std::fs::write(&path, r#"[1, 2, 3]"#).unwrap();
        assert!(matches!(load_plan(&path), Err(PlanError::Answers(_))));
    }
}
