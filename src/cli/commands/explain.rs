//! Explain Command
//!
//! Explain a lesson concept, usually one of a plan's objectives.

use crate::config::{ConfigLoader, GenerationMode};
use crate::planner::Planner;
use crate::types::{PlanError, Result};

pub async fn run(concept: &str) -> Result<()> {
    let concept = concept.trim();
    if concept.is_empty() {
        return Err(PlanError::Answers("Concept must not be empty".to_string()));
    }

    let config = ConfigLoader::load()?;
    let planner = Planner::from_config(&config, GenerationMode::Ai)?;
    println!("{}", planner.explain(concept).await?);
    Ok(())
}
