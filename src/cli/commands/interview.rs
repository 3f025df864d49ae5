//! Interview Command
//!
//! Ask the five interview questions on the terminal, plan the lesson, then
//! take follow-ups (objective explanations, feedback) until the user quits.
//! Every follow-up goes through the same planner, so one request gate
//! covers the whole session.

use console::{Term, style};
use std::path::PathBuf;
use std::str::FromStr;

use super::plan::{OutputFormat, load_planner, plan_and_print};
use crate::cli::ui::{Output, render_feedback};
use crate::config::GenerationMode;
use crate::planner::Planner;
use crate::types::{ConfidenceLevel, InterviewResponse, LessonPlan, PlanError, Result};

pub async fn run(
    mode: Option<GenerationMode>,
    format: OutputFormat,
    output: Option<PathBuf>,
    quiet: bool,
) -> Result<()> {
    let term = Term::stderr();
    let out = Output::quiet(quiet);
    let response = ask(&term)?;

    let planner = load_planner(mode)?;
    let lesson = plan_and_print(&planner, &response, format, output, &out).await?;

    if !planner.has_provider() {
        out.info("Explanations and feedback need an AI provider");
        return Ok(());
    }
    follow_ups(&term, &planner, &lesson.lesson_plan, &out).await
}

// =============================================================================
// Follow-ups
// =============================================================================

/// One command typed after the plan is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowUp {
    /// Explain objective N (1-based)
    Explain(usize),
    Feedback,
    Quit,
}

impl FromStr for FollowUp {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let input = s.trim().to_lowercase();
        let mut words = input.split_whitespace();
        let usage = || "Try 'explain N', 'feedback' or 'quit'".to_string();

        match (words.next(), words.next(), words.next()) {
            (None, _, _) | (Some("q" | "quit" | "exit"), None, _) => Ok(Self::Quit),
            (Some("f" | "feedback"), None, _) => Ok(Self::Feedback),
            (Some("e" | "explain"), Some(n), None) => n
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .map(Self::Explain)
                .ok_or_else(usage),
            _ => Err(usage()),
        }
    }
}

/// Run one follow-up against the plan. `None` ends the session.
pub async fn follow_up(
    planner: &Planner,
    plan: &LessonPlan,
    action: FollowUp,
) -> Result<Option<String>> {
    match action {
        FollowUp::Explain(n) => {
            let objective = n.checked_sub(1).and_then(|i| plan.objectives.get(i)).ok_or_else(|| {
                PlanError::Answers(format!(
                    "No objective {} (the plan has {})",
                    n,
                    plan.objectives.len()
                ))
            })?;
            Ok(Some(planner.explain(objective).await?))
        }
        FollowUp::Feedback => Ok(Some(render_feedback(&planner.feedback(plan).await?))),
        FollowUp::Quit => Ok(None),
    }
}

async fn follow_ups(term: &Term, planner: &Planner, plan: &LessonPlan, out: &Output) -> Result<()> {
    term.write_line("")?;
    term.write_line(&format!(
        "{}",
        style("Follow-up: 'explain N' for objective N, 'feedback', or 'quit'").dim()
    ))?;

    loop {
        term.write_str(&format!("{} ", style(">").cyan()))?;
        let line = term.read_line()?;
        let action = match line.parse::<FollowUp>() {
            Ok(action) => action,
            Err(usage) => {
                out.warning(&usage);
                continue;
            }
        };

        match follow_up(planner, plan, action).await {
            Ok(Some(text)) => println!("{}\n", text.trim_end()),
            Ok(None) => break,
            Err(PlanError::Answers(message)) => out.warning(&message),
            Err(err) => {
                tracing::debug!("Follow-up failed: {}", err);
                out.error(&err.user_message());
            }
        }

        if let Some(snapshot) = planner.gate_snapshot().await {
            out.info(&format!(
                "{} AI requests left today",
                snapshot.remaining_today()
            ));
        }
    }
    Ok(())
}

// =============================================================================
// Questions
// =============================================================================

fn ask(term: &Term) -> Result<InterviewResponse> {
    term.write_line(&style("Flying Machines lesson planner").bold().to_string())?;
    term.write_line("")?;

    let time = prompt(
        term,
        "How much time do you have for this activity?",
        "e.g., 45 minutes, 1 hour",
    )?;
    let grade_level = prompt(
        term,
        "What grade(s) or age group(s) are your learners?",
        "e.g., 5th grade, 10-12 years old",
    )?;
    let environment = prompt(
        term,
        "What is the learning environment?",
        "e.g., classroom, library, after-school",
    )?;

    term.write_line(&format!(
        "{}",
        style("How confident are you in using hands-on projects?").cyan()
    ))?;
    for (i, level) in ConfidenceLevel::ALL.iter().enumerate() {
        term.write_line(&format!("  {}. {}", i + 1, level.label()))?;
    }
    let confidence = loop {
        let input = prompt(term, "Choose 1-4", "")?;
        if let Some(level) = parse_confidence(&input) {
            break level.label().to_string();
        }
        term.write_line(&style("Please choose one of the listed options.").yellow().to_string())?;
    };

    let assessment = loop {
        let input = prompt(term, "Do you want to include an assessment?", "y/n")?;
        if let Some(answer) = parse_yes_no(&input) {
            break answer;
        }
    };

    Ok(InterviewResponse {
        time,
        grade_level,
        environment,
        confidence,
        assessment,
    })
}

fn prompt(term: &Term, question: &str, hint: &str) -> Result<String> {
    if hint.is_empty() {
        term.write_str(&format!("{} ", style(question).cyan()))?;
    } else {
        term.write_str(&format!(
            "{} {} ",
            style(question).cyan(),
            style(format!("({hint})")).dim()
        ))?;
    }
    let line = term.read_line()?;
    if line.is_empty() && !term.is_term() {
        return Err(PlanError::Answers("Interview input ended early".to_string()));
    }
    Ok(line.trim().to_string())
}

/// Accepts a list number or the label itself
fn parse_confidence(input: &str) -> Option<ConfidenceLevel> {
    if let Ok(n) = input.parse::<usize>() {
        return n
            .checked_sub(1)
            .and_then(|i| ConfidenceLevel::ALL.get(i))
            .copied();
    }
    input.parse().ok()
}

fn parse_yes_no(input: &str) -> Option<bool> {
    match input.to_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}
