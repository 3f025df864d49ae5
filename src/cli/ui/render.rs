//! Text rendering of lessons and feedback for the terminal.

use console::style;
use std::fmt::Write;

use crate::types::{GeneratedLesson, LessonFeedback, QuestionKind};

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n{}", style(title).bold());
    let _ = writeln!(out, "{}", "─".repeat(40));
}

fn bullets(out: &mut String, items: &[String]) {
    for item in items {
        let _ = writeln!(out, "  • {item}");
    }
}

fn numbered(out: &mut String, items: &[String]) {
    for (i, item) in items.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", i + 1, item);
    }
}

pub fn render_lesson(lesson: &GeneratedLesson) -> String {
    let plan = &lesson.lesson_plan;
    let mut out = String::new();

    let _ = writeln!(out, "{}", style(&plan.title).bold().underlined());
    let _ = writeln!(
        out,
        "{}",
        style(format!(
            "source: {} · {}",
            lesson.source,
            lesson.generated_at.format("%Y-%m-%d %H:%M UTC")
        ))
        .dim()
    );

    heading(&mut out, "Learning Objectives");
    bullets(&mut out, &plan.objectives);

    heading(&mut out, "Materials Needed");
    bullets(&mut out, &plan.materials);

    heading(&mut out, "Procedure");
    numbered(&mut out, &plan.procedure);

    heading(&mut out, "Extensions");
    bullets(&mut out, &plan.extensions);

    if let Some(assessment) = &lesson.assessment {
        heading(&mut out, "Assessment");
        for (i, q) in assessment.questions.iter().enumerate() {
            let _ = writeln!(out, "  {}. {}", i + 1, q.question);
            if q.kind == QuestionKind::MultipleChoice {
                for (letter, option) in ('a'..='z').zip(q.options.iter().flatten()) {
                    let _ = writeln!(out, "     {letter}) {option}");
                }
            }
        }
    }

    out
}

pub fn render_feedback(feedback: &LessonFeedback) -> String {
    let mut out = String::new();
    for (title, items) in [
        ("Suggestions", &feedback.suggestions),
        ("Improvements", &feedback.improvements),
        ("Tips", &feedback.tips),
    ] {
        if items.is_empty() {
            continue;
        }
        heading(&mut out, title);
        bullets(&mut out, items);
    }
    if out.is_empty() {
        out.push_str("No feedback returned.\n");
    }
    out
}
