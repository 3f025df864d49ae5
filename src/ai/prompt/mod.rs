//! Prompt Builder System
//!
//! Standardized prompt construction for provider calls. Every user prompt is
//! assembled from ordered sections so that the three request kinds (lesson,
//! feedback, explanation) share one layout.
//!
//! The system role text for each request kind lives in [`roles`].

use crate::types::{InterviewResponse, LessonPlan};

/// System role instructions, one per request kind
pub mod roles {
    pub const LESSON_DESIGNER: &str = "You are an expert STEM educator specializing in hands-on learning and project-based instruction. You excel at creating engaging, age-appropriate content that balances fun with educational value.";

    pub const LESSON_REVIEWER: &str = "You are an experienced STEM education consultant who specializes in reviewing and improving lesson plans.";

    pub const CONCEPT_EXPLAINER: &str = "You are a gifted STEM educator known for making complex concepts easy to understand through clear explanations and relatable examples.";
}

/// Prompt section types
#[derive(Debug, Clone)]
pub enum PromptSection {
    /// Task statement
    Task(String),
    /// Key-value facts, rendered in insertion order
    Context(Vec<(String, String)>),
    /// Numbered requirements
    Objectives(Vec<String>),
    /// Raw text section with optional header
    Text {
        header: Option<String>,
        content: String,
    },
    /// Fenced block with language tag
    Code { language: String, content: String },
}

/// Prompt builder for consistent prompt construction
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    sections: Vec<PromptSection>,
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn task(mut self, task: &str) -> Self {
        self.sections.push(PromptSection::Task(task.to_string()));
        self
    }

    /// Add a context item, merging into the existing context section
    pub fn context_item(mut self, key: &str, value: &str) -> Self {
        let existing = self.sections.iter_mut().find_map(|section| match section {
            PromptSection::Context(items) => Some(items),
            _ => None,
        });
        match existing {
            Some(items) => items.push((key.to_string(), value.to_string())),
            None => self.sections.push(PromptSection::Context(vec![(
                key.to_string(),
                value.to_string(),
            )])),
        }
        self
    }

    /// Add numbered objectives under a header
    pub fn objectives(mut self, objectives: &[&str]) -> Self {
        self.sections.push(PromptSection::Objectives(
            objectives.iter().map(|o| o.to_string()).collect(),
        ));
        self
    }

    /// Add text section with header
    pub fn section(mut self, header: &str, content: &str) -> Self {
        self.sections.push(PromptSection::Text {
            header: Some(header.to_string()),
            content: content.to_string(),
        });
        self
    }

    pub fn text(mut self, content: &str) -> Self {
        self.sections.push(PromptSection::Text {
            header: None,
            content: content.to_string(),
        });
        self
    }

    pub fn code(mut self, language: &str, content: &str) -> Self {
        self.sections.push(PromptSection::Code {
            language: language.to_string(),
            content: content.to_string(),
        });
        self
    }

    /// Build the final prompt string
    pub fn build(self) -> String {
        let mut prompt = String::new();

        for section in self.sections {
            match section {
                PromptSection::Task(task) => {
                    prompt.push_str(&task);
                    prompt.push_str("\n\n");
                }
                PromptSection::Context(items) => {
                    for (key, value) in items {
                        prompt.push_str(&format!("{key}: {value}\n"));
                    }
                    prompt.push('\n');
                }
                PromptSection::Objectives(objectives) => {
                    for (i, obj) in objectives.iter().enumerate() {
                        prompt.push_str(&format!("{}. {}\n", i + 1, obj));
                    }
                    prompt.push('\n');
                }
                PromptSection::Text { header, content } => {
                    if let Some(h) = header {
                        prompt.push_str(&format!("{h}\n"));
                    }
                    if !content.is_empty() {
                        prompt.push_str(&content);
                        prompt.push_str("\n\n");
                    }
                }
                PromptSection::Code { language, content } => {
                    prompt.push_str(&format!("```{language}\n"));
                    prompt.push_str(&content);
                    prompt.push_str("\n```\n\n");
                }
            }
        }

        prompt.trim_end().to_string()
    }
}

const LESSON_SHAPE: &str = r#"{
  "lessonPlan": {
    "title": string,
    "objectives": string[],
    "materials": string[],
    "procedure": string[],
    "extensions": string[]
  }
}"#;

const LESSON_WITH_ASSESSMENT_SHAPE: &str = r#"{
  "lessonPlan": {
    "title": string,
    "objectives": string[],
    "materials": string[],
    "procedure": string[],
    "extensions": string[]
  },
  "assessment": {
    "questions": Array<{
      "question": string,
      "type": "multiple-choice" | "open-ended",
      "options"?: string[]
    }>
  }
}"#;

const FEEDBACK_SHAPE: &str = r#"{
  "suggestions": string[],
  "improvements": string[],
  "tips": string[]
}"#;

/// Preset prompt templates for each request kind
pub struct PromptTemplates;

impl PromptTemplates {
    /// Lesson plan request, with assessment questions when the educator asked for them
    pub fn lesson_plan(response: &InterviewResponse) -> PromptBuilder {
        let builder = PromptBuilder::new()
            .task(&format!(
                "Create a detailed flying machines lesson plan for {} students.",
                response.grade_level
            ))
            .context_item("Available time", &response.time)
            .context_item("Learning environment", &response.environment)
            .context_item("Teacher confidence level", &response.confidence)
            .section("The lesson plan should include:", "")
            .objectives(&[
                "A title",
                "Learning objectives that incorporate STEM concepts and hands-on learning",
                "Required materials with specific quantities and alternatives",
                "Detailed step-by-step procedure with time allocations",
                "Extension activities for different skill levels",
            ]);

        let (builder, shape) = if response.assessment {
            (
                builder.text(
                    "Include age-appropriate assessment questions that test both knowledge and application. Every multiple-choice question must list at least two options.",
                ),
                LESSON_WITH_ASSESSMENT_SHAPE,
            )
        } else {
            (builder, LESSON_SHAPE)
        };

        builder
            .text("Format the response as a JSON object with:")
            .code("json", shape)
    }

    /// Review request for an existing plan
    pub fn feedback(plan: &LessonPlan) -> PromptBuilder {
        let plan_json =
            serde_json::to_string_pretty(plan).unwrap_or_else(|_| format!("{plan:?}"));

        PromptBuilder::new()
            .task("Analyze this lesson plan and provide detailed feedback:")
            .code("json", &plan_json)
            .section("Consider:", "")
            .objectives(&[
                "Age appropriateness",
                "Time management",
                "Safety considerations",
                "Learning effectiveness",
                "Engagement level",
                "Potential challenges",
            ])
            .text("Provide specific, actionable feedback formatted as a JSON object with:")
            .code("json", FEEDBACK_SHAPE)
    }

    /// Plain-text explanation of one concept
    pub fn explanation(concept: &str) -> PromptBuilder {
        PromptBuilder::new()
            .task(&format!(
                "Explain this STEM concept in an engaging, age-appropriate way: {concept}"
            ))
            .section("Consider:", "")
            .objectives(&[
                "Use simple, clear language",
                "Include real-world examples",
                "Connect to flying machines where relevant",
                "Make it engaging and memorable",
            ])
    }
}
