pub mod answers;
pub mod commands;
pub mod ui;

pub use answers::{AnswerOverrides, load_answers, resolve_answers};
