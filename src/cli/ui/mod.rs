mod output;
mod render;

pub use output::Output;
pub use render::{render_feedback, render_lesson};
