pub mod config;
pub mod explain;
pub mod feedback;
pub mod interview;
pub mod plan;

pub use plan::{OutputFormat, PlanOptions};
