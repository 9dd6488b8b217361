pub mod config;
pub mod error;
pub mod task;
pub mod taskfile;

pub use error::*;
pub use task::{TaskSet, TaskSpec};
pub use taskfile::{format_tasks, generate_tasks, parse_tasks, read_tasks, write_tasks};
pub use config::GeneratorConfig;
