//! Discrete-tick simulation of a completely fair scheduler.
//!
//! Every tick admits newly started tasks at the current minimum virtual
//! runtime, preempts the running task once it has pulled ahead, and runs the
//! task with the smallest virtual runtime. The ready queue is any
//! [`fairsim_tree::Timeline`], chosen at construction through
//! [`SchedulerConfig::timeline`].

pub mod config;
pub mod error;
pub mod metrics;
pub mod report;
pub mod results;
pub mod runner;
pub mod task;

pub use config::SchedulerConfig;
pub use error::SchedulerError;
pub use metrics::RunSummary;
pub use report::{text_report, FairnessReport};
pub use results::{SchedulerResults, TickRecord};
pub use runner::{run_scheduler, Scheduler};
pub use task::{by_vruntime, QueuedTask, Task};
