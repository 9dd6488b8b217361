//! Scheduler runner, split into focused submodules:
//! - `core`: Scheduler struct, constructor and the run loop
//! - `tick`: per-run state and the admit / re-queue / dispatch / execute steps

mod core;
mod tick;

pub use self::core::{run_scheduler, Scheduler};
