use std::time::Instant;

use fairsim_core::TaskSet;
use fairsim_tree::TimelineKind;
use tracing::{debug, info};

use crate::config::SchedulerConfig;
use crate::error::SchedulerError;
use crate::metrics::SummaryBuilder;
use crate::results::{SchedulerResults, TickRecord};
use crate::task::{by_vruntime, Task};

use super::tick::RunState;

/// Completely fair scheduler over a configurable timeline backend.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    config: SchedulerConfig,
}

impl Scheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Simulate `tasks` for `tasks.total_time` ticks.
    pub fn run(&self, tasks: &TaskSet) -> Result<SchedulerResults, SchedulerError> {
        self.run_with(tasks, |_, _| {})
    }

    /// Like [`Scheduler::run`], calling `observer` after every tick with the
    /// tick's record and the current state of every task.
    pub fn run_with<F>(&self, tasks: &TaskSet, mut observer: F) -> Result<SchedulerResults, SchedulerError>
    where
        F: FnMut(&TickRecord, &[Task]),
    {
        let config = &self.config;
        info!(
            timeline = %config.timeline,
            heap = %config.heap_type,
            tasks = tasks.len(),
            total_time = tasks.total_time,
            "starting simulation"
        );

        let timeline = config.timeline.build(config.heap_type, by_vruntime);
        let mut state = RunState::new(tasks, timeline);
        let mut summary = SummaryBuilder::default();
        let mut ticks = Vec::new();
        let started = Instant::now();

        for now in 0..tasks.total_time {
            let record = state.step(now);
            if config.verify_invariants {
                state
                    .timeline
                    .validate()
                    .map_err(|source| SchedulerError::Invariant { tick: now, source })?;
            }
            summary.observe(&record);
            observer(&record, &state.tasks);
            if config.record_ticks {
                ticks.push(record);
            }
        }

        let elapsed = started.elapsed();
        let (tasks_out, timeline) = state.finish();
        let stats = timeline.stats();
        debug!(queued = timeline.len(), "timeline at end of run");
        let summary = summary.finish(&tasks_out);

        info!(
            completed = summary.completed,
            unfinished = summary.unfinished,
            compares = stats.compares,
            elapsed_us = elapsed.as_micros() as u64,
            "simulation finished"
        );

        Ok(SchedulerResults {
            timeline: config.timeline,
            heap_type: config.heap_type,
            total_time: tasks.total_time,
            ticks,
            tasks: tasks_out,
            elapsed,
            stats,
            summary,
        })
    }
}

/// Run `tasks` on a min-ordered `kind` timeline with default settings.
pub fn run_scheduler(tasks: &TaskSet, kind: TimelineKind) -> Result<SchedulerResults, SchedulerError> {
    Scheduler::new(SchedulerConfig::with_timeline(kind)).run(tasks)
}
