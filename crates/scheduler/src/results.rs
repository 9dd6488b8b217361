use std::time::Duration;

use fairsim_tree::{HeapType, OpStats, TimelineKind};
use serde::{Deserialize, Serialize};

use crate::metrics::RunSummary;
use crate::task::Task;

/// What happened on one tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickRecord {
    pub time: u64,
    /// Id of the task that ran, if any.
    pub running: Option<String>,
    /// Resident tasks after dispatch: queued plus running.
    pub num_tasks: usize,
    /// The running task finished on this tick.
    pub completed: bool,
}

/// Everything a finished run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerResults {
    pub timeline: TimelineKind,
    pub heap_type: HeapType,
    pub total_time: u64,
    /// Empty when tick recording is disabled.
    pub ticks: Vec<TickRecord>,
    /// Final task states, in admission order.
    pub tasks: Vec<Task>,
    /// Wall-clock time of the tick loop.
    pub elapsed: Duration,
    /// Timeline operation counters for the whole run.
    pub stats: OpStats,
    pub summary: RunSummary,
}

impl SchedulerResults {
    pub fn completed(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| t.is_completed())
    }

    /// Completed tasks ordered by completion tick.
    pub fn completion_order(&self) -> Vec<&Task> {
        let mut done: Vec<&Task> = self.completed().collect();
        done.sort_by_key(|t| t.completed_at);
        done
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
