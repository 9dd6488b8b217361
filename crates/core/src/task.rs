use serde::{Deserialize, Serialize};

/// Static description of a task as read from a task file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskSpec {
    pub id: String,
    /// Tick at which the task becomes runnable.
    pub start_time: u64,
    /// Ticks of CPU the task needs before it completes.
    pub duration: u64,
}

impl TaskSpec {
    pub fn new(id: impl Into<String>, start_time: u64, duration: u64) -> Self {
        Self {
            id: id.into(),
            start_time,
            duration,
        }
    }
}

/// A complete simulation input: the tasks plus the number of ticks to run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSet {
    pub total_time: u64,
    /// Always sorted by `start_time`; equal start times keep file order.
    tasks: Vec<TaskSpec>,
}

impl TaskSet {
    pub fn new(total_time: u64, mut tasks: Vec<TaskSpec>) -> Self {
        tasks.sort_by_key(|t| t.start_time);
        Self { total_time, tasks }
    }

    pub fn tasks(&self) -> &[TaskSpec] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Sum of all durations, i.e. the busy ticks needed to finish every task.
    pub fn total_work(&self) -> u64 {
        self.tasks.iter().map(|t| t.duration).sum()
    }
}
