use std::cmp::Ordering;

use fairsim_core::TaskSpec;
use serde::{Deserialize, Serialize};

/// Runtime state of one task. The scheduler owns these in a `Vec` and the
/// timeline refers to them by slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub start_time: u64,
    pub duration: u64,
    /// Ordering key; starts at the admission-time `min_vruntime`.
    pub vruntime: u64,
    /// Ticks actually executed.
    pub truntime: u64,
    /// Tick the task was admitted, `None` until then.
    pub actual_start_time: Option<u64>,
    /// Tick on which the last unit of work ran.
    pub completed_at: Option<u64>,
}

impl Task {
    pub fn is_admitted(&self) -> bool {
        self.actual_start_time.is_some()
    }

    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Ticks from admission to completion, both inclusive.
    pub fn turnaround(&self) -> Option<u64> {
        Some(self.completed_at? - self.actual_start_time? + 1)
    }

    /// Admitted ticks spent not running.
    pub fn waiting(&self) -> Option<u64> {
        Some(self.turnaround()? - self.truntime)
    }
}

impl From<&TaskSpec> for Task {
    fn from(spec: &TaskSpec) -> Self {
        Self {
            id: spec.id.clone(),
            start_time: spec.start_time,
            duration: spec.duration,
            vruntime: 0,
            truntime: 0,
            actual_start_time: None,
            completed_at: None,
        }
    }
}

/// Timeline entry for a waiting task. `vruntime` is a copy taken at
/// insertion; the task does not change while it waits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueuedTask {
    pub vruntime: u64,
    pub slot: usize,
}

/// Comparator injected into the timeline.
pub fn by_vruntime(a: &QueuedTask, b: &QueuedTask) -> Ordering {
    a.vruntime.cmp(&b.vruntime)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_spec_starts_unadmitted() {
        let task = Task::from(&TaskSpec::new("A", 3, 5));
        assert_eq!(task.id, "A");
        assert!(!task.is_admitted());
        assert!(!task.is_completed());
        assert_eq!(task.turnaround(), None);
    }

    #[test]
    fn turnaround_and_waiting() {
        let mut task = Task::from(&TaskSpec::new("A", 1, 10));
        task.actual_start_time = Some(1);
        task.completed_at = Some(20);
        task.truntime = 10;
        assert_eq!(task.turnaround(), Some(20));
        assert_eq!(task.waiting(), Some(10));
    }

    #[test]
    fn vruntime_ignores_slot() {
        let a = QueuedTask { vruntime: 4, slot: 9 };
        let b = QueuedTask { vruntime: 4, slot: 1 };
        let c = QueuedTask { vruntime: 5, slot: 0 };
        assert_eq!(by_vruntime(&a, &b), Ordering::Equal);
        assert_eq!(by_vruntime(&b, &c), Ordering::Less);
    }
}
