use serde::{Deserialize, Serialize};

use crate::results::TickRecord;
use crate::task::Task;

/// Aggregate figures for one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub ticks: u64,
    /// Ticks with a running task.
    pub busy_ticks: u64,
    /// Times the CPU went from one task straight to a different one.
    pub context_switches: u64,
    /// Peak of `TickRecord::num_tasks`.
    pub max_resident: usize,
    pub admitted: usize,
    pub completed: usize,
    /// Tasks admitted but unfinished when time ran out.
    pub unfinished: usize,
    /// Tasks whose start time was never reached.
    pub never_admitted: usize,
    pub avg_turnaround: f64,
    pub max_turnaround: u64,
    pub avg_waiting: f64,
}

impl RunSummary {
    /// Share of ticks spent running a task (0.0 - 1.0).
    pub fn utilization(&self) -> f64 {
        if self.ticks == 0 {
            0.0
        } else {
            self.busy_ticks as f64 / self.ticks as f64
        }
    }
}

/// Accumulates a [`RunSummary`] tick by tick, so the summary is available
/// even when tick records are not kept.
#[derive(Debug, Default)]
pub(crate) struct SummaryBuilder {
    summary: RunSummary,
    last_running: Option<String>,
}

impl SummaryBuilder {
    pub(crate) fn observe(&mut self, tick: &TickRecord) {
        let s = &mut self.summary;
        s.ticks += 1;
        s.max_resident = s.max_resident.max(tick.num_tasks);
        if let Some(id) = &tick.running {
            s.busy_ticks += 1;
            if self.last_running.as_ref().is_some_and(|prev| prev != id) {
                s.context_switches += 1;
            }
        }
        self.last_running = if tick.completed { None } else { tick.running.clone() };
    }

    pub(crate) fn finish(mut self, tasks: &[Task]) -> RunSummary {
        let s = &mut self.summary;
        let mut turnaround_sum = 0u64;
        let mut waiting_sum = 0u64;
        for task in tasks {
            if !task.is_admitted() {
                s.never_admitted += 1;
                continue;
            }
            s.admitted += 1;
            match (task.turnaround(), task.waiting()) {
                (Some(turnaround), Some(waiting)) => {
                    s.completed += 1;
                    turnaround_sum += turnaround;
                    waiting_sum += waiting;
                    s.max_turnaround = s.max_turnaround.max(turnaround);
                }
                _ => s.unfinished += 1,
            }
        }
        if s.completed > 0 {
            s.avg_turnaround = turnaround_sum as f64 / s.completed as f64;
            s.avg_waiting = waiting_sum as f64 / s.completed as f64;
        }
        self.summary
    }
}
