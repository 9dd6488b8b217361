//! Human-readable run reports and the per-tick fairness CSV.

use std::fmt::Write as _;

use fairsim_core::TaskSet;

use crate::results::{SchedulerResults, TickRecord};
use crate::task::Task;

/// Multi-line text report. `detailed` adds one line per tick.
pub fn text_report(results: &SchedulerResults, detailed: bool) -> String {
    let mut out = String::new();
    let s = &results.summary;
    let _ = writeln!(
        out,
        "Timeline: {} ({}, {})",
        results.timeline,
        results.timeline.description(),
        results.heap_type
    );
    let _ = writeln!(out, "Tasks: {}  Total time: {}", results.tasks.len(), results.total_time);

    if detailed {
        let _ = writeln!(out, "\nTicks:");
        for tick in &results.ticks {
            let _ = write!(out, "  {:>6}: ", tick.time);
            match &tick.running {
                Some(id) => {
                    let _ = write!(out, "{} ({} resident)", id, tick.num_tasks);
                }
                None => out.push('-'),
            }
            if tick.completed {
                out.push_str(" completed");
            }
            out.push('\n');
        }
    }

    let _ = writeln!(out, "\nCompleted:");
    for task in results.completion_order() {
        let _ = writeln!(
            out,
            "  {} at {} (started {}, duration {}, turnaround {})",
            task.id,
            task.completed_at.unwrap_or_default(),
            task.actual_start_time.unwrap_or_default(),
            task.duration,
            task.turnaround().unwrap_or_default()
        );
    }
    for task in results.tasks.iter().filter(|t| t.is_admitted() && !t.is_completed()) {
        let _ = writeln!(out, "  {} unfinished ({}/{} ticks)", task.id, task.truntime, task.duration);
    }

    let _ = writeln!(out, "\nSummary:");
    let _ = writeln!(
        out,
        "  completed {}/{}  unfinished {}  never admitted {}",
        s.completed,
        results.tasks.len(),
        s.unfinished,
        s.never_admitted
    );
    let _ = writeln!(
        out,
        "  utilization {:.1}%  context switches {}  max resident {}",
        s.utilization() * 100.0,
        s.context_switches,
        s.max_resident
    );
    let _ = writeln!(
        out,
        "  turnaround avg {:.2} max {}  waiting avg {:.2}",
        s.avg_turnaround, s.max_turnaround, s.avg_waiting
    );

    let st = &results.stats;
    let _ = writeln!(out, "\nTimeline operations:");
    let _ = writeln!(
        out,
        "  compares {}  swaps {}  reads {}  writes {}",
        st.compares,
        st.swaps,
        st.total_reads(),
        st.total_writes()
    );
    let _ = writeln!(
        out,
        "  reads  color {} parent {} left {} right {} index {} value {}",
        st.reads.color, st.reads.parent, st.reads.left, st.reads.right, st.reads.index, st.reads.value
    );
    let _ = writeln!(
        out,
        "  writes color {} parent {} left {} right {} index {} value {}",
        st.writes.color, st.writes.parent, st.writes.left, st.writes.right, st.writes.index, st.writes.value
    );
    let _ = write!(out, "Elapsed: {:?}", results.elapsed);
    out
}

#[derive(Debug, Default, Clone, Copy)]
struct Residency {
    sum: u64,
    samples: u64,
}

/// Per-tick fairness CSV, fed from a [`crate::Scheduler::run_with`] observer.
///
/// For each admitted task the row carries its executed ticks and
/// `(truntime / elapsed) / (1 / avg_resident)`, where `avg_resident` averages
/// `num_tasks` over the ticks since the task was admitted. 1.00 means the task
/// got exactly its share. Columns go blank after the completion tick.
#[derive(Debug)]
pub struct FairnessReport {
    residency: Vec<Residency>,
    out: String,
}

impl FairnessReport {
    pub fn new(tasks: &TaskSet) -> Self {
        let mut out = String::from("time,num_tasks,running_task_id,completed");
        for task in tasks.tasks() {
            let _ = write!(out, ",{}_t,{}_f", task.id, task.id);
        }
        out.push('\n');
        Self {
            residency: vec![Residency::default(); tasks.len()],
            out,
        }
    }

    pub fn record(&mut self, tick: &TickRecord, tasks: &[Task]) {
        let _ = write!(
            self.out,
            "{},{},\"{}\",{}",
            tick.time,
            tick.num_tasks,
            tick.running.as_deref().unwrap_or(""),
            tick.completed
        );
        for (task, residency) in tasks.iter().zip(self.residency.iter_mut()) {
            let visible = match (task.actual_start_time, task.completed_at) {
                (None, _) => None,
                (Some(_), Some(done)) if done < tick.time => None,
                (Some(admitted), _) => Some(admitted),
            };
            let Some(admitted) = visible else {
                self.out.push_str(",,");
                continue;
            };
            residency.sum += tick.num_tasks as u64;
            residency.samples += 1;
            let avg_resident = residency.sum as f64 / residency.samples as f64;
            let elapsed = (tick.time - admitted + 1) as f64;
            let fairness = (task.truntime as f64 / elapsed) * avg_resident;
            let _ = write!(self.out, ",{},{:.2}", task.truntime, fairness);
        }
        self.out.push('\n');
    }

    pub fn finish(self) -> String {
        self.out
    }
}
