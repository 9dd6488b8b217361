use fairsim_core::TaskSet;
use fairsim_tree::Timeline;
use tracing::{debug, trace};

use crate::results::TickRecord;
use crate::task::{QueuedTask, Task};

/// Mutable state of one simulation run.
pub(super) struct RunState {
    pub(super) tasks: Vec<Task>,
    pub(super) timeline: Box<dyn Timeline<QueuedTask>>,
    /// Next slot of `tasks` waiting for its start time.
    next_admit: usize,
    running: Option<usize>,
    min_vruntime: u64,
}

impl RunState {
    pub(super) fn new(set: &TaskSet, timeline: Box<dyn Timeline<QueuedTask>>) -> Self {
        Self {
            tasks: set.tasks().iter().map(Task::from).collect(),
            timeline,
            next_admit: 0,
            running: None,
            min_vruntime: 0,
        }
    }

    fn enqueue(&mut self, slot: usize) {
        let vruntime = self.tasks[slot].vruntime;
        self.timeline.insert(QueuedTask { vruntime, slot });
    }

    /// Admit every task whose start time has arrived.
    fn admit(&mut self, now: u64) {
        while let Some(task) = self.tasks.get_mut(self.next_admit) {
            if task.start_time > now {
                break;
            }
            task.vruntime = self.min_vruntime;
            task.truntime = 0;
            task.actual_start_time = Some(now);
            trace!(task = %task.id, tick = now, vruntime = self.min_vruntime, "admitted");
            let slot = self.next_admit;
            self.next_admit += 1;
            self.enqueue(slot);
        }
    }

    /// Put the running task back once it has pulled ahead of the queue.
    /// Its vruntime then exceeds every queued one, so `min_vruntime` holds.
    fn requeue(&mut self) {
        if let Some(slot) = self.running {
            if self.tasks[slot].vruntime > self.min_vruntime {
                self.enqueue(slot);
                self.running = None;
            }
        }
    }

    fn dispatch(&mut self) {
        if self.running.is_some() {
            return;
        }
        let Some(next) = self.timeline.pop() else {
            return;
        };
        self.running = Some(next.slot);
        if let Some(head) = self.timeline.peek() {
            self.min_vruntime = head.vruntime;
        }
    }

    /// Run the current task for one tick. Returns true when it finished.
    fn execute(&mut self, now: u64) -> bool {
        let Some(slot) = self.running else {
            return false;
        };
        let task = &mut self.tasks[slot];
        task.vruntime += 1;
        task.truntime += 1;
        if task.truntime >= task.duration {
            task.completed_at = Some(now);
            debug!(task = %task.id, tick = now, "completed");
            self.running = None;
            return true;
        }
        false
    }

    pub(super) fn step(&mut self, now: u64) -> TickRecord {
        self.admit(now);
        self.requeue();
        self.dispatch();

        let running = self.running.map(|slot| self.tasks[slot].id.clone());
        let num_tasks = self.timeline.len() + usize::from(self.running.is_some());
        let completed = self.execute(now);
        trace!(tick = now, running = ?running, num_tasks, "tick");

        TickRecord {
            time: now,
            running,
            num_tasks,
            completed,
        }
    }

    /// Return a still-running task to the timeline and hand back the tasks.
    pub(super) fn finish(mut self) -> (Vec<Task>, Box<dyn Timeline<QueuedTask>>) {
        if let Some(slot) = self.running.take() {
            self.enqueue(slot);
        }
        (self.tasks, self.timeline)
    }
}
