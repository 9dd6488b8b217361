use fairsim_core::{TaskSet, TaskSpec};
use fairsim_scheduler::{run_scheduler, Scheduler, SchedulerConfig};
use fairsim_tree::TimelineKind;

use crate::helpers::{completions, random_tasks, run_counts, schedule};

/// Random tasks with enough total time for every one of them to finish.
fn roomy_random_tasks(n: usize, seed: u64) -> TaskSet {
    let set = random_tasks(n, seed, 30, 12);
    TaskSet::new(set.total_time + 30, set.tasks().to_vec())
}

#[test]
fn test_every_task_completes_exactly_once() {
    for seed in 0..8 {
        let set = roomy_random_tasks(40, seed);
        for kind in TimelineKind::ALL {
            let results = run_scheduler(&set, kind).unwrap();
            let runs = run_counts(&results.ticks);
            let done = completions(&results.ticks);
            for spec in set.tasks() {
                assert_eq!(runs.get(&spec.id).copied().unwrap_or(0), spec.duration, "{} seed {}", kind, seed);
                let ticks = &done[&spec.id];
                assert_eq!(ticks.len(), 1, "{} completed {:?}", spec.id, ticks);

                let task = results.task(&spec.id).unwrap();
                assert_eq!(task.completed_at, Some(ticks[0]));
                assert_eq!(task.truntime, spec.duration);
                let last_run = results
                    .ticks
                    .iter()
                    .rev()
                    .find(|t| t.running.as_deref() == Some(spec.id.as_str()))
                    .map(|t| t.time);
                assert_eq!(last_run, Some(ticks[0]));
                assert!(task.actual_start_time.unwrap() >= spec.start_time);
            }
        }
    }
}

#[test]
fn test_no_task_runs_before_admission() {
    let set = roomy_random_tasks(25, 77);
    let results = run_scheduler(&set, TimelineKind::HeapTree).unwrap();
    for tick in &results.ticks {
        if let Some(id) = &tick.running {
            let spec = set.tasks().iter().find(|t| &t.id == id).unwrap();
            assert!(tick.time >= spec.start_time, "{} ran at {}", id, tick.time);
        }
    }
}

#[test]
fn test_identical_tasks_share_the_cpu_evenly() {
    for n in [2usize, 3, 5, 8] {
        let duration = 7;
        let tasks: Vec<TaskSpec> = (0..n).map(|i| TaskSpec::new(format!("t{}", i), 0, duration)).collect();
        let set = TaskSet::new(n as u64 * duration + 1, tasks);

        for kind in TimelineKind::ALL {
            let mut worst = 0;
            Scheduler::new(SchedulerConfig::with_timeline(kind))
                .run_with(&set, |_, tasks| {
                    let max = tasks.iter().map(|t| t.truntime).max().unwrap_or(0);
                    let min = tasks.iter().map(|t| t.truntime).min().unwrap_or(0);
                    worst = worst.max(max - min);
                })
                .unwrap();
            assert!(worst <= 1, "{} tasks on {}: spread {}", n, kind, worst);
        }
    }
}

#[test]
fn test_backends_produce_identical_schedules() {
    for seed in 100..106 {
        let set = roomy_random_tasks(30, seed);
        let reference = schedule(&run_scheduler(&set, TimelineKind::RedBlack).unwrap());
        for kind in TimelineKind::ALL {
            assert_eq!(
                schedule(&run_scheduler(&set, kind).unwrap()),
                reference,
                "{} diverged for seed {}",
                kind,
                seed
            );
        }
    }
}

#[test]
fn test_resident_count_matches_task_states() {
    let set = roomy_random_tasks(20, 5);
    let mut mismatches = Vec::new();
    Scheduler::default()
        .run_with(&set, |tick, tasks| {
            // After the tick, a task that completed this tick is no longer
            // resident but was counted.
            let resident = tasks
                .iter()
                .filter(|t| t.is_admitted() && t.completed_at.map_or(true, |c| c == tick.time))
                .count();
            if resident != tick.num_tasks {
                mismatches.push((tick.time, resident, tick.num_tasks));
            }
        })
        .unwrap();
    assert!(mismatches.is_empty(), "{:?}", mismatches);
}
