use std::collections::HashMap;

use fairsim_core::{generate_tasks, GeneratorConfig, TaskSet, TaskSpec};
use fairsim_scheduler::{SchedulerResults, TickRecord};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Build a task set from `(id, start, duration)` triples.
pub fn task_set(total_time: u64, tasks: &[(&str, u64, u64)]) -> TaskSet {
    TaskSet::new(
        total_time,
        tasks
            .iter()
            .map(|&(id, start, duration)| TaskSpec::new(id, start, duration))
            .collect(),
    )
}

/// Deterministic random task set.
pub fn random_tasks(n: usize, seed: u64, start_max: u64, duration_max: u64) -> TaskSet {
    let config = GeneratorConfig {
        start: 0,
        start_max: Some(start_max),
        duration: 1,
        duration_max: Some(duration_max),
        seed: Some(seed),
    };
    let mut rng = StdRng::seed_from_u64(seed);
    generate_tasks(n, &config, &mut rng)
}

/// Running task per tick, `-` when idle.
pub fn schedule(results: &SchedulerResults) -> Vec<String> {
    results
        .ticks
        .iter()
        .map(|t| t.running.clone().unwrap_or_else(|| "-".to_string()))
        .collect()
}

/// Number of ticks each task was running.
pub fn run_counts(ticks: &[TickRecord]) -> HashMap<String, u64> {
    let mut counts = HashMap::new();
    for tick in ticks {
        if let Some(id) = &tick.running {
            *counts.entry(id.clone()).or_default() += 1;
        }
    }
    counts
}

/// Ticks on which each task was reported completed.
pub fn completions(ticks: &[TickRecord]) -> HashMap<String, Vec<u64>> {
    let mut done: HashMap<String, Vec<u64>> = HashMap::new();
    for tick in ticks.iter().filter(|t| t.completed) {
        if let Some(id) = &tick.running {
            done.entry(id.clone()).or_default().push(tick.time);
        }
    }
    done
}
