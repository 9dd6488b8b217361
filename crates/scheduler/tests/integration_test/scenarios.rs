use fairsim_scheduler::{run_scheduler, Scheduler, SchedulerConfig};
use fairsim_tree::TimelineKind;

use crate::helpers::{schedule, task_set};

#[test]
fn test_two_tasks_same_schedule_on_every_backend() {
    let set = task_set(21, &[("A", 1, 10), ("B", 1, 10)]);
    let expected: Vec<&str> = "- A B B A A B B A A B B A A B B A A B B A"
        .split(' ')
        .collect();

    for kind in TimelineKind::ALL {
        let results = run_scheduler(&set, kind).unwrap();
        assert_eq!(schedule(&results), expected, "backend {}", kind);
        assert_eq!(results.task("B").unwrap().completed_at, Some(19), "backend {}", kind);
        assert_eq!(results.task("A").unwrap().completed_at, Some(20), "backend {}", kind);
    }
}

#[test]
fn test_single_task_runs_to_completion() {
    let set = task_set(6, &[("solo", 0, 4)]);
    let results = run_scheduler(&set, TimelineKind::RedBlack).unwrap();
    assert_eq!(schedule(&results), vec!["solo", "solo", "solo", "solo", "-", "-"]);
    assert_eq!(results.task("solo").unwrap().completed_at, Some(3));
    assert_eq!(results.summary.context_switches, 0);
}

#[test]
fn test_staggered_arrivals() {
    let set = task_set(40, &[("a", 0, 6), ("b", 2, 6), ("c", 4, 6)]);
    for kind in TimelineKind::ALL {
        let results = run_scheduler(&set, kind).unwrap();
        assert_eq!(results.summary.completed, 3, "backend {}", kind);
        // CPU never idles while work remains: 18 units, first 18 ticks busy.
        assert!(results.ticks[..18].iter().all(|t| t.running.is_some()), "backend {}", kind);
        assert!(results.ticks[18..].iter().all(|t| t.running.is_none()), "backend {}", kind);
    }
}

#[test]
fn test_backends_agree_on_mixed_workload() {
    let set = task_set(
        80,
        &[("p", 0, 9), ("q", 0, 3), ("r", 3, 12), ("s", 7, 1), ("t", 7, 5), ("u", 20, 8)],
    );
    let reference = schedule(&run_scheduler(&set, TimelineKind::RedBlack).unwrap());
    for kind in TimelineKind::ALL {
        let results = Scheduler::new(SchedulerConfig {
            timeline: kind,
            verify_invariants: true,
            ..SchedulerConfig::default()
        })
        .run(&set)
        .unwrap();
        assert_eq!(schedule(&results), reference, "backend {}", kind);
    }
}

#[test]
fn test_results_serialize_to_json() {
    let set = task_set(21, &[("A", 1, 10), ("B", 1, 10)]);
    let results = run_scheduler(&set, TimelineKind::HeapArray).unwrap();
    let json = results.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["timeline"], "heaparray");
    assert_eq!(value["heap_type"], "min");
    assert_eq!(value["ticks"].as_array().unwrap().len(), 21);
    assert_eq!(value["summary"]["completed"], 2);
}
