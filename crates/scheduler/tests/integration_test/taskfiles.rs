use fairsim_core::{format_tasks, parse_tasks, read_tasks, write_tasks};
use fairsim_scheduler::run_scheduler;
use fairsim_tree::TimelineKind;
use tempfile::TempDir;

use crate::helpers::{random_tasks, schedule};

#[test]
fn test_task_file_round_trip_preserves_schedule() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tasks.txt");

    let set = random_tasks(16, 42, 10, 8);
    write_tasks(&path, &set).unwrap();
    let loaded = read_tasks(&path).unwrap();
    assert_eq!(loaded, set);

    let before = schedule(&run_scheduler(&set, TimelineKind::Bst).unwrap());
    let after = schedule(&run_scheduler(&loaded, TimelineKind::Bst).unwrap());
    assert_eq!(before, after);
}

#[test]
fn test_generated_file_text_parses_back() {
    let set = random_tasks(64, 9, 0, 10);
    let text = format_tasks(&set);
    assert!(text.starts_with(&format!("64 {}\n", set.total_time)));
    assert_eq!(parse_tasks(&text).unwrap(), set);

    // Everyone starts at 0, so the generated total time is always enough.
    let results = run_scheduler(&set, TimelineKind::HeapArray).unwrap();
    assert_eq!(results.summary.completed, 64);
}
