//! Plain-text task files.
//!
//! ```text
//! <num_tasks> <total_time>
//! <task_id> <start_time> <duration>
//! ...
//! ```

use std::fmt::Write as _;
use std::path::Path;

use rand::Rng;
use tracing::debug;

use crate::config::GeneratorConfig;
use crate::error::{CoreError, CoreResult};
use crate::task::{TaskSet, TaskSpec};

fn parse_number(field: Option<&str>, line: usize, what: &str) -> CoreResult<u64> {
    let raw = field.ok_or_else(|| CoreError::parse(line, format!("missing {}", what)))?;
    raw.parse()
        .map_err(|_| CoreError::parse(line, format!("{} {:?} is not a non-negative integer", what, raw)))
}

/// Parse the contents of a task file.
pub fn parse_tasks(data: &str) -> CoreResult<TaskSet> {
    let mut lines = data.lines().enumerate().map(|(i, l)| (i + 1, l.trim()));

    let (header_no, header) = lines
        .by_ref()
        .find(|(_, l)| !l.is_empty())
        .ok_or_else(|| CoreError::parse(1, "empty task file"))?;
    let mut fields = header.split_whitespace();
    let num_tasks = usize::try_from(parse_number(fields.next(), header_no, "task count")?)
        .map_err(|_| CoreError::parse(header_no, "task count does not fit in memory"))?;
    let total_time = parse_number(fields.next(), header_no, "total time")?;

    // The header count is only checked once the task lines have been read.
    let mut tasks = Vec::new();
    for (line_no, line) in lines {
        if tasks.len() == num_tasks {
            break;
        }
        if line.is_empty() {
            continue;
        }
        let mut fields = line.split_whitespace();
        let id = fields
            .next()
            .ok_or_else(|| CoreError::parse(line_no, "missing task id"))?;
        let start_time = parse_number(fields.next(), line_no, "start time")?;
        let duration = parse_number(fields.next(), line_no, "duration")?;
        if duration == 0 {
            return Err(CoreError::parse(line_no, format!("task {:?} has zero duration", id)));
        }
        tasks.push(TaskSpec::new(id, start_time, duration));
    }

    if tasks.len() != num_tasks {
        return Err(CoreError::parse(
            header_no,
            format!("header declares {} tasks but {} were found", num_tasks, tasks.len()),
        ));
    }

    debug!(num_tasks, total_time, "parsed task file");
    Ok(TaskSet::new(total_time, tasks))
}

/// Read and parse a task file from disk.
pub fn read_tasks(path: impl AsRef<Path>) -> CoreResult<TaskSet> {
    let data = std::fs::read_to_string(path.as_ref())?;
    parse_tasks(&data)
}

/// Serialize a task set in task-file format.
pub fn format_tasks(tasks: &TaskSet) -> String {
    let mut out = format!("{} {}\n", tasks.len(), tasks.total_time);
    for t in tasks.tasks() {
        let _ = writeln!(out, "{} {} {}", t.id, t.start_time, t.duration);
    }
    out
}

pub fn write_tasks(path: impl AsRef<Path>, tasks: &TaskSet) -> CoreResult<()> {
    std::fs::write(path.as_ref(), format_tasks(tasks))?;
    Ok(())
}

/// Generate `n` tasks with ids `t1..tn`, start times and durations drawn
/// uniformly from the configured inclusive ranges.
///
/// `total_time` is one tick past the total work, which is always enough for
/// every task to complete.
pub fn generate_tasks<R: Rng + ?Sized>(n: usize, config: &GeneratorConfig, rng: &mut R) -> TaskSet {
    let start_max = config.start_max.unwrap_or(config.start).max(config.start);
    let duration_max = config.duration_max.unwrap_or(config.duration).max(config.duration);

    let tasks: Vec<TaskSpec> = (1..=n)
        .map(|i| {
            let start = rng.gen_range(config.start..=start_max);
            let duration = rng.gen_range(config.duration..=duration_max);
            TaskSpec::new(format!("t{}", i), start, duration)
        })
        .collect();
    let total_work: u64 = tasks.iter().map(|t| t.duration).sum();
    TaskSet::new(total_work + 1, tasks)
}
