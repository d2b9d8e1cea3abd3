// Startup fixtures for the task store

use crate::models::{Priority, Task, TaskId};
use chrono::NaiveDate;
use eyre::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{info, warn};

/// Built-in sample tasks shown when no fixture is given
pub fn builtin() -> Vec<Task> {
    let sample = [
        ("a1", "Submit assignment", "Upload the report before midnight", Priority::High, (2024, 10, 25), false),
        ("a2", "Groceries", "Eggs, bread and coffee", Priority::Low, (2024, 10, 21), false),
        ("a3", "Dentist", "Call to confirm the appointment", Priority::Medium, (2024, 10, 22), true),
        ("a4", "Team meeting", "Prepare the sprint summary", Priority::High, (2024, 10, 23), false),
        ("a5", "Laundry", "Wash and fold", Priority::Low, (2024, 10, 20), true),
    ];

    sample
        .into_iter()
        .filter_map(|(id, subject, description, priority, (y, m, d), done)| {
            Some(Task {
                id: TaskId::new(id),
                subject: subject.to_string(),
                description: description.to_string(),
                priority,
                due_date: NaiveDate::from_ymd_opt(y, m, d)?,
                is_completed: done,
            })
        })
        .collect()
}

/// Read tasks from a JSONL fixture, one task object per line
///
/// Blank lines are ignored. Lines that fail to parse are skipped with a
/// warning so one bad entry does not discard the whole fixture.
pub fn load_jsonl(path: &Path) -> Result<Vec<Task>> {
    let file = File::open(path).with_context(|| format!("Failed to open seed file {}", path.display()))?;
    let reader = BufReader::new(file);
    let mut tasks = Vec::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                warn!(
                    file = ?path,
                    line = line_num + 1,
                    error = ?e,
                    "Failed to read line, skipping"
                );
                continue;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<Task>(&line) {
            Ok(task) => tasks.push(task),
            Err(e) => {
                warn!(
                    file = ?path,
                    line = line_num + 1,
                    error = ?e,
                    "Failed to parse task, skipping"
                );
            }
        }
    }

    info!(file = ?path, count = tasks.len(), "Loaded seed tasks");

    Ok(tasks)
}
