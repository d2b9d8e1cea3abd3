// Completion statistics over a set of tasks

use crate::models::Task;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stats {
    pub completed: usize,
    pub unfinished: usize,
}

impl Stats {
    pub fn from_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        let (completed, total) = tasks.into_iter().fold((0, 0), |(done, total), task| {
            (done + usize::from(task.is_completed), total + 1)
        });

        Self {
            completed,
            unfinished: total - completed,
        }
    }

    pub fn total(&self) -> usize {
        self.completed + self.unfinished
    }

    /// Unrounded percentage of completed tasks, 0 for an empty store
    pub fn completion_percentage(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.completed as f64 / total as f64 * 100.0,
        }
    }

    /// Percentage rounded half-up to two decimals
    ///
    /// Rounded in integer hundredths of a percent so exact ties go up.
    pub fn completion_percentage_rounded(&self) -> f64 {
        self.completion_hundredths() as f64 / 100.0
    }

    /// Completion in hundredths of a percent, rounded half-up
    pub fn completion_hundredths(&self) -> u64 {
        match self.total() as u64 {
            0 => 0,
            total => (20_000 * self.completed as u64 + total) / (2 * total),
        }
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Assigned Tasks: {}\nCompleted (%): {:.2}%",
            self.unfinished,
            self.completion_percentage_rounded()
        )
    }
}
