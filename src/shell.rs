// Line-oriented shell over a task store

use crate::form::TaskForm;
use crate::ids::IdGenerator;
use crate::models::{Priority, Task, TaskId};
use crate::store::TaskStore;
use clap::{Parser, Subcommand};
use colored::Colorize;
use eyre::{Context, Result, eyre};
use std::io::{BufRead, Write};
use tracing::debug;

#[derive(Parser, Debug)]
#[command(multicall = true)]
struct Line {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the summary and all tasks, highest priority first
    List,

    /// Show unfinished count and completion percentage
    Stats,

    /// Add a task
    Add {
        subject: String,
        description: String,
        /// Due date, YYYY-MM-DD or DD/MM/YYYY
        due: String,
        /// Low, Medium or High
        priority: Option<String>,
    },

    /// Edit a task with field=value pairs (subject, description, priority, due)
    Edit {
        id: String,
        #[arg(required = true)]
        fields: Vec<String>,
    },

    /// Mark a task complete, or active again
    Toggle { id: String },

    /// Delete a task
    Delete { id: String },

    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

/// Whether the shell should keep reading input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Shell<G> {
    store: TaskStore<G>,
}

impl<G: IdGenerator> Shell<G> {
    pub fn new(store: TaskStore<G>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &TaskStore<G> {
        &self.store
    }

    /// Read commands until end of input or `quit`
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut out: W) -> Result<()> {
        write!(out, "> ")?;
        out.flush()?;

        for line in input.lines() {
            let line = line.context("Failed to read command")?;
            if self.execute(&line, &mut out)? == Flow::Quit {
                return Ok(());
            }
            write!(out, "> ")?;
            out.flush()?;
        }

        writeln!(out)?;
        Ok(())
    }

    /// Run a single command line, writing any response to `out`
    pub fn execute<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Flow> {
        let tokens = match tokenize(line) {
            Ok(tokens) => tokens,
            Err(e) => {
                writeln!(out, "error: {}", e)?;
                return Ok(Flow::Continue);
            }
        };
        if tokens.is_empty() {
            return Ok(Flow::Continue);
        }

        let command = match Line::try_parse_from(&tokens) {
            Ok(parsed) => parsed.command,
            Err(e) => {
                write!(out, "{}", e.render())?;
                return Ok(Flow::Continue);
            }
        };
        debug!(?command, "execute: parsed");

        match command {
            Command::List => self.list(out)?,
            Command::Stats => writeln!(out, "{}", self.store.stats())?,
            Command::Add {
                subject,
                description,
                due,
                priority,
            } => {
                let form = TaskForm::create().subject(subject).description(description).due_date(due);
                let result = match priority {
                    Some(text) => form.priority_text(&text).and_then(|form| form.submit(&mut self.store)),
                    None => form.submit(&mut self.store),
                };
                match result {
                    Ok(id) => writeln!(out, "added {}", id)?,
                    Err(e) => writeln!(out, "error: {}", e)?,
                }
            }
            Command::Edit { id, fields } => self.edit(TaskId::new(id), &fields, out)?,
            Command::Toggle { id } => {
                let id = TaskId::new(id);
                if self.store.toggle_complete(&id) {
                    let done = self.store.get(&id).is_some_and(|t| t.is_completed);
                    writeln!(out, "{} {}", id, if done { "completed" } else { "active" })?;
                }
            }
            Command::Delete { id } => {
                let id = TaskId::new(id);
                if self.store.delete(&id) {
                    writeln!(out, "deleted {}", id)?;
                }
            }
            Command::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    fn list<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "{}", self.store.stats())?;
        for task in self.store.sorted_by_priority() {
            writeln!(out, "{}", render_task(task))?;
        }
        Ok(())
    }

    fn edit<W: Write>(&mut self, id: TaskId, fields: &[String], out: &mut W) -> Result<()> {
        // Unknown ids are ignored like every other store mutation
        let Some(task) = self.store.get(&id) else {
            debug!(id = %id, "edit: no such task");
            return Ok(());
        };

        let mut form = TaskForm::update(task);
        for pair in fields {
            let Some((key, value)) = pair.split_once('=') else {
                writeln!(out, "error: expected field=value, got {:?}", pair)?;
                return Ok(());
            };
            form = match key {
                "subject" => form.subject(value),
                "description" => form.description(value),
                "due" => form.due_date(value),
                "priority" => match form.priority_text(value) {
                    Ok(form) => form,
                    Err(e) => {
                        writeln!(out, "error: {}", e)?;
                        return Ok(());
                    }
                },
                other => {
                    writeln!(out, "error: unknown field {:?}", other)?;
                    return Ok(());
                }
            };
        }

        match form.submit(&mut self.store) {
            Ok(id) => writeln!(out, "updated {}", id)?,
            Err(e) => writeln!(out, "error: {}", e)?,
        }
        Ok(())
    }
}

fn render_task(task: &Task) -> String {
    let mark = if task.is_completed {
        "[x]".green().to_string()
    } else {
        "[ ]".normal().to_string()
    };
    let priority = format!("{:<6}", task.priority);
    let priority = match task.priority {
        Priority::High => priority.red().bold(),
        _ => priority.green(),
    };

    format!(
        "{} {:>4}  {}  {}: {}  (due {})",
        mark, task.id, priority, task.subject, task.description, task.due_date
    )
}

/// Split a command line into words, honoring shell-style quotes
fn tokenize(line: &str) -> Result<Vec<String>> {
    shlex::split(line).ok_or_else(|| eyre!("unterminated quote"))
}
