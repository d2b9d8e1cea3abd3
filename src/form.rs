// Create/update form: raw field input validated before it reaches the store

use crate::ids::IdGenerator;
use crate::models::{NewTask, Priority, Task, TaskId};
use crate::store::TaskStore;
use chrono::NaiveDate;
use thiserror::Error;
use tracing::debug;

/// Canonical due date format
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Day-first format accepted from date entry and normalized to ISO
const DAY_FIRST_FORMAT: &str = "%d/%m/%Y";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("please fill in the {0} field")]
    MissingField(Field),

    #[error("invalid due date {0:?}, expected YYYY-MM-DD or DD/MM/YYYY")]
    InvalidDueDate(String),

    #[error("invalid priority {0:?}, expected Low, Medium or High")]
    InvalidPriority(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Subject,
    Description,
    DueDate,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::Subject => write!(f, "subject"),
            Field::Description => write!(f, "description"),
            Field::DueDate => write!(f, "due date"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    /// Editing an existing task; id and completion flag carry over on submit
    Update(Task),
}

/// Transient field values for one create or edit interaction
#[derive(Debug, Clone)]
pub struct TaskForm {
    mode: FormMode,
    pub subject: String,
    pub description: String,
    pub priority: Priority,
    pub due_date: String,
}

impl TaskForm {
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            subject: String::new(),
            description: String::new(),
            priority: Priority::default(),
            due_date: String::new(),
        }
    }

    /// Form pre-filled from an existing task
    pub fn update(task: &Task) -> Self {
        Self {
            mode: FormMode::Update(task.clone()),
            subject: task.subject.clone(),
            description: task.description.clone(),
            priority: task.priority,
            due_date: task.due_date.format(DATE_FORMAT).to_string(),
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = due_date.into();
        self
    }

    /// Set the priority from its name, as typed by the user
    pub fn priority_text(self, text: &str) -> Result<Self, ValidationError> {
        let priority = Priority::parse(text).ok_or_else(|| ValidationError::InvalidPriority(text.to_string()))?;
        Ok(self.priority(priority))
    }

    /// Check the fields and produce the structured input for the store
    pub fn validate(&self) -> Result<NewTask, ValidationError> {
        let subject = required(&self.subject, Field::Subject)?;
        let description = required(&self.description, Field::Description)?;
        let due_date = parse_due_date(required(&self.due_date, Field::DueDate)?)?;

        Ok(NewTask {
            subject: subject.to_string(),
            description: description.to_string(),
            priority: self.priority,
            due_date,
        })
    }

    /// Validate, then add or edit depending on the form mode
    ///
    /// Nothing is written to the store when validation fails.
    pub fn submit<G: IdGenerator>(self, store: &mut TaskStore<G>) -> Result<TaskId, ValidationError> {
        let input = self.validate()?;

        match self.mode {
            FormMode::Create => Ok(store.add(input)),
            FormMode::Update(original) => {
                let updated = Task {
                    id: original.id,
                    subject: input.subject,
                    description: input.description,
                    priority: input.priority,
                    due_date: input.due_date,
                    is_completed: original.is_completed,
                };
                let id = updated.id.clone();
                if !store.edit(updated) {
                    debug!(id = %id, "submit: task vanished before update");
                }
                Ok(id)
            }
        }
    }
}

fn required(value: &str, field: Field) -> Result<&str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(trimmed)
}

/// Parse a due date, accepting ISO or day-first input
pub fn parse_due_date(text: &str) -> Result<NaiveDate, ValidationError> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(text, DAY_FIRST_FORMAT))
        .map_err(|_| ValidationError::InvalidDueDate(text.to_string()))
}
