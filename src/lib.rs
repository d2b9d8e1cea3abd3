// todostore - In-memory to-do tracking with priority views and completion stats

pub mod form;
pub mod ids;
pub mod models;
pub mod seed;
pub mod shell;
pub mod stats;
pub mod store;

// Re-export main types for convenience
pub use form::{Field, FormMode, TaskForm, ValidationError};
pub use ids::{IdGenerator, SequentialIds, UuidIds};
pub use models::{NewTask, Priority, Task, TaskId, TaskState};
pub use shell::Shell;
pub use stats::Stats;
pub use store::TaskStore;
