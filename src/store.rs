// In-memory task store with priority and completion views

use crate::ids::{IdGenerator, SequentialIds};
use crate::models::{NewTask, Task, TaskId};
use crate::stats::Stats;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Session-scoped collection of tasks, unique by id
///
/// Tasks are kept in the order they were added. That order carries no meaning
/// beyond breaking ties in [`TaskStore::sorted_by_priority`].
pub struct TaskStore<G = SequentialIds> {
    tasks: Vec<Task>,
    ids: G,
}

impl TaskStore<SequentialIds> {
    /// Create an empty store with sequential ids
    pub fn new() -> Self {
        Self::with_generator(SequentialIds::new())
    }
}

impl Default for TaskStore<SequentialIds> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: IdGenerator> TaskStore<G> {
    /// Create an empty store using the given id generator
    pub fn with_generator(ids: G) -> Self {
        Self { tasks: Vec::new(), ids }
    }

    /// Create a store pre-populated with existing tasks
    ///
    /// If the seed repeats an id, the first occurrence wins and the rest are
    /// dropped with a warning.
    pub fn with_seed(ids: G, seed: impl IntoIterator<Item = Task>) -> Self {
        let mut seen = HashSet::new();
        let mut tasks = Vec::new();

        for task in seed {
            if !seen.insert(task.id.clone()) {
                warn!(id = %task.id, "Duplicate id in seed, skipping");
                continue;
            }
            tasks.push(task);
        }

        info!(count = tasks.len(), "Seeded task store");
        Self { tasks, ids }
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Append a new active task and return its id
    pub fn add(&mut self, input: NewTask) -> TaskId {
        let id = self.fresh_id();
        debug!(id = %id, subject = %input.subject, priority = %input.priority, "add: called");

        self.tasks.push(input.into_task(id.clone()));
        id
    }

    /// Replace the task with the same id; returns false if there was none
    pub fn edit(&mut self, updated: Task) -> bool {
        match self.position(&updated.id) {
            Some(index) => {
                debug!(id = %updated.id, "edit: replacing task");
                self.tasks[index] = updated;
                true
            }
            None => {
                debug!(id = %updated.id, "edit: no such task, ignoring");
                false
            }
        }
    }

    /// Remove a task permanently; returns false if there was none
    pub fn delete(&mut self, id: &TaskId) -> bool {
        match self.position(id) {
            Some(index) => {
                self.tasks.remove(index);
                debug!(id = %id, "delete: removed task");
                true
            }
            None => {
                debug!(id = %id, "delete: no such task, ignoring");
                false
            }
        }
    }

    /// Flip the completion flag; returns false if there was no such task
    pub fn toggle_complete(&mut self, id: &TaskId) -> bool {
        match self.tasks.iter_mut().find(|task| &task.id == id) {
            Some(task) => {
                task.is_completed = !task.is_completed;
                debug!(id = %id, completed = task.is_completed, "toggle_complete: flipped");
                true
            }
            None => {
                debug!(id = %id, "toggle_complete: no such task, ignoring");
                false
            }
        }
    }

    fn fresh_id(&mut self) -> TaskId {
        loop {
            let id = self.ids.next_id();
            if !self.contains(&id) {
                return id;
            }
            debug!(id = %id, "Generated id already in use, drawing another");
        }
    }
}

impl<G> TaskStore<G> {
    // ========================================================================
    // Queries
    // ========================================================================

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    pub fn contains(&self, id: &TaskId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Tasks in store order
    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    /// All tasks, highest priority first
    ///
    /// The sort is stable: tasks of equal priority keep their store order.
    /// The store itself is not reordered.
    pub fn sorted_by_priority(&self) -> Vec<&Task> {
        let mut sorted: Vec<&Task> = self.tasks.iter().collect();
        sorted.sort_by_key(|task| std::cmp::Reverse(task.priority.rank()));
        sorted
    }

    pub fn stats(&self) -> Stats {
        Stats::from_tasks(&self.tasks)
    }

    fn position(&self, id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| &task.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::UuidIds;
    use crate::models::Priority;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn new_task(subject: &str, priority: Priority) -> NewTask {
        NewTask {
            subject: subject.to_string(),
            description: format!("{} description", subject),
            priority,
            due_date: date("2024-01-10"),
        }
    }

    fn seeded(id: &str, priority: Priority, done: bool) -> Task {
        Task {
            id: TaskId::new(id),
            subject: format!("Task {}", id),
            description: "desc".to_string(),
            priority,
            due_date: date("2024-02-01"),
            is_completed: done,
        }
    }

    fn ids_of(tasks: &[&Task]) -> Vec<String> {
        tasks.iter().map(|t| t.id.to_string()).collect()
    }

    #[test]
    fn test_add_to_empty_store() {
        let mut store = TaskStore::new();

        let id = store.add(NewTask {
            subject: "Buy milk".to_string(),
            description: "2%".to_string(),
            priority: Priority::Low,
            due_date: date("2024-01-10"),
        });

        assert_eq!(store.len(), 1);
        let task = store.get(&id).unwrap();
        assert_eq!(task.subject, "Buy milk");
        assert_eq!(task.due_date, date("2024-01-10"));
        assert!(!task.is_completed);

        let stats = store.stats();
        assert_eq!(stats.completed, 0);
        assert_eq!(stats.unfinished, 1);
        assert_eq!(stats.completion_percentage_rounded(), 0.0);
    }

    #[test]
    fn test_add_generates_unique_ids() {
        let mut store = TaskStore::new();
        for i in 0..50 {
            store.add(new_task(&format!("t{}", i), Priority::Low));
        }

        let unique: HashSet<&TaskId> = store.iter().map(|t| &t.id).collect();
        assert_eq!(unique.len(), 50);
    }

    #[test]
    fn test_add_skips_ids_taken_by_seed() {
        let seed = vec![seeded("1", Priority::Low, false), seeded("2", Priority::Low, false)];
        let mut store = TaskStore::with_seed(SequentialIds::new(), seed);

        let id = store.add(new_task("fresh", Priority::High));
        assert_eq!(id.as_str(), "3");

        let unique: HashSet<&TaskId> = store.iter().map(|t| &t.id).collect();
        assert_eq!(unique.len(), 3);
    }

    #[test]
    fn test_add_with_uuid_ids() {
        let mut store = TaskStore::with_generator(UuidIds);
        let a = store.add(new_task("a", Priority::Low));
        let b = store.add(new_task("b", Priority::Low));

        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 36);
    }

    #[test]
    fn test_seed_duplicates_keep_first() {
        let mut dup = seeded("a", Priority::High, true);
        dup.subject = "Second".to_string();
        let seed = vec![seeded("a", Priority::Low, false), dup, seeded("b", Priority::Low, false)];

        let store = TaskStore::with_seed(SequentialIds::new(), seed);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(&TaskId::new("a")).unwrap().subject, "Task a");
    }

    #[test]
    fn test_sorted_by_priority() {
        let seed = vec![
            seeded("a", Priority::Low, false),
            seeded("b", Priority::High, true),
        ];
        let store = TaskStore::with_seed(SequentialIds::new(), seed);

        assert_eq!(ids_of(&store.sorted_by_priority()), vec!["b", "a"]);

        let stats = store.stats();
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.unfinished, 1);
        assert_eq!(format!("{:.2}", stats.completion_percentage_rounded()), "50.00");
    }

    #[test]
    fn test_sorted_by_priority_is_stable() {
        let seed = vec![
            seeded("l1", Priority::Low, false),
            seeded("m1", Priority::Medium, false),
            seeded("h1", Priority::High, false),
            seeded("l2", Priority::Low, true),
            seeded("h2", Priority::High, false),
            seeded("m2", Priority::Medium, true),
            seeded("l3", Priority::Low, false),
        ];
        let store = TaskStore::with_seed(SequentialIds::new(), seed);

        let sorted = store.sorted_by_priority();
        assert_eq!(ids_of(&sorted), vec!["h1", "h2", "m1", "m2", "l1", "l2", "l3"]);
        assert!(sorted.windows(2).all(|w| w[0].priority.rank() >= w[1].priority.rank()));

        // View only, store order untouched
        let order: Vec<&str> = store.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(order, vec!["l1", "m1", "h1", "l2", "h2", "m2", "l3"]);
    }

    #[test]
    fn test_sort_ties_follow_current_store_order() {
        let mut store = TaskStore::new();
        let a = store.add(new_task("a", Priority::Medium));
        let b = store.add(new_task("b", Priority::Medium));
        store.delete(&a);
        let c = store.add(new_task("c", Priority::Medium));

        let sorted: Vec<&TaskId> = store.sorted_by_priority().into_iter().map(|t| &t.id).collect();
        assert_eq!(sorted, vec![&b, &c]);
    }

    #[test]
    fn test_toggle_complete_twice() {
        let seed = vec![seeded("5", Priority::Medium, false)];
        let mut store = TaskStore::with_seed(SequentialIds::new(), seed);
        let id = TaskId::from(5u64);
        let before = store.get(&id).unwrap().clone();

        assert!(store.toggle_complete(&id));
        assert!(store.get(&id).unwrap().is_completed);

        assert!(store.toggle_complete(&id));
        assert_eq!(store.get(&id).unwrap(), &before);
    }

    #[test]
    fn test_toggle_complete_missing_id() {
        let mut store = TaskStore::new();
        store.add(new_task("a", Priority::Low));

        assert!(!store.toggle_complete(&TaskId::new("nope")));
        assert_eq!(store.stats().completed, 0);
    }

    #[test]
    fn test_edit_replaces_entire_task() {
        let mut store = TaskStore::new();
        let id = store.add(new_task("original", Priority::Low));

        let replacement = Task {
            id: id.clone(),
            subject: "changed".to_string(),
            description: "new description".to_string(),
            priority: Priority::High,
            due_date: date("2025-12-31"),
            is_completed: true,
        };

        assert!(store.edit(replacement.clone()));
        assert_eq!(store.get(&id).unwrap(), &replacement);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_edit_missing_id_is_noop() {
        let mut store = TaskStore::new();
        store.add(new_task("a", Priority::Low));

        let stray = seeded("ghost", Priority::High, true);
        assert!(!store.edit(stray));
        assert_eq!(store.len(), 1);
        assert!(!store.contains(&TaskId::new("ghost")));
    }

    #[test]
    fn test_delete_twice() {
        let seed = vec![seeded("9", Priority::Low, false), seeded("10", Priority::High, true)];
        let mut store = TaskStore::with_seed(SequentialIds::new(), seed);
        let id = TaskId::from(9u64);

        assert!(store.delete(&id));
        assert_eq!(store.len(), 1);

        assert!(!store.delete(&id));
        assert_eq!(store.len(), 1);
        assert!(store.sorted_by_priority().iter().all(|t| t.id != id));

        let stats = store.stats();
        assert_eq!(stats.total(), 1);
        assert_eq!(stats.completed, 1);
    }

    #[test]
    fn test_stats_track_mutations() {
        let mut store = TaskStore::new();
        let ids: Vec<TaskId> = (0..3).map(|i| store.add(new_task(&i.to_string(), Priority::Low))).collect();

        store.toggle_complete(&ids[0]);
        let stats = store.stats();
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.unfinished, 2);
        assert_eq!(stats.completion_percentage_rounded(), 33.33);

        store.toggle_complete(&ids[1]);
        assert_eq!(store.stats().completion_percentage_rounded(), 66.67);

        store.delete(&ids[2]);
        assert_eq!(store.stats().completion_percentage_rounded(), 100.0);
    }
}
