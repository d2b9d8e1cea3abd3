// Identifier generation for new tasks

use crate::models::TaskId;

/// Source of fresh task ids, injected into the store
pub trait IdGenerator {
    fn next_id(&mut self) -> TaskId;
}

/// Monotonic counter: "1", "2", "3", ...
///
/// Wraps to 0 after `u64::MAX`; the store skips any id still in use.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    next: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: u64) -> Self {
        Self { next: first }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> TaskId {
        let id = TaskId::from(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// Time-ordered UUID v7 ids
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self) -> TaskId {
        TaskId::from(uuid::Uuid::now_v7().to_string())
    }
}

impl<G: IdGenerator + ?Sized> IdGenerator for Box<G> {
    fn next_id(&mut self) -> TaskId {
        (**self).next_id()
    }
}
