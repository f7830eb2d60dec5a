//! Task identifier generation.
//!
//! The id source is injected into `AppState` rather than living in a global
//! counter, so tests can run with deterministic ids and nothing is shared
//! process-wide.

/// Hands out unique task identifiers, one per call.
pub trait IdSource {
    fn next_task_id(&mut self) -> String;
}

/// Production source: random v4 UUIDs, collision-free without coordination.
pub struct UuidIds;

impl IdSource for UuidIds {
    fn next_task_id(&mut self) -> String {
        format!("task-{}", uuid::Uuid::new_v4())
    }
}

/// Deterministic source for tests: `task-1`, `task-2`, …
#[allow(dead_code)] // constructed from unit tests only
pub struct SequentialIds {
    next: u32,
}

impl SequentialIds {
    #[allow(dead_code)]
    pub fn new() -> Self {
        SequentialIds { next: 1 }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdSource for SequentialIds {
    fn next_task_id(&mut self) -> String {
        let id = format!("task-{}", self.next);
        self.next += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_ids_count_up() {
        let mut ids = SequentialIds::new();
        assert_eq!(ids.next_task_id(), "task-1");
        assert_eq!(ids.next_task_id(), "task-2");
    }

    #[test]
    fn uuid_ids_are_unique() {
        let mut ids = UuidIds;
        assert_ne!(ids.next_task_id(), ids.next_task_id());
    }
}
