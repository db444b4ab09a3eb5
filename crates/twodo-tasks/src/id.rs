/*
[INPUT]:  Wall clock readings and the highest id already in use
[OUTPUT]: Fresh, strictly increasing task ids
[POS]:    Id allocation for TaskStore
[UPDATE]: When changing id derivation
*/

use crate::task::TaskId;

/// Source of millisecond timestamps.
pub trait Clock: Send {
    fn now_millis(&self) -> i64;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Clock-derived id allocator.
///
/// Ids follow the wall clock but never repeat: two allocations within the
/// same millisecond, or a clock that steps backwards, still yield
/// `last + 1`.
#[derive(Debug, Default, Clone)]
pub struct IdGenerator {
    last: Option<TaskId>,
}

impl IdGenerator {
    /// Seed the generator so it never hands out an id at or below `max_in_use`.
    pub fn seeded(max_in_use: Option<TaskId>) -> Self {
        Self { last: max_in_use }
    }

    /// Next id, or `None` once `last` sits at `TaskId::MAX`.
    pub fn next(&mut self, now_millis: i64) -> Option<TaskId> {
        let id = match self.last {
            Some(last) if now_millis <= last => last.checked_add(1)?,
            _ => now_millis,
        };
        self.last = Some(id);
        Some(id)
    }

    pub fn last(&self) -> Option<TaskId> {
        self.last
    }
}
