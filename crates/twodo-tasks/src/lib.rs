/*
[INPUT]:  Task model, store, view pipeline and storage modules
[OUTPUT]: Public twodo-tasks crate surface
[POS]:    Crate root - task collection engine
[UPDATE]: When adding new modules or public exports
*/

pub mod id;
pub mod storage;
pub mod store;
pub mod task;
pub mod view;

// Re-export main types for convenience
pub use id::{Clock, IdGenerator, SystemClock};
pub use storage::{JsonFileRepository, MemoryRepository, StorageError, TaskRepository};
pub use store::{TaskStore, UpdatePolicy};
pub use task::{Priority, Task, TaskId, TaskStatus};
pub use view::{StatusFilter, ViewState, ViewSummary, summarize, visible_tasks};
