//! Core domain logic for the Duke task tracker.
//! This crate owns the task invariants; the CLI is a thin shell around it.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{
    format_due_at, parse_due_at, Task, TaskError, TaskId, TaskKind, DONE_SYMBOL, PENDING_SYMBOL,
};
pub use model::task_list::TaskList;
pub use repo::task_repo::{RepoError, RepoResult, SqliteTaskRepository, TaskRepository};
pub use service::task_service::{ServiceError, ServiceResult, TaskService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
