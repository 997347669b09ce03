//! Repository layer for task persistence.
//!
//! # Responsibility
//! - Define the load/save contract used by the service layer.
//! - Keep SQLite query details out of the model and service.
//!
//! # Invariants
//! - Persisted rows go through task constructors on read; invalid rows are
//!   reported, never masked.

pub mod task_repo;
