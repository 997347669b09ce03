//! Task domain model.
//!
//! # Responsibility
//! - Define the immutable task record and its to-do/deadline variants.
//! - Define the ordered list that owns tasks for one session.
//!
//! # Invariants
//! - Tasks are values; every change produces a new `Task`.
//! - `TaskList` never assigns or rewrites ids on its own.

pub mod task;
pub mod task_list;
