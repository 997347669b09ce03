//! Task use-case services.
//!
//! # Responsibility
//! - Orchestrate model and repository calls into CLI-level operations.
//! - Keep the CLI decoupled from storage details.

pub mod task_service;
