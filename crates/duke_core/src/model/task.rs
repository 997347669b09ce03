//! Task domain model.
//!
//! # Responsibility
//! - Define the immutable task record shared by to-do and deadline variants.
//! - Own the bit-exact display format printed by the CLI.
//! - Parse and format deadline date-times.
//!
//! # Invariants
//! - `id` is always positive and `name` is never blank.
//! - A `Task` is never mutated in place; completion and renumbering return
//!   new values.
//! - `done` only ever moves from `false` to `true`.

use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Caller-assigned task identifier. `0` is never a valid id.
pub type TaskId = u32;

/// Status glyph rendered for completed tasks.
pub const DONE_SYMBOL: &str = "[X]";
/// Status glyph rendered for pending tasks.
pub const PENDING_SYMBOL: &str = "[ ]";

/// Accepted textual deadline formats, tried in order.
///
/// Mirrors ISO-8601 local date-time: minutes are required, seconds and
/// fractional seconds are optional.
const DUE_AT_INPUT_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S%.f"];
/// Fixed-width shape checked before chrono, which accepts short fields, a
/// signed year and leap seconds.
static DUE_AT_SHAPE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}(?::[0-5][0-9](?:\.[0-9]{1,9})?)?$")
        .expect("valid due_at shape regex")
});
/// Display format for deadlines, e.g. `Dec 2 2019 18:00`.
const DUE_AT_DISPLAY_FORMAT: &str = "%b %-d %Y %H:%M";

/// Errors raised by task construction and task list lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// User input could not form a valid task (bad date-time, blank name,
    /// zero id). Recoverable: report and re-prompt.
    InvalidTaskArgument(String),
    /// No task in the list carries the requested id.
    TaskNotFound(TaskId),
}

impl Display for TaskError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTaskArgument(message) => write!(f, "invalid task argument: {message}"),
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
        }
    }
}

impl Error for TaskError {}

/// Variant payload of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TaskKind {
    /// Plain to-do without a temporal attribute.
    #[serde(rename = "todo")]
    ToDo,
    /// Task bound to a local due date-time.
    Deadline { due_at: NaiveDateTime },
}

impl TaskKind {
    /// Single-letter marker shown in the rendered form.
    pub fn marker(self) -> char {
        match self {
            Self::ToDo => 'T',
            Self::Deadline { .. } => 'D',
        }
    }
}

/// Immutable unit of work.
///
/// Fields are private so every instance passes constructor validation.
/// Deserialization goes through the same checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TaskRecord")]
pub struct Task {
    id: TaskId,
    name: String,
    done: bool,
    #[serde(flatten)]
    kind: TaskKind,
}

/// Unvalidated wire shape used for deserialization.
#[derive(Deserialize)]
struct TaskRecord {
    id: TaskId,
    name: String,
    done: bool,
    #[serde(flatten)]
    kind: TaskKind,
}

impl TryFrom<TaskRecord> for Task {
    type Error = TaskError;

    fn try_from(value: TaskRecord) -> Result<Self, Self::Error> {
        Self::build(value.id, value.name, value.kind, value.done)
    }
}

impl Task {
    /// Creates a to-do task.
    ///
    /// # Errors
    /// - `InvalidTaskArgument` when `id` is zero or `name` is blank.
    pub fn todo(id: TaskId, name: impl Into<String>, done: bool) -> Result<Self, TaskError> {
        Self::build(id, name.into(), TaskKind::ToDo, done)
    }

    /// Creates a deadline task from a structured date-time.
    ///
    /// # Errors
    /// - `InvalidTaskArgument` when `id` is zero or `name` is blank.
    pub fn deadline(
        id: TaskId,
        name: impl Into<String>,
        due_at: NaiveDateTime,
        done: bool,
    ) -> Result<Self, TaskError> {
        Self::build(id, name.into(), TaskKind::Deadline { due_at }, done)
    }

    /// Creates a deadline task from ISO local date-time text such as
    /// `2019-12-02T18:00` or `2019-12-02T18:00:30`.
    ///
    /// # Errors
    /// - `InvalidTaskArgument` when the text does not parse, `id` is zero, or
    ///   `name` is blank.
    pub fn deadline_from_str(
        id: TaskId,
        name: impl Into<String>,
        due_at: &str,
        done: bool,
    ) -> Result<Self, TaskError> {
        let due_at = parse_due_at(due_at)?;
        Self::deadline(id, name, due_at, done)
    }

    fn build(id: TaskId, name: String, kind: TaskKind, done: bool) -> Result<Self, TaskError> {
        if id == 0 {
            return Err(TaskError::InvalidTaskArgument(
                "task id must be a positive integer".to_string(),
            ));
        }
        if name.trim().is_empty() {
            return Err(TaskError::InvalidTaskArgument(
                "task description cannot be empty".to_string(),
            ));
        }
        Ok(Self {
            id,
            name,
            done,
            kind,
        })
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn kind(&self) -> TaskKind {
        self.kind
    }

    /// Due date-time for deadlines, `None` for to-dos.
    pub fn due_at(&self) -> Option<NaiveDateTime> {
        match self.kind {
            TaskKind::ToDo => None,
            TaskKind::Deadline { due_at } => Some(due_at),
        }
    }

    /// Calendar-date portion of the deadline as ISO text (`2019-12-02`).
    pub fn due_date(&self) -> Option<String> {
        self.due_at().map(|due_at| due_at.date().to_string())
    }

    /// Renders `[<kind>]<status> <name>`, e.g. `[T][ ] read book`.
    pub fn render_with_symbol(&self) -> String {
        let status = if self.done {
            DONE_SYMBOL
        } else {
            PENDING_SYMBOL
        };
        format!("[{}]{} {}", self.kind.marker(), status, self.name)
    }

    /// Returns a completed copy. Completing a done task yields an equal task.
    pub fn with_completion(&self) -> Self {
        Self {
            done: true,
            ..self.clone()
        }
    }

    /// Returns a copy carrying `new_id`.
    ///
    /// # Errors
    /// - `InvalidTaskArgument` when `new_id` is zero. The receiver is
    ///   unaffected either way.
    pub fn with_id(&self, new_id: TaskId) -> Result<Self, TaskError> {
        if new_id == 0 {
            return Err(TaskError::InvalidTaskArgument(
                "task id must be a positive integer".to_string(),
            ));
        }
        Ok(Self {
            id: new_id,
            ..self.clone()
        })
    }
}

impl Display for Task {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.id, self.render_with_symbol())?;
        if let TaskKind::Deadline { due_at } = self.kind {
            write!(f, " (by: {})", format_due_at(due_at))?;
        }
        Ok(())
    }
}

/// Parses deadline text in one of the accepted ISO local date-time formats.
///
/// # Errors
/// - `InvalidTaskArgument` with a user-facing hint on any mismatch.
pub fn parse_due_at(value: &str) -> Result<NaiveDateTime, TaskError> {
    Some(value)
        .filter(|text| DUE_AT_SHAPE_RE.is_match(text))
        .and_then(|text| {
            DUE_AT_INPUT_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        })
        .ok_or_else(|| {
            TaskError::InvalidTaskArgument(format!(
                "`{value}` is not a valid date-time; expected YYYY-MM-DDTHH:MM, e.g. 2019-12-02T18:00"
            ))
        })
}

/// Formats a due date-time for display, e.g. `Dec 2 2019 18:00`.
pub fn format_due_at(due_at: NaiveDateTime) -> String {
    due_at.format(DUE_AT_DISPLAY_FORMAT).to_string()
}
