//! Task repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Rehydrate a `TaskList` in stored order.
//! - Replace the stored list atomically on save.
//!
//! # Invariants
//! - `position` order on disk equals list order in memory.
//! - A failed save leaves the previously stored list intact.

use crate::db::DbError;
use crate::model::task::{Task, TaskError, TaskKind};
use crate::model::task_list::TaskList;
use chrono::NaiveDateTime;
use log::{debug, error};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const DUE_AT_STORAGE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for task persistence.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted task data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Load/save contract for the persisted task list.
pub trait TaskRepository {
    fn load_tasks(&self) -> RepoResult<TaskList>;
    fn save_tasks(&self, tasks: &TaskList) -> RepoResult<()>;
}

/// SQLite-backed task repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn load_tasks(&self) -> RepoResult<TaskList> {
        let mut stmt = self.conn.prepare(
            "SELECT task_id, kind, name, is_done, due_at
             FROM tasks
             ORDER BY position ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut list = TaskList::new();

        while let Some(row) = rows.next()? {
            list.add(parse_task_row(row)?);
        }

        debug!(
            "event=tasks_load module=repo status=ok count={}",
            list.len()
        );
        Ok(list)
    }

    fn save_tasks(&self, tasks: &TaskList) -> RepoResult<()> {
        // `&Connection` cannot open a checked transaction; nothing else holds
        // one open on this connection.
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM tasks;", [])?;
        {
            let mut insert = tx.prepare(
                "INSERT INTO tasks (position, task_id, kind, name, is_done, due_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            )?;
            for (position, task) in tasks.iter().enumerate() {
                let position = i64::try_from(position).map_err(|_| {
                    RepoError::InvalidData(format!("task position {position} overflows i64"))
                })?;
                insert.execute(params![
                    position,
                    task.id(),
                    kind_to_db(task.kind()),
                    task.name(),
                    bool_to_int(task.is_done()),
                    task.due_at().map(format_due_at_for_db),
                ])?;
            }
        }
        tx.commit().map_err(|err| {
            error!("event=tasks_save module=repo status=error error={err}");
            err
        })?;

        debug!(
            "event=tasks_save module=repo status=ok count={}",
            tasks.len()
        );
        Ok(())
    }
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let task_id: u32 = row.get("task_id")?;
    let name: String = row.get("name")?;

    let done = match row.get::<_, i64>("is_done")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid is_done value `{other}` in tasks.is_done"
            )));
        }
    };

    let kind_text: String = row.get("kind")?;
    let due_at_text: Option<String> = row.get("due_at")?;
    let task = match (kind_text.as_str(), due_at_text) {
        ("todo", None) => Task::todo(task_id, name, done),
        ("deadline", Some(text)) => {
            let due_at = parse_due_at_from_db(&text)?;
            Task::deadline(task_id, name, due_at, done)
        }
        (kind, due_at) => {
            return Err(RepoError::InvalidData(format!(
                "task kind `{kind}` does not match due_at `{due_at:?}`"
            )));
        }
    };

    task.map_err(|err: TaskError| RepoError::InvalidData(err.to_string()))
}

fn kind_to_db(kind: TaskKind) -> &'static str {
    match kind {
        TaskKind::ToDo => "todo",
        TaskKind::Deadline { .. } => "deadline",
    }
}

fn format_due_at_for_db(due_at: NaiveDateTime) -> String {
    due_at.format(DUE_AT_STORAGE_FORMAT).to_string()
}

fn parse_due_at_from_db(value: &str) -> RepoResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, DUE_AT_STORAGE_FORMAT).map_err(|_| {
        RepoError::InvalidData(format!("invalid due_at value `{value}` in tasks.due_at"))
    })
}

fn bool_to_int(value: bool) -> i64 {
    i64::from(value)
}
