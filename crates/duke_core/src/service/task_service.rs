//! Task use-case service.
//!
//! # Responsibility
//! - Own the live `TaskList` for one process.
//! - Assign ids to new tasks and persist after every mutation.
//!
//! # Invariants
//! - The live list is replaced only after the repository save succeeds, so
//!   memory and storage never diverge on failure.
//! - New tasks always receive `TaskList::next_task_id()`.

use crate::model::task::{Task, TaskError, TaskId};
use crate::model::task_list::TaskList;
use crate::repo::task_repo::{RepoError, TaskRepository};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for task use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Invalid input or unknown task id.
    Task(TaskError),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// The list already holds the largest representable id.
    TaskIdsExhausted,
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Task(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::TaskIdsExhausted => write!(f, "no task ids left above {}", TaskId::MAX),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Task(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::TaskIdsExhausted => None,
        }
    }
}

impl From<TaskError> for ServiceError {
    fn from(value: TaskError) -> Self {
        Self::Task(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Use-case service over a persisted task list.
pub struct TaskService<R: TaskRepository> {
    repo: R,
    tasks: TaskList,
}

impl<R: TaskRepository> TaskService<R> {
    /// Loads the persisted list and wraps it in a service.
    pub fn open(repo: R) -> ServiceResult<Self> {
        let tasks = repo.load_tasks()?;
        info!(
            "event=service_open module=service status=ok task_count={}",
            tasks.len()
        );
        Ok(Self { repo, tasks })
    }

    /// Read-only view of the live list.
    pub fn task_list(&self) -> &TaskList {
        &self.tasks
    }

    /// Display lines of all tasks, in list order.
    pub fn list_tasks(&self) -> Vec<String> {
        self.tasks.list_tasks()
    }

    /// Adds `task` under the next free id and persists the list.
    ///
    /// The incoming id is ignored; the stored copy is returned.
    ///
    /// # Errors
    /// - `TaskIdsExhausted` when no unused id above the current maximum
    ///   exists. Nothing is stored.
    pub fn add_task(&mut self, task: &Task) -> ServiceResult<Task> {
        let stored = task.with_id(self.next_task_id()?)?;
        let mut next = self.tasks.clone();
        next.add(stored.clone());
        self.commit(next, "task_add", stored.id())?;
        Ok(stored)
    }

    /// Builds and adds a to-do.
    pub fn add_todo(&mut self, name: &str) -> ServiceResult<Task> {
        let task = Task::todo(self.next_task_id()?, name, false)?;
        self.add_task(&task)
    }

    /// Builds and adds a deadline from ISO local date-time text.
    ///
    /// # Errors
    /// - `Task(InvalidTaskArgument)` when `due_at` does not parse.
    pub fn add_deadline(&mut self, name: &str, due_at: &str) -> ServiceResult<Task> {
        let task = Task::deadline_from_str(self.next_task_id()?, name, due_at, false)?;
        self.add_task(&task)
    }

    /// Marks the task with `task_id` done and persists the list.
    ///
    /// # Errors
    /// - `Task(TaskNotFound)` when no task carries `task_id`.
    pub fn complete_task(&mut self, task_id: TaskId) -> ServiceResult<Task> {
        let mut next = self.tasks.clone();
        let completed = match next.complete_task(task_id) {
            Ok(task) => task.clone(),
            Err(err) => {
                warn!(
                    "event=task_complete module=service status=error task_id={task_id} error_code=task_not_found"
                );
                return Err(err.into());
            }
        };
        self.commit(next, "task_complete", task_id)?;
        Ok(completed)
    }

    fn next_task_id(&self) -> ServiceResult<TaskId> {
        self.tasks.next_task_id().ok_or_else(|| {
            warn!("event=task_add module=service status=error error_code=task_ids_exhausted");
            ServiceError::TaskIdsExhausted
        })
    }

    fn commit(&mut self, next: TaskList, event: &str, task_id: TaskId) -> ServiceResult<()> {
        if let Err(err) = self.repo.save_tasks(&next) {
            warn!(
                "event={event} module=service status=error task_id={task_id} error_code=save_failed error={err}"
            );
            return Err(err.into());
        }
        self.tasks = next;
        info!(
            "event={event} module=service status=ok task_id={task_id} task_count={}",
            self.tasks.len()
        );
        Ok(())
    }
}
