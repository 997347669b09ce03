//! Ordered task collection.
//!
//! # Responsibility
//! - Own the sequence of tasks and mediate every structural change.
//! - Produce display lines in insertion order.
//!
//! # Invariants
//! - Order reflects insertion order; completion replaces in place.
//! - Ids are assigned by task creators, so lookups tolerate gaps and
//!   duplicates (first match wins).
//! - Failed operations leave the list unchanged.

use crate::model::task::{Task, TaskError, TaskId};

/// Ordered, owning collection of tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a list holding an independent copy of `tasks`.
    pub fn from_tasks(tasks: &[Task]) -> Self {
        Self {
            tasks: tasks.to_vec(),
        }
    }

    /// Appends `task` to the end of the list.
    ///
    /// Id uniqueness is not checked; callers pick ids (see `next_task_id`).
    pub fn add(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Replaces the task with `task_id` by its completed copy, keeping its
    /// position, and returns the stored result.
    ///
    /// # Errors
    /// - `TaskNotFound` when no task carries `task_id`. The list is untouched.
    pub fn complete_task(&mut self, task_id: TaskId) -> Result<&Task, TaskError> {
        let index = self
            .position_of(task_id)
            .ok_or(TaskError::TaskNotFound(task_id))?;
        let completed = self.tasks[index].with_completion();
        self.tasks[index] = completed;
        Ok(&self.tasks[index])
    }

    /// Display lines for every task, in list order.
    pub fn list_tasks(&self) -> Vec<String> {
        self.tasks.iter().map(ToString::to_string).collect()
    }

    /// First task carrying `task_id`.
    pub fn get(&self, task_id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == task_id)
    }

    /// Smallest id above every id currently in the list (`1` when empty).
    ///
    /// `None` once the list holds `TaskId::MAX`; no larger id exists.
    pub fn next_task_id(&self) -> Option<TaskId> {
        self.tasks
            .iter()
            .map(Task::id)
            .max()
            .map_or(Some(1), |max| max.checked_add(1))
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn position_of(&self, task_id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id() == task_id)
    }
}

impl<'a> IntoIterator for &'a TaskList {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
