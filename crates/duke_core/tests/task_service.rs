use duke_core::db::open_db_in_memory;
use duke_core::{
    RepoError, RepoResult, ServiceError, SqliteTaskRepository, Task, TaskError, TaskList,
    TaskRepository, TaskService,
};
use std::cell::{Cell, RefCell};

/// In-memory repository that can be told to fail saves.
#[derive(Default)]
struct MemoryRepo {
    stored: RefCell<TaskList>,
    fail_saves: Cell<bool>,
}

impl TaskRepository for &MemoryRepo {
    fn load_tasks(&self) -> RepoResult<TaskList> {
        Ok(self.stored.borrow().clone())
    }

    fn save_tasks(&self, tasks: &TaskList) -> RepoResult<()> {
        if self.fail_saves.get() {
            return Err(RepoError::InvalidData("disk full".to_string()));
        }
        *self.stored.borrow_mut() = tasks.clone();
        Ok(())
    }
}

#[test]
fn add_assigns_sequential_ids_and_persists() {
    let repo = MemoryRepo::default();
    let mut service = TaskService::open(&repo).unwrap();

    let first = service.add_todo("read book").unwrap();
    let second = service
        .add_deadline("submit report", "2019-12-02T18:00")
        .unwrap();

    assert_eq!(first.id(), 1);
    assert_eq!(second.id(), 2);
    assert_eq!(
        service.list_tasks(),
        vec![
            "1.[T][ ] read book".to_string(),
            "2.[D][ ] submit report (by: Dec 2 2019 18:00)".to_string(),
        ]
    );
    assert_eq!(*repo.stored.borrow(), *service.task_list());
}

#[test]
fn add_task_renumbers_incoming_task_after_existing_max() {
    let repo = MemoryRepo::default();
    repo.stored
        .borrow_mut()
        .add(Task::todo(41, "loaded", false).unwrap());
    let mut service = TaskService::open(&repo).unwrap();

    let stored = service
        .add_task(&Task::todo(1, "incoming", true).unwrap())
        .unwrap();

    assert_eq!(stored.id(), 42);
    assert!(stored.is_done());
    assert_eq!(stored.name(), "incoming");
}

#[test]
fn invalid_deadline_text_is_rejected_before_anything_changes() {
    let repo = MemoryRepo::default();
    let mut service = TaskService::open(&repo).unwrap();

    let err = service.add_deadline("x", "not-a-date").unwrap_err();

    assert!(matches!(
        err,
        ServiceError::Task(TaskError::InvalidTaskArgument(_))
    ));
    assert!(service.task_list().is_empty());
    assert!(repo.stored.borrow().is_empty());
}

#[test]
fn complete_marks_done_and_persists() {
    let repo = MemoryRepo::default();
    let mut service = TaskService::open(&repo).unwrap();
    service.add_todo("read book").unwrap();
    service.add_todo("buy milk").unwrap();

    let completed = service.complete_task(2).unwrap();

    assert!(completed.is_done());
    assert_eq!(service.list_tasks()[1], "2.[T][X] buy milk");
    assert!(repo.stored.borrow().get(2).unwrap().is_done());
    assert!(!repo.stored.borrow().get(1).unwrap().is_done());
}

#[test]
fn complete_unknown_id_returns_task_not_found() {
    let repo = MemoryRepo::default();
    let mut service = TaskService::open(&repo).unwrap();
    service.add_todo("read book").unwrap();

    let err = service.complete_task(99).unwrap_err();

    assert!(matches!(err, ServiceError::Task(TaskError::TaskNotFound(99))));
    assert!(!service.task_list().get(1).unwrap().is_done());
}

#[test]
fn failed_save_leaves_live_list_unchanged() {
    let repo = MemoryRepo::default();
    let mut service = TaskService::open(&repo).unwrap();
    service.add_todo("read book").unwrap();
    let before = service.task_list().clone();

    repo.fail_saves.set(true);
    assert!(matches!(
        service.add_todo("never stored").unwrap_err(),
        ServiceError::Repo(_)
    ));
    assert!(matches!(
        service.complete_task(1).unwrap_err(),
        ServiceError::Repo(_)
    ));

    assert_eq!(*service.task_list(), before);
}

#[test]
fn service_state_survives_reopen_with_sqlite() {
    let conn = open_db_in_memory().unwrap();
    {
        let mut service = TaskService::open(SqliteTaskRepository::new(&conn)).unwrap();
        service.add_todo("read book").unwrap();
        service
            .add_deadline("submit report", "2019-12-02T18:00")
            .unwrap();
        service.complete_task(1).unwrap();
    }

    let service = TaskService::open(SqliteTaskRepository::new(&conn)).unwrap();
    assert_eq!(
        service.list_tasks(),
        vec![
            "1.[T][X] read book".to_string(),
            "2.[D][ ] submit report (by: Dec 2 2019 18:00)".to_string(),
        ]
    );
}

#[test]
fn add_fails_once_ids_are_exhausted() {
    let repo = MemoryRepo::default();
    repo.stored
        .borrow_mut()
        .add(Task::todo(u32::MAX, "last id", false).unwrap());
    let mut service = TaskService::open(&repo).unwrap();

    assert!(matches!(
        service.add_todo("one too many").unwrap_err(),
        ServiceError::TaskIdsExhausted
    ));
    assert!(matches!(
        service
            .add_task(&Task::todo(1, "renumbered", false).unwrap())
            .unwrap_err(),
        ServiceError::TaskIdsExhausted
    ));
    assert_eq!(service.task_list().len(), 1);
    assert_eq!(repo.stored.borrow().len(), 1);
}
