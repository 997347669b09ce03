use duke_core::db::{open_db, open_db_in_memory};
use duke_core::{RepoError, SqliteTaskRepository, Task, TaskList, TaskRepository};

fn sample_list() -> TaskList {
    let mut list = TaskList::new();
    list.add(Task::todo(3, "read book", false).unwrap());
    list.add(Task::deadline_from_str(1, "submit report", "2019-12-02T18:00", true).unwrap());
    list.add(Task::deadline_from_str(8, "precise", "2020-01-01T08:15:30.5", false).unwrap());
    list
}

#[test]
fn empty_database_loads_empty_list() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    assert!(repo.load_tasks().unwrap().is_empty());
}

#[test]
fn save_then_load_preserves_order_ids_flags_and_dates() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);
    let list = sample_list();

    repo.save_tasks(&list).unwrap();
    let loaded = repo.load_tasks().unwrap();

    assert_eq!(loaded, list);
    assert_eq!(loaded.list_tasks(), list.list_tasks());
}

#[test]
fn save_replaces_previous_contents() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);
    repo.save_tasks(&sample_list()).unwrap();

    let mut smaller = TaskList::new();
    smaller.add(Task::todo(1, "only one", false).unwrap());
    repo.save_tasks(&smaller).unwrap();

    assert_eq!(repo.load_tasks().unwrap(), smaller);
}

#[test]
fn duplicate_ids_round_trip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);
    let mut list = TaskList::new();
    list.add(Task::todo(2, "first", false).unwrap());
    list.add(Task::todo(2, "second", true).unwrap());

    repo.save_tasks(&list).unwrap();

    assert_eq!(repo.load_tasks().unwrap(), list);
}

#[test]
fn tasks_survive_reopening_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("duke.sqlite3");
    let list = sample_list();

    {
        let conn = open_db(&path).unwrap();
        SqliteTaskRepository::new(&conn).save_tasks(&list).unwrap();
    }

    let conn = open_db(&path).unwrap();
    let loaded = SqliteTaskRepository::new(&conn).load_tasks().unwrap();
    assert_eq!(loaded, list);
}

#[test]
fn invalid_stored_due_at_is_reported() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO tasks (position, task_id, kind, name, is_done, due_at)
         VALUES (0, 1, 'deadline', 'broken', 0, 'tomorrow');",
        [],
    )
    .unwrap();

    let err = SqliteTaskRepository::new(&conn).load_tasks().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(ref message) if message.contains("tomorrow")));
}
