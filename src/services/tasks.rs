use thiserror::Error;
use uuid::Uuid;

use crate::{
    models::{
        clock::Clock,
        store::Store,
        task::{Priority, Task},
    },
    scoring,
    storage::{Storage, StorageError},
};

#[derive(Debug, Error)]
pub enum TaskLookupError {
    #[error("Task '{0}' not found")]
    TaskNotFound(String),

    #[error("Task name is ambiguous. Multiple tasks found: {}", .0.join(", "))]
    AmbiguousTaskName(Vec<String>),
}

/// Resolve a task handle: task number first, then case-insensitive
/// substring match on the name.
fn resolve_task(store: &Store, handle: &str) -> Result<Uuid, TaskLookupError> {
    if let Ok(task_number) = handle.parse::<u64>() {
        return store
            .get_task_by_number(task_number)
            .map(|t| t.id)
            .ok_or_else(|| TaskLookupError::TaskNotFound(handle.to_string()));
    }

    let matching_tasks: Vec<&Task> = store
        .tasks
        .iter()
        .filter(|t| t.name.to_lowercase().contains(&handle.to_lowercase()))
        .collect();

    match matching_tasks.len() {
        0 => Err(TaskLookupError::TaskNotFound(handle.to_string())),
        1 => Ok(matching_tasks[0].id),
        _ => {
            let names: Vec<String> = matching_tasks.iter().map(|t| t.name.clone()).collect();
            Err(TaskLookupError::AmbiguousTaskName(names))
        }
    }
}

pub(crate) fn parse_clock_argument(
    flag: &'static str,
    value: Option<String>,
) -> Result<Option<Clock>, InvalidClockArgument> {
    match value {
        None => Ok(None),
        Some(s) => Clock::parse(&s)
            .map(Some)
            .ok_or(InvalidClockArgument { flag, value: s }),
    }
}

#[derive(Debug, Error)]
#[error("Invalid time '{value}' for {flag}. Expected HH:MM (e.g., 11:30)")]
pub struct InvalidClockArgument {
    pub flag: &'static str,
    pub value: String,
}

#[derive(Debug, Error)]
pub enum AddTaskError {
    #[error(transparent)]
    InvalidClock(#[from] InvalidClockArgument),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub struct AddTaskParameters {
    pub name: String,
    pub start: Option<String>,
    pub due: Option<String>,
    pub priority: Priority,
}

pub fn add_task(
    store: &mut Store,
    storage: &impl Storage,
    parameters: AddTaskParameters,
) -> Result<Task, AddTaskError> {
    let start = parse_clock_argument("--start", parameters.start)?;
    let due = parse_clock_argument("--due", parameters.due)?;

    let task = Task {
        id: Uuid::new_v4(),
        task_number: 0,
        name: parameters.name,
        start,
        due,
        priority: parameters.priority,
        base_points: 0,
        completed_at: None,
        created_at: jiff::Timestamp::now(),
    };

    let task_id = task.id;

    // Reallocate right after the insert so the new task never shows a
    // stale share of the budget
    store.add_task(task);
    scoring::allocate(&mut store.tasks);

    storage.save(store)?;

    Ok(store.get_task(task_id).unwrap().clone())
}

#[derive(Debug, Error)]
pub enum CompleteTaskError {
    #[error(transparent)]
    Lookup(#[from] TaskLookupError),

    #[error(transparent)]
    InvalidClock(#[from] InvalidClockArgument),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub struct CompleteTaskParameters {
    pub task_number_or_fuzzy_name: String,
    /// Completion clock; defaults to now when absent
    pub at: Option<String>,
}

pub fn complete_task(
    store: &mut Store,
    storage: &impl Storage,
    parameters: CompleteTaskParameters,
) -> Result<Task, CompleteTaskError> {
    let completed_at = parse_clock_argument("--at", parameters.at)?.unwrap_or_else(Clock::now);

    let task_id = resolve_task(store, &parameters.task_number_or_fuzzy_name)?;

    let task = store.get_task_mut(task_id).unwrap();
    task.completed_at = Some(completed_at);

    scoring::allocate(&mut store.tasks);

    storage.save(store)?;

    Ok(store.get_task(task_id).unwrap().clone())
}

#[derive(Debug, Error)]
pub enum ReopenTaskError {
    #[error(transparent)]
    Lookup(#[from] TaskLookupError),

    #[error("Task '{0}' is not done")]
    TaskNotDone(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub struct ReopenTaskParameters {
    pub task_number_or_fuzzy_name: String,
}

pub fn reopen_task(
    store: &mut Store,
    storage: &impl Storage,
    parameters: ReopenTaskParameters,
) -> Result<Task, ReopenTaskError> {
    let task_id = resolve_task(store, &parameters.task_number_or_fuzzy_name)?;

    let task = store.get_task_mut(task_id).unwrap();
    if !task.is_done() {
        return Err(ReopenTaskError::TaskNotDone(task.name.clone()));
    }
    task.completed_at = None;

    scoring::allocate(&mut store.tasks);

    storage.save(store)?;

    Ok(store.get_task(task_id).unwrap().clone())
}

#[derive(Debug, Error)]
pub enum RemoveTaskError {
    #[error(transparent)]
    Lookup(#[from] TaskLookupError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub struct RemoveTaskParameters {
    pub task_number_or_fuzzy_name: String,
}

pub fn remove_task(
    store: &mut Store,
    storage: &impl Storage,
    parameters: RemoveTaskParameters,
) -> Result<Task, RemoveTaskError> {
    let task_id = resolve_task(store, &parameters.task_number_or_fuzzy_name)?;

    let removed = store.remove_task(task_id).unwrap();

    scoring::allocate(&mut store.tasks);

    storage.save(store)?;

    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::json::JsonFileStorage;
    use std::path::PathBuf;

    fn scratch_storage(name: &str) -> JsonFileStorage {
        let dir = PathBuf::from(format!("/tmp/tgb_service_test_{}", name));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        JsonFileStorage::new(dir.join("store.json"))
    }

    #[test]
    fn test_add_task_allocates_immediately() {
        let storage = scratch_storage("add");
        let mut store = Store::default();

        let task = add_task(
            &mut store,
            &storage,
            AddTaskParameters {
                name: String::from("Get dressed"),
                start: Some(String::from("11:00")),
                due: Some(String::from("11:30")),
                priority: Priority::High,
            },
        )
        .unwrap();

        assert_eq!(task.task_number, 1);
        assert_eq!(task.base_points, 100);

        let task2 = add_task(
            &mut store,
            &storage,
            AddTaskParameters {
                name: String::from("Dog walk"),
                start: None,
                due: None,
                priority: Priority::Low,
            },
        )
        .unwrap();

        // weights 3 vs 1: the earlier task is updated too
        assert_eq!(store.tasks[0].base_points, 75);
        assert_eq!(task2.base_points, 25);
    }

    #[test]
    fn test_add_task_rejects_malformed_clock() {
        let storage = scratch_storage("add_bad_clock");
        let mut store = Store::default();

        let result = add_task(
            &mut store,
            &storage,
            AddTaskParameters {
                name: String::from("x"),
                start: Some(String::from("ab:cd")),
                due: None,
                priority: Priority::Medium,
            },
        );

        assert!(matches!(result, Err(AddTaskError::InvalidClock(_))));
        assert!(store.tasks.is_empty());
    }

    #[test]
    fn test_complete_and_reopen_by_number_and_fuzzy_name() {
        let storage = scratch_storage("complete");
        let mut store = Store::default();

        for name in ["Get dressed", "Dog walk"] {
            add_task(
                &mut store,
                &storage,
                AddTaskParameters {
                    name: String::from(name),
                    start: Some(String::from("11:00")),
                    due: Some(String::from("11:30")),
                    priority: Priority::Medium,
                },
            )
            .unwrap();
        }

        let done = complete_task(
            &mut store,
            &storage,
            CompleteTaskParameters {
                task_number_or_fuzzy_name: String::from("dog"),
                at: Some(String::from("11:15")),
            },
        )
        .unwrap();
        assert_eq!(done.completed_at, Clock::parse("11:15"));

        let reopened = reopen_task(
            &mut store,
            &storage,
            ReopenTaskParameters {
                task_number_or_fuzzy_name: String::from("2"),
            },
        )
        .unwrap();
        assert!(!reopened.is_done());

        let again = reopen_task(
            &mut store,
            &storage,
            ReopenTaskParameters {
                task_number_or_fuzzy_name: String::from("2"),
            },
        );
        assert!(matches!(again, Err(ReopenTaskError::TaskNotDone(_))));
    }

    #[test]
    fn test_ambiguous_and_missing_lookups() {
        let storage = scratch_storage("lookup");
        let mut store = Store::default();

        for name in ["Focus block 1", "Focus block 2"] {
            add_task(
                &mut store,
                &storage,
                AddTaskParameters {
                    name: String::from(name),
                    start: None,
                    due: None,
                    priority: Priority::Medium,
                },
            )
            .unwrap();
        }

        let ambiguous = complete_task(
            &mut store,
            &storage,
            CompleteTaskParameters {
                task_number_or_fuzzy_name: String::from("focus"),
                at: None,
            },
        );
        assert!(matches!(
            ambiguous,
            Err(CompleteTaskError::Lookup(
                TaskLookupError::AmbiguousTaskName(_)
            ))
        ));

        let missing = remove_task(
            &mut store,
            &storage,
            RemoveTaskParameters {
                task_number_or_fuzzy_name: String::from("99"),
            },
        );
        assert!(matches!(
            missing,
            Err(RemoveTaskError::Lookup(TaskLookupError::TaskNotFound(_)))
        ));
    }

    #[test]
    fn test_remove_task_reallocates_survivors() {
        let storage = scratch_storage("remove");
        let mut store = Store::default();

        for (name, priority) in [("a", Priority::High), ("b", Priority::Low)] {
            add_task(
                &mut store,
                &storage,
                AddTaskParameters {
                    name: String::from(name),
                    start: None,
                    due: None,
                    priority,
                },
            )
            .unwrap();
        }

        remove_task(
            &mut store,
            &storage,
            RemoveTaskParameters {
                task_number_or_fuzzy_name: String::from("1"),
            },
        )
        .unwrap();

        assert_eq!(store.tasks.len(), 1);
        assert_eq!(store.tasks[0].base_points, 100);
    }
}
