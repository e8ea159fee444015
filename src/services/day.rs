use thiserror::Error;

use crate::{
    models::{history::HistoryDay, store::Store},
    storage::{Storage, StorageError},
};

#[derive(Debug, Error)]
pub enum NewDayError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Reset the board for a fresh day: the task list is cleared wholesale
/// and the board is stamped with today's date. Favorites and history
/// are untouched. Returns the number of cleared tasks.
pub fn start_new_day(store: &mut Store, storage: &impl Storage) -> Result<usize, NewDayError> {
    let cleared = store.tasks.len();

    store.tasks.clear();
    store.date = jiff::Zoned::now().date();

    storage.save(store)?;

    Ok(cleared)
}

#[derive(Debug, Error)]
pub enum SaveDayError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Archive a frozen snapshot of the current board under its date.
/// Saving the same date again replaces the earlier snapshot wholesale;
/// the snapshot itself is never mutated afterwards.
pub fn save_day(store: &mut Store, storage: &impl Storage) -> Result<HistoryDay, SaveDayError> {
    let snapshot = HistoryDay {
        date: store.date,
        tasks: store.tasks.clone(),
    };

    store.history.insert(snapshot.date, snapshot.clone());

    storage.save(store)?;

    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{clock::Clock, task::Task},
        storage::json::JsonFileStorage,
    };
    use std::path::PathBuf;

    fn scratch_storage(name: &str) -> JsonFileStorage {
        let dir = PathBuf::from(format!("/tmp/tgb_day_test_{}", name));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        JsonFileStorage::new(dir.join("store.json"))
    }

    #[test]
    fn test_new_day_clears_tasks_but_keeps_favorites_and_history() {
        let storage = scratch_storage("reset");
        let mut store = Store::default();
        store.add_task(Task::default());
        store.add_task(Task::default());
        store.favorites.push(Default::default());
        save_day(&mut store, &storage).unwrap();

        let cleared = start_new_day(&mut store, &storage).unwrap();

        assert_eq!(cleared, 2);
        assert!(store.tasks.is_empty());
        assert_eq!(store.favorites.len(), 1);
        assert_eq!(store.history.len(), 1);
    }

    #[test]
    fn test_save_day_snapshot_is_frozen() {
        let storage = scratch_storage("frozen");
        let mut store = Store::default();
        store.add_task(Task {
            name: String::from("Dog walk"),
            ..Task::default()
        });

        save_day(&mut store, &storage).unwrap();

        // Mutate the live board after archiving
        store.tasks[0].completed_at = Clock::parse("12:00");

        let snapshot = store.history.get(&store.date).unwrap();
        assert!(snapshot.tasks[0].completed_at.is_none());
    }

    #[test]
    fn test_save_day_same_date_overwrites() {
        let storage = scratch_storage("overwrite");
        let mut store = Store::default();
        store.add_task(Task::default());
        save_day(&mut store, &storage).unwrap();

        store.add_task(Task::default());
        save_day(&mut store, &storage).unwrap();

        assert_eq!(store.history.len(), 1);
        assert_eq!(store.history.get(&store.date).unwrap().tasks.len(), 2);
    }
}
