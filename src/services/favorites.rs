use thiserror::Error;
use uuid::Uuid;

use crate::{
    models::{favorite::Favorite, store::Store, task::Priority, task::Task},
    scoring,
    services::tasks::{InvalidClockArgument, parse_clock_argument},
    storage::{Storage, StorageError},
};

#[derive(Debug, Error)]
pub enum FavoriteLookupError {
    #[error("Favorite '{0}' not found")]
    FavoriteNotFound(String),

    #[error("Favorite name is ambiguous. Multiple favorites found: {}", .0.join(", "))]
    AmbiguousFavoriteName(Vec<String>),
}

fn resolve_favorite(store: &Store, name: &str) -> Result<Uuid, FavoriteLookupError> {
    let matching: Vec<&Favorite> = store
        .favorites
        .iter()
        .filter(|f| f.name.to_lowercase().contains(&name.to_lowercase()))
        .collect();

    match matching.len() {
        0 => Err(FavoriteLookupError::FavoriteNotFound(name.to_string())),
        1 => Ok(matching[0].id),
        _ => {
            let names: Vec<String> = matching.iter().map(|f| f.name.clone()).collect();
            Err(FavoriteLookupError::AmbiguousFavoriteName(names))
        }
    }
}

#[derive(Debug, Error)]
pub enum AddFavoriteError {
    #[error(transparent)]
    InvalidClock(#[from] InvalidClockArgument),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub struct AddFavoriteParameters {
    pub name: String,
    pub start: Option<String>,
    pub end: Option<String>,
    pub priority: Priority,
}

pub fn add_favorite(
    store: &mut Store,
    storage: &impl Storage,
    parameters: AddFavoriteParameters,
) -> Result<Favorite, AddFavoriteError> {
    let favorite = Favorite {
        id: Uuid::new_v4(),
        name: parameters.name,
        start: parse_clock_argument("--start", parameters.start)?,
        end: parse_clock_argument("--end", parameters.end)?,
        priority: parameters.priority,
    };

    store.add_favorite(favorite.clone());

    storage.save(store)?;

    Ok(favorite)
}

#[derive(Debug, Error)]
pub enum RemoveFavoriteError {
    #[error(transparent)]
    Lookup(#[from] FavoriteLookupError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub struct RemoveFavoriteParameters {
    pub name: String,
}

pub fn remove_favorite(
    store: &mut Store,
    storage: &impl Storage,
    parameters: RemoveFavoriteParameters,
) -> Result<Favorite, RemoveFavoriteError> {
    let favorite_id = resolve_favorite(store, &parameters.name)?;

    let removed = store.remove_favorite(favorite_id).unwrap();

    storage.save(store)?;

    Ok(removed)
}

#[derive(Debug, Error)]
pub enum UseFavoriteError {
    #[error(transparent)]
    Lookup(#[from] FavoriteLookupError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub struct UseFavoriteParameters {
    pub name: String,
}

/// Stamp a new task onto the board from a favorite template.
pub fn use_favorite(
    store: &mut Store,
    storage: &impl Storage,
    parameters: UseFavoriteParameters,
) -> Result<Task, UseFavoriteError> {
    let favorite_id = resolve_favorite(store, &parameters.name)?;

    let task = store
        .favorites
        .iter()
        .find(|f| f.id == favorite_id)
        .unwrap()
        .to_task();
    let task_id = task.id;

    store.add_task(task);
    scoring::allocate(&mut store.tasks);

    storage.save(store)?;

    Ok(store.get_task(task_id).unwrap().clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::clock::Clock;
    use crate::storage::json::JsonFileStorage;
    use std::path::PathBuf;

    fn scratch_storage(name: &str) -> JsonFileStorage {
        let dir = PathBuf::from(format!("/tmp/tgb_favorite_test_{}", name));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        JsonFileStorage::new(dir.join("store.json"))
    }

    #[test]
    fn test_use_favorite_creates_numbered_allocated_task() {
        let storage = scratch_storage("use");
        let mut store = Store::default();

        add_favorite(
            &mut store,
            &storage,
            AddFavoriteParameters {
                name: String::from("Dog walk"),
                start: Some(String::from("11:30")),
                end: Some(String::from("12:00")),
                priority: Priority::High,
            },
        )
        .unwrap();

        let task = use_favorite(
            &mut store,
            &storage,
            UseFavoriteParameters {
                name: String::from("dog"),
            },
        )
        .unwrap();

        assert_eq!(task.task_number, 1);
        assert_eq!(task.base_points, 100);
        assert_eq!(task.due, Clock::parse("12:00"));
        assert!(!task.is_done());
        // the template itself is untouched
        assert_eq!(store.favorites.len(), 1);
    }

    #[test]
    fn test_remove_favorite_leaves_tasks_alone() {
        let storage = scratch_storage("remove");
        let mut store = Store::default();

        add_favorite(
            &mut store,
            &storage,
            AddFavoriteParameters {
                name: String::from("Dog walk"),
                start: None,
                end: None,
                priority: Priority::Medium,
            },
        )
        .unwrap();
        use_favorite(
            &mut store,
            &storage,
            UseFavoriteParameters {
                name: String::from("dog"),
            },
        )
        .unwrap();

        remove_favorite(
            &mut store,
            &storage,
            RemoveFavoriteParameters {
                name: String::from("dog"),
            },
        )
        .unwrap();

        assert!(store.favorites.is_empty());
        assert_eq!(store.tasks.len(), 1);
    }

    #[test]
    fn test_unknown_favorite() {
        let storage = scratch_storage("missing");
        let mut store = Store::default();

        let result = use_favorite(
            &mut store,
            &storage,
            UseFavoriteParameters {
                name: String::from("nothing"),
            },
        );
        assert!(matches!(
            result,
            Err(UseFavoriteError::Lookup(
                FavoriteLookupError::FavoriteNotFound(_)
            ))
        ));
    }
}
