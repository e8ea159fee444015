use std::{collections::HashSet, path::PathBuf};

use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    models::{store::Store, task::Task},
    scoring,
    storage::{Storage, StorageError},
};

/// The export document: a self-describing `{date, tasks}` JSON object.
/// Import requires the tasks array to be present and well-shaped; the
/// date is optional and falls back to today.
#[derive(Serialize, Deserialize)]
struct DayDocument {
    #[serde(default)]
    date: Option<Date>,
    tasks: Vec<Task>,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to serialize export: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write export to '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub struct ExportDayParameters {
    pub path: PathBuf,
}

pub fn export_day(store: &Store, parameters: ExportDayParameters) -> Result<(), ExportError> {
    let document = DayDocument {
        date: Some(store.date),
        tasks: store.tasks.clone(),
    };

    let json = serde_json::to_string_pretty(&document)?;

    std::fs::write(&parameters.path, json).map_err(|e| ExportError::Io {
        path: parameters.path,
        source: e,
    })?;

    Ok(())
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{path}' is not a valid export: {source}")]
    InvalidDocument {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub struct ImportDayParameters {
    pub path: PathBuf,
}

/// Replace the current board with an imported `{date, tasks}` document.
/// Base points are not trusted from the document; the allocator
/// recomputes them before the store is persisted. Returns the number of
/// imported tasks.
pub fn import_day(
    store: &mut Store,
    storage: &impl Storage,
    parameters: ImportDayParameters,
) -> Result<usize, ImportError> {
    let content = std::fs::read_to_string(&parameters.path).map_err(|e| ImportError::Io {
        path: parameters.path.clone(),
        source: e,
    })?;

    let document: DayDocument =
        serde_json::from_str(&content).map_err(|e| ImportError::InvalidDocument {
            path: parameters.path.clone(),
            source: e,
        })?;

    store.date = document.date.unwrap_or_else(|| jiff::Zoned::now().date());
    store.tasks = document.tasks;

    renumber_if_needed(&mut store.tasks);
    scoring::allocate(&mut store.tasks);

    storage.save(store)?;

    Ok(store.tasks.len())
}

/// Documents from other tools may carry no usable task numbers. Keep
/// the numbers when they are all distinct and nonzero (so our own
/// exports round-trip untouched), renumber sequentially otherwise.
fn renumber_if_needed(tasks: &mut [Task]) {
    let mut seen = HashSet::new();
    let usable = tasks
        .iter()
        .all(|t| t.task_number != 0 && seen.insert(t.task_number));

    if !usable {
        for (index, task) in tasks.iter_mut().enumerate() {
            task.task_number = index as u64 + 1;
        }
    }
}
