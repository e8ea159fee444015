use std::collections::BTreeMap;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{favorite::Favorite, history::HistoryDay, task::Task};

/// Current schema version
pub const CURRENT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
pub struct Store {
    pub version: u32,
    /// Calendar date the current board belongs to
    pub date: Date,
    /// Today's task list, in board order
    pub tasks: Vec<Task>,
    /// Reusable task templates, independent lifecycle from tasks
    pub favorites: Vec<Favorite>,
    /// Archived day snapshots keyed by calendar date
    pub history: BTreeMap<Date, HistoryDay>,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            version: CURRENT_VERSION,
            date: jiff::Zoned::now().date(),
            tasks: vec![],
            favorites: vec![],
            history: BTreeMap::new(),
        }
    }
}

impl Store {
    /// Append a task, assigning the next user-facing task number.
    pub fn add_task(&mut self, mut task: Task) {
        task.task_number = self
            .tasks
            .iter()
            .map(|t| t.task_number)
            .max()
            .unwrap_or(0)
            + 1;
        self.tasks.push(task);
    }

    pub fn get_task(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn get_task_mut(&mut self, id: Uuid) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    pub fn get_task_by_number(&self, task_number: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.task_number == task_number)
    }

    /// Remove a task from the board, preserving the order of the rest.
    pub fn remove_task(&mut self, id: Uuid) -> Option<Task> {
        let index = self.tasks.iter().position(|t| t.id == id)?;
        Some(self.tasks.remove(index))
    }

    pub fn add_favorite(&mut self, favorite: Favorite) {
        self.favorites.push(favorite);
    }

    pub fn remove_favorite(&mut self, id: Uuid) -> Option<Favorite> {
        let index = self.favorites.iter().position(|f| f.id == id)?;
        Some(self.favorites.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_task_assigns_sequential_numbers() {
        let mut store = Store::default();
        store.add_task(Task::default());
        store.add_task(Task::default());
        assert_eq!(store.tasks[0].task_number, 1);
        assert_eq!(store.tasks[1].task_number, 2);
    }

    #[test]
    fn test_numbering_does_not_reuse_after_remove() {
        let mut store = Store::default();
        store.add_task(Task::default());
        store.add_task(Task::default());
        let first = store.tasks[0].id;
        store.remove_task(first);
        store.add_task(Task::default());
        assert_eq!(store.tasks[1].task_number, 3);
    }

    #[test]
    fn test_remove_task_preserves_order() {
        let mut store = Store::default();
        for _ in 0..3 {
            store.add_task(Task::default());
        }
        let middle = store.tasks[1].id;
        store.remove_task(middle);
        let numbers: Vec<u64> = store.tasks.iter().map(|t| t.task_number).collect();
        assert_eq!(numbers, vec![1, 3]);
    }
}
