use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{
    clock::Clock,
    task::{Priority, Task},
};

/// A reusable task template for quick daily task creation.
///
/// Favorites live independently of the day's task list; using one
/// stamps a fresh task onto the board with an empty completion.
#[derive(Serialize, Deserialize, Default, Clone)]
pub struct Favorite {
    /// UUID to identify the favorite
    pub id: Uuid,
    /// Display name copied into tasks created from this favorite
    pub name: String,
    /// Window start for created tasks
    #[serde(with = "crate::models::clock::option", default)]
    pub start: Option<Clock>,
    /// Window end for created tasks (becomes the task's due time)
    #[serde(with = "crate::models::clock::option", default)]
    pub end: Option<Clock>,
    /// Priority for created tasks
    #[serde(default)]
    pub priority: Priority,
}

impl Favorite {
    /// Build a fresh, not-done task from this template. The caller is
    /// responsible for numbering it and reallocating base points.
    pub fn to_task(&self) -> Task {
        Task {
            id: Uuid::new_v4(),
            task_number: 0,
            name: self.name.clone(),
            start: self.start,
            due: self.end,
            priority: self.priority,
            base_points: 0,
            completed_at: None,
            created_at: jiff::Timestamp::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_task_copies_fields_and_starts_not_done() {
        let favorite = Favorite {
            id: Uuid::new_v4(),
            name: String::from("Dog walk"),
            start: Clock::parse("11:30"),
            end: Clock::parse("12:00"),
            priority: Priority::High,
        };

        let task = favorite.to_task();
        assert_eq!(task.name, "Dog walk");
        assert_eq!(task.start, favorite.start);
        assert_eq!(task.due, favorite.end);
        assert_eq!(task.priority, Priority::High);
        assert!(!task.is_done());
        assert_ne!(task.id, favorite.id);
    }
}
