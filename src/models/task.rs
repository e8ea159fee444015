use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::clock::Clock;

#[derive(Serialize, Deserialize, Default, Clone)]
pub struct Task {
    /// UUID to identify the task
    pub id: Uuid,
    /// User-facing auto-incremental task number, restarts on new-day reset
    #[serde(default)]
    pub task_number: u64,
    /// Display name of the task
    pub name: String,
    /// Start of the task's active window
    #[serde(with = "crate::models::clock::option", default)]
    pub start: Option<Clock>,
    /// Due time closing the task's active window
    #[serde(with = "crate::models::clock::option", default)]
    pub due: Option<Clock>,
    /// Priority, weighting this task's share of the daily point budget
    #[serde(default)]
    pub priority: Priority,
    /// Derived share of the daily budget; recomputed on every list mutation
    #[serde(default)]
    pub base_points: u32,
    /// When the task was completed; `None` means not done
    #[serde(with = "crate::models::clock::option", default)]
    pub completed_at: Option<Clock>,
    /// When the task was created
    #[serde(default)]
    pub created_at: Timestamp,
}

impl Task {
    pub fn is_done(&self) -> bool {
        self.completed_at.is_some()
    }
}

/// Task priority. Anything a document hands us that isn't a known
/// priority string collapses to `Medium`, matching the weight the
/// allocator assigns to missing priorities.
#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Integer weight used by the point allocator.
    pub fn weight(self) -> u32 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Priority {
    fn from(s: String) -> Priority {
        match s.to_lowercase().as_str() {
            "high" => Priority::High,
            "low" => Priority::Low,
            _ => Priority::Medium,
        }
    }
}

impl From<Priority> for String {
    fn from(priority: Priority) -> String {
        priority.as_str().to_string()
    }
}
