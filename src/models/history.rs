use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::models::task::Task;

/// A frozen snapshot of one day's board, keyed by calendar date.
///
/// Snapshots are never mutated after creation; saving the same date
/// again replaces the snapshot wholesale.
#[derive(Serialize, Deserialize, Clone)]
pub struct HistoryDay {
    pub date: Date,
    pub tasks: Vec<Task>,
}
