//! Board scoring.
//!
//! Two pure computations drive the whole game: the point allocator,
//! which splits the fixed daily budget across the board proportionally
//! to priority weight, and the speed bonus, which rewards finishing a
//! task early within its start/due window. Both are deterministic
//! functions of the task list and are recomputed on demand rather than
//! cached.

use crate::models::task::Task;

/// Total points distributed across a day's tasks.
pub const DAILY_BUDGET: u32 = 100;

/// The speed bonus never exceeds this fraction of a task's base points.
const BONUS_CAP: f64 = 0.5;

/// Distribute the daily budget across `tasks` in place, proportionally
/// to priority weight (high=3, medium=2, low=1).
///
/// Every task but the last gets `round(weight / total * 100)`, floored
/// at 1. The last task absorbs all rounding drift: it receives
/// `max(1, remaining)`, where `remaining` is decremented by the
/// *pre-floor* rounded value of each earlier task. That bookkeeping
/// order is load-bearing: flooring feeds the assigned value only, so
/// the output is a stable fixed point under repeated allocation.
///
/// An empty list is a no-op. A single task gets the whole budget. With
/// extreme weight skews the floor on the last task can push the total
/// above 100; that is the documented behavior, not drift to correct.
pub fn allocate(tasks: &mut [Task]) {
    let Some((last, rest)) = tasks.split_last_mut() else {
        return;
    };

    let total_weight: u32 =
        rest.iter().map(|t| t.priority.weight()).sum::<u32>() + last.priority.weight();
    let mut remaining = DAILY_BUDGET as i64;

    for task in rest {
        let share = task.priority.weight() as f64 / total_weight as f64 * DAILY_BUDGET as f64;
        // Half away from zero, the rounding the budget math was defined with
        let rounded = share.round() as i64;
        task.base_points = rounded.max(1) as u32;
        remaining -= rounded;
    }

    last.base_points = remaining.max(1) as u32;
}

/// Points earned for completing a task strictly before its due time.
///
/// The earned fraction is `early_by / window`, capped at 50% of the
/// task's base points no matter how early the completion. Anything
/// degenerate earns nothing: a missing or unparseable start, due or
/// completion clock, a window of zero or negative length, or a
/// completion at or after the due time all yield 0. Scoring never
/// fails; it degrades to zero so the board can always show a total.
pub fn speed_bonus(task: &Task) -> u32 {
    let (Some(start), Some(due), Some(completed)) = (task.start, task.due, task.completed_at)
    else {
        return 0;
    };

    let window = due.minutes() as i64 - start.minutes() as i64;
    let early_by = due.minutes() as i64 - completed.minutes() as i64;
    if window <= 0 || early_by <= 0 {
        return 0;
    }

    let pct = (early_by as f64 / window as f64).min(BONUS_CAP);
    (task.base_points as f64 * pct).round() as u32
}

/// Aggregate score figures for one board (or one frozen snapshot).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BoardSummary {
    /// Number of completed tasks
    pub done: usize,
    /// Sum of base points over completed tasks
    pub base_done: u32,
    /// Sum of speed bonuses over completed tasks
    pub bonus: u32,
    /// `base_done + bonus`
    pub total: u32,
}

pub fn summarize(tasks: &[Task]) -> BoardSummary {
    let mut summary = BoardSummary::default();
    for task in tasks.iter().filter(|t| t.is_done()) {
        summary.done += 1;
        summary.base_done += task.base_points;
        summary.bonus += speed_bonus(task);
    }
    summary.total = summary.base_done + summary.bonus;
    summary
}
