use colored::*;

use crate::{
    models::{
        clock::Clock,
        favorite::Favorite,
        history::HistoryDay,
        store::Store,
        task::{Priority, Task},
    },
    scoring::{self, BoardSummary},
};

/// Get the terminal width, defaulting to 80 if unavailable
fn get_terminal_width() -> usize {
    term_size::dimensions().map(|(w, _)| w).unwrap_or(80)
}

/// Get the appropriate status glyph for a task
pub fn get_status_glyph(task: &Task, now: Clock) -> ColoredString {
    if task.is_done() {
        "✓".green()
    } else if is_overdue(task, now) {
        "●".red()
    } else {
        "○".normal()
    }
}

/// A pending task past its due time counts as overdue
pub fn is_overdue(task: &Task, now: Clock) -> bool {
    if task.is_done() {
        return false;
    }
    match task.due {
        Some(due) => now > due,
        None => false,
    }
}

fn format_priority(priority: Priority) -> ColoredString {
    match priority {
        Priority::High => "high".red(),
        Priority::Medium => "medium".yellow(),
        Priority::Low => "low".dimmed(),
    }
}

fn format_window(start: Option<Clock>, due: Option<Clock>) -> String {
    match (start, due) {
        (Some(start), Some(due)) => format!("{}–{}", start, due),
        (Some(start), None) => format!("{}–", start),
        (None, Some(due)) => format!("–{}", due),
        (None, None) => String::new(),
    }
}

/// Render a single task line: number, glyph, name on the left; window,
/// priority and points right-aligned when the terminal is wide enough.
pub fn render_task_line(task: &Task, now: Clock) {
    let terminal_width = get_terminal_width();

    let id_str = format!("{:>3}", task.task_number);
    let glyph = get_status_glyph(task, now);
    let name = &task.name;

    let left_section = format!("  {}  {}  {}", id_str, glyph, name);

    let styled_left = if task.is_done() {
        left_section.dimmed()
    } else {
        left_section.bold()
    };

    let mut right_parts: Vec<String> = vec![];
    let window = format_window(task.start, task.due);
    if !window.is_empty() {
        right_parts.push(window);
    }
    right_parts.push(format_priority(task.priority).to_string());

    let bonus = scoring::speed_bonus(task);
    let points = if bonus > 0 {
        format!("{} pts (+{})", task.base_points, bonus)
    } else {
        format!("{} pts", task.base_points)
    };
    right_parts.push(points);

    if let Some(done_at) = task.completed_at {
        right_parts.push(format!("done {}", done_at));
    }

    let right_section = right_parts.join("  ·  ");
    let right_dimmed = right_section.dimmed();

    let left_visible_len = format!("  {}  {}  {}", id_str, " ", name).chars().count();
    let right_visible_len = right_section.chars().count();
    let total_content = left_visible_len + right_visible_len;

    if total_content + 4 < terminal_width {
        let padding = terminal_width - total_content - 2;
        println!("{}{}{}", styled_left, " ".repeat(padding), right_dimmed);
    } else {
        // Not enough space for right alignment, just print normally
        println!("{} {}", styled_left, right_dimmed);
    }
}

/// Render the summary line under a board
pub fn render_summary(summary: &BoardSummary) {
    println!(
        "\n  {}  {} done  {}  {} base  {}  {} bonus  {}  {}\n",
        "Score:".cyan().bold(),
        summary.done,
        "·".dimmed(),
        summary.base_done,
        "·".dimmed(),
        summary.bonus,
        "·".dimmed(),
        format!("{} total", summary.total).bold()
    );
}

/// Render the current board: header, one line per task, summary.
pub fn render_board(store: &Store) {
    if store.tasks.is_empty() {
        println!("No tasks on the board. Add one with 'tgb add'.");
        return;
    }

    let now = Clock::now();
    let header = format!("Board ({})", store.date.strftime("%b %d"));
    render_view_header(&header, store.tasks.len());

    for task in &store.tasks {
        render_task_line(task, now);
    }

    render_summary(&scoring::summarize(&store.tasks));
}

/// Render an archived day: same layout as the live board, but overdue
/// markers make no sense for a frozen snapshot, so a neutral "now" far
/// past midnight is used.
pub fn render_history_day(day: &HistoryDay) {
    let end_of_day = Clock::from_minutes(24 * 60);
    let header = day.date.strftime("%A, %b %d").to_string();
    render_view_header(&header, day.tasks.len());

    for task in &day.tasks {
        render_task_line(task, end_of_day);
    }

    render_summary(&scoring::summarize(&day.tasks));
}

/// Render the one-line-per-day history listing
pub fn render_history_list(store: &Store) {
    println!(
        "\n  {} ({} {})\n",
        "HISTORY".cyan().bold(),
        store.history.len(),
        if store.history.len() == 1 { "day" } else { "days" }
    );

    for (date, day) in &store.history {
        let summary = scoring::summarize(&day.tasks);
        println!(
            "  {}  {}",
            date.to_string().bold(),
            format!(
                "{} tasks  ·  {} done  ·  {} pts",
                day.tasks.len(),
                summary.done,
                summary.total
            )
            .dimmed()
        );
    }
    println!();
}

/// Render the favorites listing
pub fn render_favorites(favorites: &[Favorite]) {
    println!(
        "\n  {} ({})\n",
        "FAVORITES".cyan().bold(),
        favorites.len()
    );

    for favorite in favorites {
        let window = format_window(favorite.start, favorite.end);
        let mut meta = vec![format_priority(favorite.priority).to_string()];
        if !window.is_empty() {
            meta.insert(0, window);
        }
        println!(
            "  {} {}  {}",
            "•".green(),
            favorite.name.bold(),
            meta.join("  ·  ").dimmed()
        );
    }
    println!();
}

/// Render a view header with title and count
pub fn render_view_header(title: &str, count: usize) {
    let task_word = if count == 1 { "task" } else { "tasks" };
    println!("\n  {} ({} {})\n", title.cyan().bold(), count, task_word);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_overdue() {
        let mut task = Task {
            due: Clock::parse("11:30"),
            ..Task::default()
        };

        assert!(!is_overdue(&task, Clock::parse("11:30").unwrap()));
        assert!(is_overdue(&task, Clock::parse("11:31").unwrap()));

        task.completed_at = Clock::parse("11:00");
        assert!(!is_overdue(&task, Clock::parse("12:00").unwrap()));

        task.completed_at = None;
        task.due = None;
        assert!(!is_overdue(&task, Clock::parse("23:59").unwrap()));
    }

    #[test]
    fn test_format_window() {
        assert_eq!(
            format_window(Clock::parse("11:00"), Clock::parse("11:30")),
            "11:00–11:30"
        );
        assert_eq!(format_window(None, Clock::parse("11:30")), "–11:30");
        assert_eq!(format_window(None, None), "");
    }
}
