//! Terminal rendering of boards, tasks and outcomes.

use comfy_table::{presets::UTF8_FULL, Table};
use taskboard::{Board, Outcome, Task};

/// Maximum title length in the board table before truncation.
const MAX_TITLE_LENGTH: usize = 32;

/// The board as a table, one table column per board column
pub fn board_table(board: &Board) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(
        board
            .columns()
            .iter()
            .map(|c| format!("{} ({})", c.title(), c.len()))
            .collect::<Vec<_>>(),
    );

    let rows = board.columns().iter().map(|c| c.len()).max().unwrap_or(0);
    for row in 0..rows {
        table.add_row(
            board
                .columns()
                .iter()
                .map(|c| c.cards().get(row).map(card_label).unwrap_or_default())
                .collect::<Vec<_>>(),
        );
    }
    table
}

/// One-line card label: `#id title (due)`
pub fn card_label(task: &Task) -> String {
    let title = truncate(&task.title, MAX_TITLE_LENGTH);
    if task.due_date.is_empty() {
        format!("#{} {}", task.id, title)
    } else {
        format!("#{} {} (due {})", task.id, title, task.due_date)
    }
}

/// Multi-line detail view of a task
pub fn task_detail(task: &Task) -> String {
    let mut out = format!("#{} {}\n\n", task.id, task.title);
    out.push_str(&format!("  Status:    {}\n", task.status));
    out.push_str(&format!("  Start:     {}\n", task.start_date));
    out.push_str(&format!("  Due:       {}\n", task.due_date));
    if let Some(version) = task.version {
        out.push_str(&format!("  Version:   {}\n", version));
    }
    if let Some(condition) = task.condition.as_deref().filter(|c| !c.is_empty()) {
        out.push_str(&format!("  Condition: {}\n", condition));
    }
    if let Some(memo) = task.memo.as_deref().filter(|m| !m.is_empty()) {
        out.push_str("\n--- Memo ---\n");
        out.push_str(memo);
        out.push('\n');
    }
    out
}

/// Human-readable outcome of a gesture or delete
pub fn describe(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Unchanged => "no change".to_string(),
        Outcome::Reordered { column, from, to } => {
            format!("reordered {}: position {} -> {}", column, from, to)
        }
        Outcome::Moved { card, from, to } => format!("moved #{}: {} -> {}", card, from, to),
        Outcome::Deleted { card, column } => format!("deleted #{} from {}", card, column),
        Outcome::Failed(notice) => format!("notice: {}", notice),
    }
}

/// Truncate to max length with ellipsis, on a char boundary.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
