//! Fixed-width text tables for leaderboards.
//!
//! Rendering is pure: entries in, `String` out, no I/O.

use crate::types::{Leaderboard, LeaderboardEntry, Metric, WindowReport};

/// Rendered width of the contributor name column.
const NAME_WIDTH: usize = 30;

/// Render one window's section: header line plus the three sub-tables.
pub fn render_window(report: &WindowReport) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "=== {} (since {}) ===\n\n",
        report.window.label,
        report.window.since.format("%Y-%m-%d")
    ));
    out.push_str(&render_leaderboard(&report.commits));
    out.push('\n');
    out.push_str(&render_leaderboard(&report.lines));
    out.push('\n');
    out.push_str(&render_leaderboard(&report.files));
    out
}

/// Render one metric's sub-table.
pub fn render_leaderboard(board: &Leaderboard) -> String {
    let mut out = String::new();
    out.push_str(board.metric.title());
    out.push('\n');

    if board.entries.is_empty() {
        out.push_str("  (no contributors in this window)\n");
        return out;
    }

    out.push_str(&header_row(board.metric));
    for entry in &board.entries {
        out.push_str(&entry_row(board.metric, entry));
    }
    out
}

fn header_row(metric: Metric) -> String {
    let mut row = format!(
        "{:>4}  {:<width$}  {:>8}",
        "#",
        "Author",
        metric.value_heading(),
        width = NAME_WIDTH
    );
    if metric == Metric::LinesChanged {
        row.push_str("  (+added/-deleted)");
    }
    row.push('\n');
    row
}

fn entry_row(metric: Metric, entry: &LeaderboardEntry) -> String {
    let mut row = format!(
        "{:>4}  {:<width$}  {:>8}",
        entry.rank,
        truncate_name(&entry.name, NAME_WIDTH),
        entry.value,
        width = NAME_WIDTH
    );
    if metric == Metric::LinesChanged {
        row.push_str(&format!("  (+{}/-{})", entry.lines_added, entry.lines_deleted));
    }
    row.push('\n');
    row
}

/// Truncate a display name to `width` visible characters, marking the cut
/// with `…`.
///
/// Operates on characters, not bytes, so multibyte names never split
/// mid-codepoint.
fn truncate_name(name: &str, width: usize) -> String {
    if name.chars().count() <= width {
        return name.to_string();
    }
    let mut truncated: String = name.chars().take(width.saturating_sub(1)).collect();
    truncated.push('…');
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Window;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn entry(rank: usize, name: &str, value: usize, added: usize, deleted: usize) -> LeaderboardEntry {
        LeaderboardEntry {
            rank,
            name: name.to_string(),
            value,
            lines_added: added,
            lines_deleted: deleted,
        }
    }

    fn board(metric: Metric, entries: Vec<LeaderboardEntry>) -> Leaderboard {
        Leaderboard { metric, entries }
    }

    #[test]
    fn commit_table_lays_out_fixed_columns() {
        let rendered = render_leaderboard(&board(
            Metric::Commits,
            vec![entry(1, "Alice", 5, 40, 10), entry(2, "Bob", 2, 5, 0)],
        ));
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "Top contributors by commits");
        assert_eq!(lines[1], format!("{:>4}  {:<30}  {:>8}", "#", "Author", "Commits"));
        assert_eq!(lines[2], format!("{:>4}  {:<30}  {:>8}", 1, "Alice", 5));
        assert_eq!(lines[3], format!("{:>4}  {:<30}  {:>8}", 2, "Bob", 2));
    }

    #[test]
    fn lines_table_includes_breakdown_column() {
        let rendered = render_leaderboard(&board(
            Metric::LinesChanged,
            vec![entry(1, "Alice", 50, 40, 10)],
        ));

        assert!(rendered.contains("(+added/-deleted)"));
        assert!(rendered.contains("(+40/-10)"));
    }

    #[test]
    fn empty_board_renders_no_data_marker() {
        let rendered = render_leaderboard(&board(Metric::FilesChanged, vec![]));
        assert_eq!(
            rendered,
            "Top contributors by files changed\n  (no contributors in this window)\n"
        );
    }

    #[test]
    fn long_names_truncate_with_ellipsis() {
        let long = "An Extremely Long Contributor Name That Overflows";
        let rendered = render_leaderboard(&board(Metric::Commits, vec![entry(1, long, 1, 0, 0)]));

        assert!(rendered.contains('…'));
        assert!(!rendered.contains(long));
    }

    #[test]
    fn truncation_is_character_safe() {
        let name: String = "렌".repeat(40);
        let truncated = truncate_name(&name, 30);
        assert_eq!(truncated.chars().count(), 30);
        assert!(truncated.ends_with('…'));

        let short = "渋谷";
        assert_eq!(truncate_name(short, 30), short);
    }

    #[test]
    fn window_section_names_label_and_since_date() {
        let since = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let report = WindowReport {
            window: Window::new("Past 7 days", since),
            commits: board(Metric::Commits, vec![]),
            lines: board(Metric::LinesChanged, vec![]),
            files: board(Metric::FilesChanged, vec![]),
        };

        let rendered = render_window(&report);
        assert!(rendered.starts_with("=== Past 7 days (since 2024-03-01) ===\n"));
        assert_eq!(
            rendered.matches("(no contributors in this window)").count(),
            3
        );
    }

    #[test]
    fn rendering_is_deterministic() {
        let b = board(Metric::Commits, vec![entry(1, "Alice", 5, 0, 0)]);
        assert_eq!(render_leaderboard(&b), render_leaderboard(&b));
    }
}
