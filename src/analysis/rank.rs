//! Leaderboard ranking.

use crate::types::{AuthorTotals, Leaderboard, LeaderboardEntry, Metric};

/// Rank totals by one metric, descending, truncated to the first `top`
/// entries.
///
/// Ties are broken by canonical display name ascending, then by email, so
/// identical history always yields byte-identical output.
pub fn rank(totals: &[AuthorTotals], metric: Metric, top: usize) -> Leaderboard {
    let mut rows: Vec<&AuthorTotals> = totals.iter().collect();
    rows.sort_by(|a, b| {
        metric_value(b, metric)
            .cmp(&metric_value(a, metric))
            .then_with(|| a.identity.name.cmp(&b.identity.name))
            .then_with(|| a.identity.email.cmp(&b.identity.email))
    });

    let entries = rows
        .into_iter()
        .take(top)
        .enumerate()
        .map(|(i, totals)| LeaderboardEntry {
            rank: i + 1,
            name: totals.identity.name.clone(),
            value: metric_value(totals, metric),
            lines_added: totals.lines_added,
            lines_deleted: totals.lines_deleted,
        })
        .collect();

    Leaderboard { metric, entries }
}

fn metric_value(totals: &AuthorTotals, metric: Metric) -> usize {
    match metric {
        Metric::Commits => totals.commits,
        Metric::LinesChanged => totals.lines_changed(),
        Metric::FilesChanged => totals.files_touched(),
    }
}
