//! # Common Types
//!
//! This module contains the common types used throughout the crate for
//! representing contribution windows, author identities, per-author totals,
//! and ranked leaderboard entries.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// A half-open time interval `[since, now)` used to scope history queries.
///
/// Windows are independent per report and computed relative to the moment
/// the report is generated.
#[derive(Clone, Debug, Serialize)]
pub struct Window {
    /// Human-readable label, e.g. "Past 7 days"
    pub label: String,
    /// Lower bound of the interval
    pub since: DateTime<Utc>,
}

impl Window {
    pub fn new(label: impl Into<String>, since: DateTime<Utc>) -> Self {
        Self {
            label: label.into(),
            since,
        }
    }

    /// Window covering the last `days` days before `now`.
    pub fn last_days(label: impl Into<String>, days: i64, now: DateTime<Utc>) -> Self {
        Self::new(label, now - Duration::days(days))
    }

    /// The lower bound formatted for git's `--since` argument.
    pub fn since_arg(&self) -> String {
        self.since.format("%Y-%m-%d %H:%M:%S %z").to_string()
    }
}

/// A stable contributor key: an email address plus the canonical display
/// name chosen for it.
///
/// Two history records with the same email are the same author even when
/// their display names differ; the canonical name is the first one seen in
/// history order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AuthorIdentity {
    /// Canonical display name for this contributor
    pub name: String,
    /// Email address, compared case-sensitively
    pub email: String,
}

/// Aggregate diff statistics for one author within a window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DiffTotals {
    /// Number of file changes across the author's non-merge commits
    pub files_changed: usize,
    /// Total lines added
    pub lines_added: usize,
    /// Total lines deleted
    pub lines_deleted: usize,
}

/// Per-author accumulator for one window.
///
/// Created when an identity is first seen in the window, filled in by the
/// per-author history queries, and discarded once the report is rendered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorTotals {
    pub identity: AuthorIdentity,
    /// Number of non-merge commits by this author in the window
    pub commits: usize,
    pub lines_added: usize,
    pub lines_deleted: usize,
    /// Distinct file paths touched by this author in the window
    pub files: BTreeSet<String>,
}

impl AuthorTotals {
    pub fn new(identity: AuthorIdentity, commits: usize) -> Self {
        Self {
            identity,
            commits,
            lines_added: 0,
            lines_deleted: 0,
            files: BTreeSet::new(),
        }
    }

    /// Total lines changed (added + deleted).
    pub fn lines_changed(&self) -> usize {
        self.lines_added + self.lines_deleted
    }

    /// Number of distinct files touched.
    pub fn files_touched(&self) -> usize {
        self.files.len()
    }
}

/// The metric a leaderboard ranks by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Commits,
    LinesChanged,
    FilesChanged,
}

impl Metric {
    /// Section title printed above the sub-table.
    pub fn title(self) -> &'static str {
        match self {
            Metric::Commits => "Top contributors by commits",
            Metric::LinesChanged => "Top contributors by lines changed",
            Metric::FilesChanged => "Top contributors by files changed",
        }
    }

    /// Heading for the value column.
    pub fn value_heading(self) -> &'static str {
        match self {
            Metric::Commits => "Commits",
            Metric::LinesChanged => "Lines",
            Metric::FilesChanged => "Files",
        }
    }
}

/// One row of a ranked leaderboard.
///
/// Rank is 1-based and assigned after sorting. Ties are broken by canonical
/// display name ascending so repeated runs over identical history produce
/// identical output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub name: String,
    pub value: usize,
    /// Added/deleted breakdown, meaningful for the lines-changed metric
    pub lines_added: usize,
    pub lines_deleted: usize,
}

/// A ranked, truncated list of contributors for one metric.
#[derive(Clone, Debug, Serialize)]
pub struct Leaderboard {
    pub metric: Metric,
    pub entries: Vec<LeaderboardEntry>,
}

/// All three leaderboards for one window.
#[derive(Clone, Debug, Serialize)]
pub struct WindowReport {
    pub window: Window,
    pub commits: Leaderboard,
    pub lines: Leaderboard,
    pub files: Leaderboard,
}
