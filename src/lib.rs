//! # Git Contributor Leaderboards
//!
//! `gitboard` builds ranked contributor leaderboards for a Git repository
//! over rolling time windows. For each window it reports the top
//! contributors by commit count, by total lines changed, and by distinct
//! files touched, aggregated from the output of `git log`.
//!
//! ## Features
//!
//! - Per-window leaderboards for commits, lines changed, and files changed
//! - Author identities collapsed by email with a stable canonical name
//! - Bounded concurrent per-author queries with timeouts
//! - Deterministic ranking: descending by metric, ties broken by name
//! - Fixed-width text tables or JSON output
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use gitboard::analysis::{window_report, AggregateOptions, GitCliProvider};
//! use gitboard::{ReportConfig, Window};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn demo() -> gitboard::Result<()> {
//! let config = ReportConfig::default();
//! let provider = Arc::new(GitCliProvider::open(&config.repo)?);
//! let window = Window::last_days("Past 7 days", 7, chrono::Utc::now());
//! let opts = AggregateOptions {
//!     jobs: config.jobs,
//!     query_timeout: config.query_timeout,
//! };
//!
//! let report = window_report(
//!     provider,
//!     &window,
//!     &opts,
//!     config.max_contributors,
//!     &CancellationToken::new(),
//! )
//! .await?;
//! print!("{}", gitboard::report::render_window(&report));
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod report;
pub mod types;

// Re-export main types for convenience
pub use config::ReportConfig;
pub use error::{Error, Result};
pub use types::{
    AuthorIdentity, AuthorTotals, Leaderboard, LeaderboardEntry, Metric, Window, WindowReport,
};
