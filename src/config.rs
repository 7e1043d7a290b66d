//! Report configuration and window construction.

use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};
use crate::types::Window;

/// Validated settings for one report run.
#[derive(Clone, Debug)]
pub struct ReportConfig {
    /// Path to the repository checkout
    pub repo: PathBuf,
    /// Length of the short rolling window, in days
    pub week_days: u32,
    /// Length of the long rolling window, in days
    pub month_days: u32,
    /// Maximum number of contributors per leaderboard
    pub max_contributors: usize,
    /// Budget for one author's history queries
    pub query_timeout: Duration,
    /// Upper bound on concurrent per-author queries
    pub jobs: usize,
}

impl ReportConfig {
    /// Check the bounds that flag parsing alone cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.max_contributors == 0 {
            return Err(Error::Config("--top must be at least 1".into()));
        }
        if self.week_days == 0 || self.month_days == 0 {
            return Err(Error::Config("window lengths must be at least 1 day".into()));
        }
        if self.jobs == 0 {
            return Err(Error::Config("--jobs must be at least 1".into()));
        }
        if self.query_timeout.is_zero() {
            return Err(Error::Config("--timeout-secs must be at least 1".into()));
        }
        Ok(())
    }

    /// The rolling windows this report covers, relative to `now`.
    pub fn windows(&self, now: DateTime<Utc>) -> Vec<Window> {
        vec![
            Window::last_days(
                format!("Past {} days", self.week_days),
                i64::from(self.week_days),
                now,
            ),
            Window::last_days(
                format!("Past {} days", self.month_days),
                i64::from(self.month_days),
                now,
            ),
        ]
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            repo: PathBuf::from("."),
            week_days: 7,
            month_days: 30,
            max_contributors: 10,
            query_timeout: Duration::from_secs(30),
            jobs: default_jobs(),
        }
    }
}

/// Default worker pool size based on system resources.
///
/// Uses 75% of the available CPUs, leaving room for the git subprocesses the
/// workers spawn.
pub fn default_jobs() -> usize {
    (num_cpus::get() * 3 / 4).max(1)
}
