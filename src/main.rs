//! Contributor leaderboard reporting tool.
//!
//! Prints ranked contributor tables for rolling time windows by aggregating
//! `git log` output.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{warn, Level};

use gitboard::analysis::{window_report, AggregateOptions, GitCliProvider};
use gitboard::report::render_window;
use gitboard::{config, Error, ReportConfig};

#[derive(Parser)]
#[command(author, version, about = "Contributor leaderboards for Git repositories", long_about = None)]
struct Cli {
    /// Repository checkout to analyze
    #[arg(short, long, default_value = ".")]
    repo: PathBuf,

    /// Length of the short rolling window, in days
    #[arg(long, default_value_t = 7, value_name = "DAYS")]
    week_days: u32,

    /// Length of the long rolling window, in days
    #[arg(long, default_value_t = 30, value_name = "DAYS")]
    month_days: u32,

    /// Maximum contributors per leaderboard
    #[arg(short = 'n', long, default_value_t = 10, value_name = "N")]
    top: usize,

    /// Per-author query timeout in seconds
    #[arg(long, default_value_t = 30, value_name = "SECS")]
    timeout_secs: u64,

    /// Concurrent per-author queries (0 = auto-detect from CPU count)
    #[arg(short, long, default_value_t = 0)]
    jobs: usize,

    /// Emit the report as JSON instead of text tables
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn report_config(&self) -> ReportConfig {
        ReportConfig {
            repo: self.repo.clone(),
            week_days: self.week_days,
            month_days: self.month_days,
            max_contributors: self.top,
            query_timeout: Duration::from_secs(self.timeout_secs),
            jobs: if self.jobs == 0 {
                config::default_jobs()
            } else {
                self.jobs
            },
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Diagnostics go to stderr so stdout stays a clean report.
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.report_config();
    config.validate()?;

    let provider = Arc::new(GitCliProvider::open(&config.repo)?);

    // Ctrl-C abandons in-flight queries; the window being generated prints
    // nothing, windows already rendered stay on screen.
    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        });
    }

    let opts = AggregateOptions {
        jobs: config.jobs,
        query_timeout: config.query_timeout,
    };

    let now = Utc::now();
    let mut reports = Vec::new();
    for window in config.windows(now) {
        match window_report(
            Arc::clone(&provider),
            &window,
            &opts,
            config.max_contributors,
            &cancel,
        )
        .await
        {
            Ok(report) => {
                if cli.json {
                    reports.push(report);
                } else {
                    print!("{}", render_window(&report));
                    println!();
                }
            }
            Err(Error::Cancelled) => {
                warn!("cancelled, skipping remaining windows");
                break;
            }
            Err(error) => return Err(error.into()),
        }
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }

    Ok(())
}
