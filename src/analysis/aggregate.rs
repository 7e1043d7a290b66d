//! Per-author aggregation over a bounded worker pool.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::sync::Semaphore;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::analysis::identity::{resolve_identities, ResolvedAuthor};
use crate::analysis::provider::HistoryProvider;
use crate::analysis::rank::rank;
use crate::error::{Error, Result};
use crate::types::{AuthorTotals, Metric, Window, WindowReport};

/// Tunables for one aggregation pass.
#[derive(Clone, Debug)]
pub struct AggregateOptions {
    /// Upper bound on concurrent per-author query pairs
    pub jobs: usize,
    /// Budget for one author's diff-stat and file queries combined
    pub query_timeout: Duration,
}

/// Collect per-author totals for every distinct identity in the window.
///
/// Commit counts come from the identity-resolution pass; the diff-stat and
/// touched-file queries fan out per author, gated by a semaphore sized to
/// `opts.jobs`. A query that fails or exceeds its budget degrades that
/// author to zero-valued totals with a warning. Cancellation abandons the
/// window as a whole.
pub async fn collect_totals<P>(
    provider: Arc<P>,
    window: &Window,
    opts: &AggregateOptions,
    cancel: &CancellationToken,
) -> Result<Vec<AuthorTotals>>
where
    P: HistoryProvider + ?Sized + 'static,
{
    if cancel.is_cancelled() {
        return Err(Error::Cancelled);
    }

    let records = provider.commit_authors(window).await?;
    let authors = resolve_identities(&records);
    debug!(
        window = %window.label,
        commits = records.len(),
        authors = authors.len(),
        "resolved identities"
    );

    let semaphore = Arc::new(Semaphore::new(opts.jobs.max(1)));
    let mut handles = Vec::with_capacity(authors.len());

    for author in authors {
        let provider = Arc::clone(&provider);
        let semaphore = Arc::clone(&semaphore);
        let window = window.clone();
        let cancel = cancel.clone();
        let budget = opts.query_timeout;

        handles.push(tokio::spawn(async move {
            let _permit = match semaphore.acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => return None,
            };
            tokio::select! {
                _ = cancel.cancelled() => None,
                totals = author_totals(provider.as_ref(), author, &window, budget) => Some(totals),
            }
        }));
    }

    // join_all preserves spawn order, so totals come back in first-seen
    // identity order regardless of which worker finishes first.
    let results = join_all(handles).await;
    if cancel.is_cancelled() {
        return Err(Error::Cancelled);
    }

    let mut totals = Vec::with_capacity(results.len());
    for handle in results {
        match handle {
            Ok(Some(t)) => totals.push(t),
            Ok(None) => return Err(Error::Cancelled),
            Err(error) => warn!(%error, "per-author worker failed to join"),
        }
    }
    Ok(totals)
}

/// Resolve one author's totals, degrading to zeros on failure or timeout.
async fn author_totals<P>(
    provider: &P,
    author: ResolvedAuthor,
    window: &Window,
    budget: Duration,
) -> AuthorTotals
where
    P: HistoryProvider + ?Sized,
{
    let mut totals = AuthorTotals::new(author.identity, author.commits);
    let email = totals.identity.email.clone();

    let queries = async {
        let stats = provider.author_diff_stats(&email, window).await?;
        let files = provider.author_touched_files(&email, window).await?;
        Ok::<_, Error>((stats, files))
    };

    match timeout(budget, queries).await {
        Ok(Ok((stats, files))) => {
            totals.lines_added = stats.lines_added;
            totals.lines_deleted = stats.lines_deleted;
            totals.files = files;
        }
        Ok(Err(error)) => {
            warn!(author = %email, %error, "history query failed, counting author as zero");
        }
        Err(_) => {
            warn!(author = %email, budget = ?budget, "history query timed out, counting author as zero");
        }
    }
    totals
}

/// Build the full report for one window: totals plus all three leaderboards.
pub async fn window_report<P>(
    provider: Arc<P>,
    window: &Window,
    opts: &AggregateOptions,
    top: usize,
    cancel: &CancellationToken,
) -> Result<WindowReport>
where
    P: HistoryProvider + ?Sized + 'static,
{
    let totals = collect_totals(provider, window, opts, cancel).await?;
    Ok(WindowReport {
        window: window.clone(),
        commits: rank(&totals, Metric::Commits, top),
        lines: rank(&totals, Metric::LinesChanged, top),
        files: rank(&totals, Metric::FilesChanged, top),
    })
}
