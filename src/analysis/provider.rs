//! History queries backed by the `git` command-line tool.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::{DiffTotals, Window};

/// Read-only history queries the aggregator needs from a version-control
/// provider.
///
/// All three queries exclude merge commits and are scoped to a window. The
/// production implementation shells out to `git`; tests substitute an
/// in-memory mock.
#[async_trait]
pub trait HistoryProvider: Send + Sync {
    /// `(display name, email)` for every non-merge commit in the window, in
    /// history order.
    async fn commit_authors(&self, window: &Window) -> Result<Vec<(String, String)>>;

    /// Aggregate diff statistics across one author's non-merge commits in
    /// the window.
    async fn author_diff_stats(&self, email: &str, window: &Window) -> Result<DiffTotals>;

    /// Distinct file paths modified by one author's non-merge commits in the
    /// window.
    async fn author_touched_files(&self, email: &str, window: &Window)
        -> Result<BTreeSet<String>>;
}

/// `HistoryProvider` backed by `git log` subprocess invocations.
pub struct GitCliProvider {
    workdir: PathBuf,
    /// Repository has no commits yet; queries short-circuit to empty results
    empty: bool,
}

impl GitCliProvider {
    /// Open a provider for the repository containing `path`.
    ///
    /// Fails when the path is not inside a Git repository, so a bad `--repo`
    /// aborts the run before any worker is spawned.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let repo = git2::Repository::discover(path).map_err(|source| Error::Repository {
            path: path.to_path_buf(),
            source,
        })?;
        let empty = repo.is_empty().map_err(|source| Error::Repository {
            path: path.to_path_buf(),
            source,
        })?;
        let workdir = repo
            .workdir()
            .unwrap_or_else(|| repo.path())
            .to_path_buf();
        Ok(Self { workdir, empty })
    }

    /// Run `git log --no-merges` scoped to the window with extra arguments,
    /// returning stdout.
    async fn git_log(&self, window: &Window, args: &[&str]) -> Result<String> {
        let since = format!("--since={}", window.since_arg());
        let mut cmd = Command::new("git");
        cmd.arg("-C")
            .arg(&self.workdir)
            .arg("log")
            .arg("--no-merges")
            .arg(&since)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        debug!(repo = %self.workdir.display(), ?args, "running git log");
        let output = cmd.output().await?;
        if !output.status.success() {
            return Err(Error::Query(format!(
                "git log exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl HistoryProvider for GitCliProvider {
    async fn commit_authors(&self, window: &Window) -> Result<Vec<(String, String)>> {
        if self.empty {
            return Ok(Vec::new());
        }
        let out = self.git_log(window, &["--format=%an%x09%ae"]).await?;
        let mut authors = Vec::new();
        for line in out.lines() {
            if line.is_empty() {
                continue;
            }
            let (name, email) = line.rsplit_once('\t').unwrap_or((line, ""));
            authors.push((name.trim().to_string(), email.trim().to_string()));
        }
        Ok(authors)
    }

    async fn author_diff_stats(&self, email: &str, window: &Window) -> Result<DiffTotals> {
        if self.empty {
            return Ok(DiffTotals::default());
        }
        let author = author_arg(email);
        let out = self
            .git_log(window, &[&author, "--format=", "--numstat"])
            .await?;
        Ok(parse_numstat(&out))
    }

    async fn author_touched_files(
        &self,
        email: &str,
        window: &Window,
    ) -> Result<BTreeSet<String>> {
        if self.empty {
            return Ok(BTreeSet::new());
        }
        let author = author_arg(email);
        let out = self
            .git_log(window, &[&author, "--format=", "--name-only"])
            .await?;
        Ok(out
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect())
    }
}

/// Build an `--author` filter that matches one email exactly.
///
/// git matches the pattern as a regex against the whole author header, so
/// the email is escaped and anchored with the `<...>` delimiters.
fn author_arg(email: &str) -> String {
    let mut escaped = String::with_capacity(email.len());
    for c in email.chars() {
        if "\\.+*?()[]{}|^$".contains(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    format!("--author=<{}>", escaped)
}

/// Sum a `git log --numstat` body into aggregate totals.
///
/// Binary files report `-` for both counts; they contribute no line changes
/// but still count as file changes. An empty body (rename-only history, or
/// no commits) sums to zero.
fn parse_numstat(output: &str) -> DiffTotals {
    let mut totals = DiffTotals::default();
    for line in output.lines() {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 3 {
            continue;
        }
        totals.lines_added += fields[0].parse::<usize>().unwrap_or(0);
        totals.lines_deleted += fields[1].parse::<usize>().unwrap_or(0);
        totals.files_changed += 1;
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn numstat_sums_line_counts() {
        let body = "10\t2\tsrc/main.rs\n3\t0\tREADME.md\n";
        let totals = parse_numstat(body);
        assert_eq!(
            totals,
            DiffTotals {
                files_changed: 2,
                lines_added: 13,
                lines_deleted: 2,
            }
        );
    }

    #[test]
    fn numstat_empty_body_is_zero() {
        assert_eq!(parse_numstat(""), DiffTotals::default());
    }

    #[test]
    fn numstat_binary_files_count_as_changes() {
        let body = "-\t-\tassets/logo.png\n5\t1\tsrc/lib.rs\n";
        let totals = parse_numstat(body);
        assert_eq!(totals.files_changed, 2);
        assert_eq!(totals.lines_added, 5);
        assert_eq!(totals.lines_deleted, 1);
    }

    #[test]
    fn numstat_skips_malformed_lines() {
        let body = "not a stat line\n7\t7\tsrc/lib.rs\n";
        let totals = parse_numstat(body);
        assert_eq!(totals.files_changed, 1);
        assert_eq!(totals.lines_added, 7);
    }

    #[test]
    fn author_arg_escapes_regex_metacharacters() {
        assert_eq!(author_arg("a.b+c@x.com"), "--author=<a\\.b\\+c@x\\.com>");
    }
}
