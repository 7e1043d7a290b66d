//! Error types shared across the crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while configuring or generating a report.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid settings supplied on the command line.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The target path is not inside a Git repository.
    #[error("not a git repository: {}", path.display())]
    Repository {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },

    /// A history query against the git tool failed.
    #[error("git query failed: {0}")]
    Query(String),

    /// Report generation was cancelled before the window completed.
    #[error("report generation cancelled")]
    Cancelled,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
