use std::io;
use std::time::Duration;
use thiserror::Error;

use crate::config::settings::ConfigError;
use crate::git::diff::DiffFailure;

/// Errors that can occur during git operations
#[derive(Debug, Error)]
pub enum GitError {
    #[error("Not a git repository")]
    NotARepository,

    #[error("Reference does not exist: {0}")]
    ReferenceNotFound(String),

    /// Git exited with status 128, its generic "bad repository or revision" code
    #[error("Git command failed with exit status 128: {0}")]
    Fatal(String),

    #[error("Git command failed: {0}")]
    CommandFailed(String),

    #[error("Git command timed out after {0:?}")]
    Timeout(Duration),

    #[error("Failed to parse git output: {0}")]
    ParseError(String),

    #[error("Git version {0} is too old. Minimum required: 2.20")]
    GitVersionTooOld(String),

    #[error("Failed to detect git version: {0}")]
    GitVersionDetectionFailed(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

impl GitError {
    /// True when the error means the reference is simply absent
    pub fn is_not_found(&self) -> bool {
        matches!(self, GitError::ReferenceNotFound(_))
    }
}

/// Top-level application error used by the binary
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Git error: {0}")]
    Git(#[from] GitError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Diff error: {0}")]
    Diff(#[from] DiffFailure),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for git operations
pub type GitResult<T> = std::result::Result<T, GitError>;

pub type Result<T> = GitResult<T>;

/// Result type for application-level operations
pub type AppResult<T> = std::result::Result<T, AppError>;
