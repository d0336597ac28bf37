pub mod audit;
pub mod config;
pub mod error;
pub mod git;

// Re-export commonly used types for convenience
pub use error::{AppError, GitError, Result};
pub use git::{
    CommandRunner, DiffFailure, DiffSummary, FileChange, GitExecutor, GitVersion, Reference,
    Repository,
};
