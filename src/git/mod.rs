pub mod diff;
pub mod executor;
pub mod parser;
pub mod reference;
pub mod repository;
pub mod runner;
pub mod version;

#[cfg(test)]
pub(crate) mod fake;

// Re-export commonly used types
pub use diff::{DiffFailure, DiffOptions, DiffSummary};
pub use executor::{CommandOutput, DEFAULT_TIMEOUT, GitExecutor};
pub use parser::{
    DiffStat, FileChange, REFS_HEADS, REFS_TAGS, Reference, parse_diff_stat, parse_show_ref,
    parse_verify_output, ref_short_name,
};
pub use reference::{
    CreateBranchOptions, DeleteBranchOptions, ShowRefOptions, SymbolicRefOptions, VerifyOptions,
};
pub use repository::Repository;
pub use runner::{CommandRunner, classify_failure};
pub use version::GitVersion;
