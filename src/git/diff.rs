use crate::error::GitError;
use crate::git::parser::{self, FileChange, REFS_HEADS};
use crate::git::repository::Repository;
use crate::git::runner::CommandRunner;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Wide enough that git never abbreviates long paths
const STAT_WIDTH: &str = "--stat-width=99999";

const MISSING_BRANCH_MESSAGE: &str = "exit status 128, repository or branch does not exist";

/// Result of diffing two branches
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    pub source_branch: String,
    pub target_branch: String,
    /// Falls back to `source_branch` when the head cannot be resolved
    pub source_commit_id: String,
    /// Falls back to `target_branch` when the head cannot be resolved
    pub target_commit_id: String,
    pub changes: Vec<FileChange>,
    /// Trailing line such as "3 files changed, 10 insertions(+)"
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DiffSummary {
    pub fn binary_changes(&self) -> impl Iterator<Item = &FileChange> {
        self.changes.iter().filter(|c| c.is_binary)
    }
}

/// A failed diff.
///
/// Carries the partially filled summary alongside the git error. For an
/// exit-status-128 failure `summary.error` holds a descriptive message as
/// well, so both channels report it.
#[derive(Debug, Error)]
#[error("{source}")]
pub struct DiffFailure {
    pub summary: Box<DiffSummary>,
    pub source: GitError,
}

#[derive(Debug, Clone, Default)]
pub struct DiffOptions {
    pub timeout: Option<Duration>,
}

impl<R: CommandRunner> Repository<R> {
    /// Diff-stat between two branches plus the commit IDs of both heads
    pub fn diff_branches(
        &self,
        source: &str,
        target: &str,
        opts: &DiffOptions,
    ) -> std::result::Result<DiffSummary, DiffFailure> {
        let mut summary = DiffSummary {
            source_branch: source.to_string(),
            target_branch: target.to_string(),
            ..Default::default()
        };

        let output = match self.git(&["diff", source, target, "--stat", STAT_WIDTH], opts.timeout) {
            Ok(output) => output,
            Err(err) => {
                if matches!(err, GitError::Fatal(_)) {
                    summary.error = Some(MISSING_BRANCH_MESSAGE.to_string());
                }
                return Err(DiffFailure {
                    summary: Box::new(summary),
                    source: err,
                });
            }
        };

        summary.source_commit_id = self.head_commit_id_or_name(source, opts.timeout);
        summary.target_commit_id = self.head_commit_id_or_name(target, opts.timeout);

        match parser::parse_diff_stat(&output) {
            Ok(stat) => {
                summary.changes = stat.changes;
                summary.summary = stat.summary;
                Ok(summary)
            }
            Err(err) => Err(DiffFailure {
                summary: Box::new(summary),
                source: err,
            }),
        }
    }

    /// Head commit of `branch`, or the branch name itself when lookup fails.
    ///
    /// `show-ref` matches on ref-name tails, so `main` also lists
    /// `refs/heads/feature/main`; only the exact refspec counts.
    fn head_commit_id_or_name(&self, branch: &str, timeout: Option<Duration>) -> String {
        let refspec = format!("{}{}", REFS_HEADS, branch);

        self.git(&["show-ref", "--heads", branch], timeout)
            .ok()
            .and_then(|output| parser::parse_show_ref(&output).ok())
            .and_then(|refs| refs.into_iter().find(|r| r.refspec == refspec))
            .map(|r| r.id)
            .unwrap_or_else(|| branch.to_string())
    }
}
