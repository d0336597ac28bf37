use crate::error::Result;
use crate::git::executor::GitExecutor;
use crate::git::parser::{self, REFS_HEADS, REFS_TAGS, Reference};
use crate::git::repository::Repository;
use crate::git::runner::CommandRunner;
use std::path::Path;
use std::time::Duration;

/// Options for verifying a single reference (`git show-ref --verify`)
#[derive(Debug, Clone, Default)]
pub struct VerifyOptions {
    /// Falls back to the runner's default when `None`
    pub timeout: Option<Duration>,
}

/// Options for reading or updating a symbolic ref
#[derive(Debug, Clone)]
pub struct SymbolicRefOptions {
    /// Name of the symbolic ref. Defaults to `HEAD`.
    pub name: String,
    /// When set, the symbolic ref is pointed at this reference instead of read
    pub target: Option<String>,
    pub timeout: Option<Duration>,
}

impl Default for SymbolicRefOptions {
    fn default() -> Self {
        Self {
            name: "HEAD".to_string(),
            target: None,
            timeout: None,
        }
    }
}

/// Filters for listing references (`git show-ref`)
#[derive(Debug, Clone, Default)]
pub struct ShowRefOptions {
    pub heads: bool,
    pub tags: bool,
    pub patterns: Vec<String>,
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone, Default)]
pub struct CreateBranchOptions {
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone, Default)]
pub struct DeleteBranchOptions {
    /// Delete even when the branch is not fully merged
    pub force: bool,
    pub timeout: Option<Duration>,
}

impl<R: CommandRunner> Repository<R> {
    /// Commit ID of a fully qualified reference, e.g. `refs/heads/main`.
    ///
    /// Fails with `GitError::ReferenceNotFound` when git reports the
    /// reference is not valid; other failures are returned untouched.
    pub fn resolve_ref(&self, refspec: &str, opts: &VerifyOptions) -> Result<String> {
        let output = self.git(&["show-ref", "--verify", refspec], opts.timeout)?;
        Ok(parser::parse_verify_output(&output))
    }

    /// Whether the fully qualified reference resolves
    pub fn has_reference(&self, refspec: &str, opts: &VerifyOptions) -> bool {
        self.resolve_ref(refspec, opts).is_ok()
    }

    /// Commit ID of a branch given by short name, e.g. `main`
    pub fn branch_commit_id(&self, branch: &str, opts: &VerifyOptions) -> Result<String> {
        self.resolve_ref(&format!("{}{}", REFS_HEADS, branch), opts)
    }

    /// Commit ID of a tag given by short name, e.g. `v1.0.0`
    pub fn tag_commit_id(&self, tag: &str, opts: &VerifyOptions) -> Result<String> {
        self.resolve_ref(&format!("{}{}", REFS_TAGS, tag), opts)
    }

    pub fn has_branch(&self, branch: &str, opts: &VerifyOptions) -> bool {
        self.has_reference(&format!("{}{}", REFS_HEADS, branch), opts)
    }

    pub fn has_tag(&self, tag: &str, opts: &VerifyOptions) -> bool {
        self.has_reference(&format!("{}{}", REFS_TAGS, tag), opts)
    }

    /// Read a symbolic ref, or update it when `opts.target` is set.
    ///
    /// Returns the trimmed target refspec for a read and an empty string
    /// for an update.
    pub fn symbolic_ref(&self, opts: &SymbolicRefOptions) -> Result<String> {
        let name = if opts.name.is_empty() { "HEAD" } else { opts.name.as_str() };

        let mut args = vec!["symbolic-ref", name];
        if let Some(target) = opts.target.as_deref().filter(|t| !t.is_empty()) {
            args.push(target);
        }

        let output = self.git(&args, opts.timeout)?;
        Ok(output.trim().to_string())
    }

    /// Point the symbolic ref named in `opts` (default `HEAD`) at `target`
    pub fn set_symbolic_ref(&self, target: &str, opts: &SymbolicRefOptions) -> Result<()> {
        let opts = SymbolicRefOptions {
            target: Some(target.to_string()),
            ..opts.clone()
        };
        self.symbolic_ref(&opts).map(|_| ())
    }

    /// List references matching the filter, in the order git prints them
    pub fn show_ref(&self, opts: &ShowRefOptions) -> Result<Vec<Reference>> {
        let mut args = vec!["show-ref"];
        if opts.heads {
            args.push("--heads");
        }
        if opts.tags {
            args.push("--tags");
        }
        args.push("--");
        args.extend(opts.patterns.iter().map(String::as_str));

        let output = self.git(&args, opts.timeout)?;
        parser::parse_show_ref(&output)
    }

    /// Short names of all local branches
    pub fn branches(&self) -> Result<Vec<String>> {
        let heads = self.show_ref(&ShowRefOptions {
            heads: true,
            ..Default::default()
        })?;

        Ok(heads
            .iter()
            .map(|r| r.refspec.strip_prefix(REFS_HEADS).unwrap_or(&r.refspec).to_string())
            .collect())
    }

    /// Create `refs/heads/<name>` pointing at `base`.
    ///
    /// Uses `update-ref`, so `base` is not checked to be a commit; a bad
    /// base surfaces as git's own error.
    pub fn create_branch(&self, name: &str, base: &str, opts: &CreateBranchOptions) -> Result<()> {
        let refspec = format!("{}{}", REFS_HEADS, name);
        self.git(&["update-ref", &refspec, base], opts.timeout)?;
        Ok(())
    }

    /// Delete a local branch; `force` skips the fully-merged check
    pub fn delete_branch(&self, name: &str, opts: &DeleteBranchOptions) -> Result<()> {
        let flag = if opts.force { "-D" } else { "-d" };
        self.git(&["branch", flag, name], opts.timeout)?;
        Ok(())
    }
}

/// Whether `refspec` exists in the repository at `repo_path`
pub fn has_reference<P: AsRef<Path>>(repo_path: P, refspec: &str, opts: &VerifyOptions) -> bool {
    Repository::with_runner(repo_path, GitExecutor::new()).has_reference(refspec, opts)
}

/// Whether branch `branch` (short name) exists in the repository at `repo_path`
pub fn has_branch<P: AsRef<Path>>(repo_path: P, branch: &str, opts: &VerifyOptions) -> bool {
    Repository::with_runner(repo_path, GitExecutor::new()).has_branch(branch, opts)
}

/// Whether tag `tag` (short name) exists in the repository at `repo_path`
pub fn has_tag<P: AsRef<Path>>(repo_path: P, tag: &str, opts: &VerifyOptions) -> bool {
    Repository::with_runner(repo_path, GitExecutor::new()).has_tag(tag, opts)
}

pub fn create_branch<P: AsRef<Path>>(
    repo_path: P,
    name: &str,
    base: &str,
    opts: &CreateBranchOptions,
) -> Result<()> {
    Repository::with_runner(repo_path, GitExecutor::new()).create_branch(name, base, opts)
}

pub fn delete_branch<P: AsRef<Path>>(repo_path: P, name: &str, opts: &DeleteBranchOptions) -> Result<()> {
    Repository::with_runner(repo_path, GitExecutor::new()).delete_branch(name, opts)
}
