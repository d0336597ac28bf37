use crate::error::{GitError, Result};
use crate::git::executor::GitExecutor;
use crate::git::runner::CommandRunner;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// A git repository on disk plus the runner used to query it.
///
/// Holds no cached state: every query goes to git, so two calls may
/// observe different repository states.
#[derive(Debug)]
pub struct Repository<R = GitExecutor> {
    path: PathBuf,
    runner: R,
}

impl Repository<GitExecutor> {
    /// Detect git repository from current working directory
    pub fn discover() -> Result<Self> {
        let current_dir = env::current_dir().map_err(GitError::IoError)?;

        Self::discover_from(&current_dir)
    }

    /// Detect git repository starting from a specific directory
    pub fn discover_from<P: AsRef<Path>>(start_path: P) -> Result<Self> {
        Self::discover_with(start_path, GitExecutor::new())
    }

    /// Create a Repository for a known git directory
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self::with_runner(path, GitExecutor::new())
    }
}

impl<R: CommandRunner> Repository<R> {
    /// Create a Repository that sends its commands through `runner`
    pub fn with_runner<P: AsRef<Path>>(path: P, runner: R) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            runner,
        }
    }

    /// Walk up from `start_path` until a directory containing `.git` is found
    pub fn discover_with<P: AsRef<Path>>(start_path: P, runner: R) -> Result<Self> {
        let mut current = start_path.as_ref().to_path_buf();

        loop {
            // `.git` is a file for worktrees and submodules
            if current.join(".git").exists() {
                return Ok(Self::with_runner(current, runner));
            }

            if !current.pop() {
                return Err(GitError::NotARepository);
            }
        }
    }

    /// Get the repository path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the command runner for this repository
    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub(crate) fn git(&self, args: &[&str], timeout: Option<Duration>) -> Result<String> {
        let stdout = self.runner.run(args, &self.path, timeout)?;
        Ok(String::from_utf8_lossy(&stdout).to_string())
    }
}
