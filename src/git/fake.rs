//! Scripted [`CommandRunner`] for unit tests.

use crate::error::{GitError, Result};
use crate::git::runner::CommandRunner;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::Path;
use std::time::Duration;

/// Replays queued responses in order and records every argument list
#[derive(Debug, Default)]
pub struct FakeRunner {
    responses: RefCell<VecDeque<Result<Vec<u8>>>>,
    calls: RefCell<Vec<(Vec<String>, Option<Duration>)>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ok(self, stdout: &str) -> Self {
        self.responses
            .borrow_mut()
            .push_back(Ok(stdout.as_bytes().to_vec()));
        self
    }

    pub fn err(self, error: GitError) -> Self {
        self.responses.borrow_mut().push_back(Err(error));
        self
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.borrow().iter().map(|(args, _)| args.clone()).collect()
    }

    pub fn timeouts(&self) -> Vec<Option<Duration>> {
        self.calls.borrow().iter().map(|(_, timeout)| *timeout).collect()
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, args: &[&str], _dir: &Path, timeout: Option<Duration>) -> Result<Vec<u8>> {
        self.calls
            .borrow_mut()
            .push((args.iter().map(|a| a.to_string()).collect(), timeout));
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(GitError::CommandFailed("no scripted response".to_string())))
    }
}
