use crate::error::{GitError, Result};
use std::path::Path;
use std::time::Duration;

/// Diagnostic git prints when `show-ref --verify` is given an unknown ref
const NOT_A_VALID_REF: &str = "not a valid ref";

/// Exit code git uses for fatal repository/revision errors
const FATAL_EXIT_CODE: i32 = 128;

/// Runs a git subcommand and hands back its raw stdout.
///
/// `args` never includes the program name. A `None` timeout means the
/// runner's own default applies. Failures must already be classified
/// into the matching [`GitError`] variant (see [`classify_failure`]).
pub trait CommandRunner {
    fn run(&self, args: &[&str], dir: &Path, timeout: Option<Duration>) -> Result<Vec<u8>>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, args: &[&str], dir: &Path, timeout: Option<Duration>) -> Result<Vec<u8>> {
        (**self).run(args, dir, timeout)
    }
}

impl<R: CommandRunner + ?Sized> CommandRunner for Box<R> {
    fn run(&self, args: &[&str], dir: &Path, timeout: Option<Duration>) -> Result<Vec<u8>> {
        (**self).run(args, dir, timeout)
    }
}

/// Map a failed invocation onto an error kind.
///
/// `exit_code` is `None` when the process was killed by a signal.
pub fn classify_failure(args: &[&str], exit_code: Option<i32>, stderr: &str) -> GitError {
    let code = exit_code.map_or_else(|| "none".to_string(), |c| c.to_string());
    let message = format!(
        "Command 'git {}' failed with exit code {}: {}",
        args.join(" "),
        code,
        stderr.trim()
    );

    if stderr.contains(NOT_A_VALID_REF) {
        GitError::ReferenceNotFound(message)
    } else if exit_code == Some(FATAL_EXIT_CODE) {
        GitError::Fatal(message)
    } else {
        GitError::CommandFailed(message)
    }
}
