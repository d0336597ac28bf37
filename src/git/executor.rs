use crate::audit::AuditLogger;
use crate::config::Config;
use crate::error::{GitError, Result};
use crate::git::runner::{CommandRunner, classify_failure};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Timeout applied when neither the caller nor the config supplies one
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Raw result of running a git process to completion
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub stdout: Vec<u8>,
    pub stderr: String,
    pub exit_code: Option<i32>,
    pub success: bool,
}

/// Spawns the git binary directly (no shell) and enforces a deadline
#[derive(Debug)]
pub struct GitExecutor {
    program: PathBuf,
    default_timeout: Duration,
    audit: Option<AuditLogger>,
}

impl Default for GitExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl GitExecutor {
    /// Executor for `git` on `PATH` with the default timeout
    pub fn new() -> Self {
        Self {
            program: PathBuf::from("git"),
            default_timeout: DEFAULT_TIMEOUT,
            audit: None,
        }
    }

    /// Build an executor from the loaded configuration
    pub fn from_config(config: &Config) -> io::Result<Self> {
        let mut executor = Self::new()
            .with_program(&config.git.binary)
            .with_default_timeout(config.git_timeout());

        if config.audit.enabled {
            let logger = match &config.audit.log_path {
                Some(path) => AuditLogger::with_path(path)?,
                None => AuditLogger::new()?,
            };
            executor = executor.with_audit_logger(logger);
        }

        Ok(executor)
    }

    pub fn with_program<P: AsRef<Path>>(mut self, program: P) -> Self {
        self.program = program.as_ref().to_path_buf();
        self
    }

    pub fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    /// Record every invocation in the given audit log
    pub fn with_audit_logger(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn default_timeout(&self) -> Duration {
        self.default_timeout
    }

    /// Run to completion without treating a non-zero exit as an error.
    ///
    /// Only spawn failures and timeouts are reported as `Err`.
    pub fn output(&self, args: &[&str], dir: &Path, timeout: Option<Duration>) -> Result<CommandOutput> {
        let timeout = timeout.unwrap_or(self.default_timeout);

        let mut child = Command::new(&self.program)
            .args(args)
            .current_dir(dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                GitError::CommandFailed(format!(
                    "Failed to execute {}: {}",
                    self.program.display(),
                    e
                ))
            })?;

        // Drain both pipes concurrently so a chatty process cannot block on a full pipe
        let stdout_reader = child.stdout.take().map(spawn_reader);
        let stderr_reader = child.stderr.take().map(spawn_reader);

        let deadline = Instant::now() + timeout;
        let status = loop {
            match child.try_wait()? {
                Some(status) => break status,
                None if Instant::now() >= deadline => {
                    let _ = child.kill();
                    let _ = child.wait();
                    self.audit_timeout(args, dir);
                    return Err(GitError::Timeout(timeout));
                }
                None => thread::sleep(POLL_INTERVAL),
            }
        };

        let stdout = join_reader(stdout_reader);
        let stderr = String::from_utf8_lossy(&join_reader(stderr_reader)).to_string();
        let exit_code = status.code();

        self.audit_command(args, dir, exit_code);

        Ok(CommandOutput {
            stdout,
            stderr,
            exit_code,
            success: status.success(),
        })
    }

    fn audit_command(&self, args: &[&str], dir: &Path, exit_code: Option<i32>) {
        if let Some(logger) = &self.audit {
            // Audit trouble must never fail the git call itself
            if let Err(e) = logger.log_command(&command_line(args), dir, exit_code.unwrap_or(-1)) {
                eprintln!("Failed to write audit log: {}", e);
            }
        }
    }

    fn audit_timeout(&self, args: &[&str], dir: &Path) {
        if let Some(logger) = &self.audit {
            if let Err(e) = logger.log_timeout(&command_line(args), dir) {
                eprintln!("Failed to write audit log: {}", e);
            }
        }
    }
}

impl CommandRunner for GitExecutor {
    fn run(&self, args: &[&str], dir: &Path, timeout: Option<Duration>) -> Result<Vec<u8>> {
        let output = self.output(args, dir, timeout)?;
        if !output.success {
            return Err(classify_failure(args, output.exit_code, &output.stderr));
        }
        Ok(output.stdout)
    }
}

fn command_line(args: &[&str]) -> String {
    format!("git {}", args.join(" "))
}

fn spawn_reader<R: Read + Send + 'static>(mut pipe: R) -> JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        buf
    })
}

fn join_reader(reader: Option<JoinHandle<Vec<u8>>>) -> Vec<u8> {
    reader
        .and_then(|handle| handle.join().ok())
        .unwrap_or_default()
}
