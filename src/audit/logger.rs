use chrono::Utc;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

const MAX_LOG_SIZE: u64 = 10 * 1024 * 1024; // 10MB

/// Append-only record of every git invocation
#[derive(Debug, Clone)]
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    /// Create an AuditLogger at ~/.config/gitrefs/history.log
    pub fn new() -> std::io::Result<Self> {
        Self::with_path(Self::default_log_path()?)
    }

    /// Create an AuditLogger with a custom log path
    pub fn with_path<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let log_path = path.as_ref().to_path_buf();

        if let Some(parent) = log_path.parent() {
            fs::create_dir_all(parent)?;
        }

        Ok(Self { log_path })
    }

    fn default_log_path() -> std::io::Result<PathBuf> {
        let home = std::env::var("HOME").map_err(|_| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "HOME environment variable not set")
        })?;

        Ok(PathBuf::from(home)
            .join(".config")
            .join("gitrefs")
            .join("history.log"))
    }

    /// Log a finished command with its exit code
    pub fn log_command(&self, command: &str, repo_path: &Path, exit_code: i32) -> std::io::Result<()> {
        self.append(repo_path, &format!("[exit:{}] {}", exit_code, command))
    }

    /// Log a command that was killed after exceeding its timeout
    pub fn log_timeout(&self, command: &str, repo_path: &Path) -> std::io::Result<()> {
        self.append(repo_path, &format!("[TIMEOUT] {}", command))
    }

    fn append(&self, repo_path: &Path, entry: &str) -> std::io::Result<()> {
        self.rotate_if_needed()?;

        let timestamp = Utc::now().to_rfc3339();
        let user = std::env::var("USER").unwrap_or_else(|_| "unknown".to_string());

        let line = format!(
            "[{}] [{}] [{}] {}\n",
            timestamp,
            user,
            repo_path.display(),
            entry
        );

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;

        file.write_all(line.as_bytes())?;
        file.flush()
    }

    /// Rotate history.log -> history.log.1 once it exceeds MAX_LOG_SIZE
    fn rotate_if_needed(&self) -> std::io::Result<()> {
        if !self.log_path.exists() {
            return Ok(());
        }

        if fs::metadata(&self.log_path)?.len() > MAX_LOG_SIZE {
            fs::rename(&self.log_path, self.rotated_path())?;
        }

        Ok(())
    }

    fn rotated_path(&self) -> PathBuf {
        let mut name = self.log_path.as_os_str().to_owned();
        name.push(".1");
        PathBuf::from(name)
    }

    /// Get the path to the log file
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }
}
