use crate::error::{GitError, GitResult};
use crate::git::runner::CommandRunner;
use std::fmt;
use std::path::Path;

/// Oldest git whose `show-ref`/`symbolic-ref` output this crate parses
const MIN_GIT_VERSION: (u32, u32) = (2, 20);

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct GitVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl GitVersion {
    /// Ask the runner's git for its version
    pub fn detect<R: CommandRunner>(runner: &R) -> GitResult<Self> {
        let stdout = runner
            .run(&["--version"], Path::new("."), None)
            .map_err(|e| GitError::GitVersionDetectionFailed(e.to_string()))?;

        Self::parse(&String::from_utf8_lossy(&stdout))
    }

    /// Parse "git version X.Y.Z" (vendor suffixes after the patch are ignored)
    pub fn parse(version_str: &str) -> GitResult<Self> {
        let parts: Vec<&str> = version_str.split_whitespace().collect();
        let number = match parts.as_slice() {
            ["git", "version", number, ..] => *number,
            _ => {
                return Err(GitError::ParseError(format!(
                    "Unexpected git version format: {}",
                    version_str.trim()
                )));
            }
        };

        let mut parts = number.split('.');
        let major = parse_component(parts.next(), "major", number)?;
        let minor = parse_component(parts.next(), "minor", number)?;
        // Patch may carry suffixes like "2.39.2.windows.1" or "2.45.rc0"
        let patch = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);

        Ok(GitVersion { major, minor, patch })
    }

    pub fn is_supported(&self) -> bool {
        (self.major, self.minor) >= MIN_GIT_VERSION
    }

    /// Detect and reject versions older than the supported minimum
    pub fn validate<R: CommandRunner>(runner: &R) -> GitResult<Self> {
        let version = Self::detect(runner)?;

        if !version.is_supported() {
            return Err(GitError::GitVersionTooOld(format!(
                "{}\n\nPlease upgrade git to version {}.{} or higher.",
                version, MIN_GIT_VERSION.0, MIN_GIT_VERSION.1
            )));
        }

        Ok(version)
    }
}

fn parse_component(part: Option<&str>, label: &str, number: &str) -> GitResult<u32> {
    part.and_then(|p| p.parse::<u32>().ok()).ok_or_else(|| {
        GitError::ParseError(format!("Invalid {} version in: {}", label, number))
    })
}

impl fmt::Display for GitVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::fake::FakeRunner;

    #[test]
    fn test_parse_standard_version() {
        let version = GitVersion::parse("git version 2.39.2\n").unwrap();
        assert_eq!(version, GitVersion { major: 2, minor: 39, patch: 2 });
    }

    #[test]
    fn test_parse_version_with_suffix() {
        let version = GitVersion::parse("git version 2.39.2.windows.1").unwrap();
        assert_eq!(version.patch, 2);

        let version = GitVersion::parse("git version 2.39.3 (Apple Git-146)").unwrap();
        assert_eq!(version.minor, 39);
    }

    #[test]
    fn test_parse_version_no_patch() {
        let version = GitVersion::parse("git version 2.39").unwrap();
        assert_eq!(version.patch, 0);
    }

    #[test]
    fn test_parse_invalid_format() {
        assert!(GitVersion::parse("version 2.39.2").is_err());
        assert!(GitVersion::parse("git 2.39.2").is_err());
        assert!(GitVersion::parse("git version two.x").is_err());
        assert!(GitVersion::parse("git version 2").is_err());
    }

    #[test]
    fn test_is_supported() {
        assert!(GitVersion { major: 2, minor: 20, patch: 0 }.is_supported());
        assert!(GitVersion { major: 3, minor: 0, patch: 0 }.is_supported());
        assert!(!GitVersion { major: 2, minor: 19, patch: 9 }.is_supported());
        assert!(!GitVersion { major: 1, minor: 9, patch: 0 }.is_supported());
    }

    #[test]
    fn test_validate_through_runner() {
        let runner = FakeRunner::new().ok("git version 2.43.0\n").ok("git version 2.17.1\n");

        assert_eq!(GitVersion::validate(&runner).unwrap().to_string(), "2.43.0");
        assert!(matches!(
            GitVersion::validate(&runner),
            Err(GitError::GitVersionTooOld(_))
        ));
        assert_eq!(runner.calls()[0], vec!["--version"]);
    }

    #[test]
    fn test_detect_failure() {
        let runner = FakeRunner::new().err(GitError::CommandFailed("no git".to_string()));
        assert!(matches!(
            GitVersion::detect(&runner),
            Err(GitError::GitVersionDetectionFailed(_))
        ));
    }
}
