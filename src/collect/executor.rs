//! git queries for staged changes.
//!
//! Shells out to the system `git` binary so the user's config (diff drivers,
//! rename detection, textconv) applies exactly as on the command line.

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

use async_trait::async_trait;
use git2::Repository;
use tokio::process::Command;
use tracing::{debug, trace, warn};

use crate::error::CollectError;

/// Trait for the two read-only git queries the collector needs.
///
/// This abstraction allows mocking git in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GitExecutor: Send + Sync {
    /// Staged diff text for exactly one path (`git diff --cached -- <path>`).
    async fn staged_diff(&self, path: &str) -> Result<String, CollectError>;

    /// Staged name-status line for one path
    /// (`git diff --cached --name-status -- <path>`).
    async fn staged_name_status(&self, path: &str) -> Result<String, CollectError>;
}

/// Executor that runs the real `git` binary in a fixed directory.
#[derive(Debug, Clone)]
pub struct DefaultGitExecutor {
    workdir: PathBuf,
}

impl DefaultGitExecutor {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Run git and return stdout, decoded lossily.
    async fn run_git(&self, args: &[&str]) -> Result<String, CollectError> {
        trace!(?args, workdir = %self.workdir.display(), "Running git");

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(CollectError::SpawnFailed)?;

        if !output.status.success() {
            return Err(exit_failure(output.status, &output.stderr));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

#[async_trait]
impl GitExecutor for DefaultGitExecutor {
    async fn staged_diff(&self, path: &str) -> Result<String, CollectError> {
        self.run_git(&["diff", "--cached", "--", path]).await
    }

    async fn staged_name_status(&self, path: &str) -> Result<String, CollectError> {
        self.run_git(&["diff", "--cached", "--name-status", "--", path])
            .await
    }
}

/// Error for a git process that did not succeed. Keeps signal termination
/// distinguishable from an exit code.
fn exit_failure(status: ExitStatus, stderr: &[u8]) -> CollectError {
    CollectError::NonZeroExit {
        status: status.to_string(),
        stderr: String::from_utf8_lossy(stderr).trim().to_string(),
    }
}

/// Check that git is installed and accessible.
pub fn check_git_installed() -> Result<(), CollectError> {
    which::which("git").map_err(|_| CollectError::GitNotInstalled)?;
    Ok(())
}

/// Make sure `dir` lies inside a non-bare repository.
///
/// Returns the repository's work-tree root.
pub fn ensure_repository(dir: &Path) -> Result<PathBuf, CollectError> {
    let repo = Repository::discover(dir).map_err(CollectError::NotARepository)?;
    repo.workdir()
        .map(Path::to_path_buf)
        .ok_or(CollectError::BareRepository)
}

/// Look for the repository containing `dir` without failing the run.
///
/// Collection is best-effort: outside a repository every path is skipped,
/// so this only warns.
pub fn locate_repository(dir: &Path) -> Option<PathBuf> {
    match ensure_repository(dir) {
        Ok(root) => {
            debug!(root = %root.display(), "Repository found");
            Some(root)
        }
        Err(e) => {
            warn!(dir = %dir.display(), "{e}. Staged changes cannot be collected here");
            None
        }
    }
}
