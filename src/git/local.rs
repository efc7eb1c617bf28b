//! Local git operations via the `git` binary.
//!
//! All repository reads shell out to `git` and treat stdout as an opaque text
//! blob; gitscribe is not a version-control engine.

use std::path::PathBuf;
use std::process::Command;

use tracing::debug;

use crate::error::GitProviderError;

/// Default number of commits fetched for prompt history context.
pub const DEFAULT_HISTORY_LIMIT: usize = 5;

/// Runs `git` subcommands in a working directory.
#[derive(Debug, Clone, Default)]
pub struct LocalGit {
    workdir: Option<PathBuf>,
}

impl LocalGit {
    /// Creates a runner for the current directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a runner for a specific working directory.
    pub fn at<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            workdir: Some(path.into()),
        }
    }

    fn run(&self, args: &[&str]) -> Result<String, GitProviderError> {
        debug!(?args, "Running git command");

        let mut command = Command::new("git");
        if let Some(dir) = &self.workdir {
            command.current_dir(dir);
        }

        let output = command
            .args(args)
            .output()
            .map_err(|e| GitProviderError::CommandFailed(format!("failed to spawn git: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GitProviderError::CommandFailed(format!(
                "git {} exited with {}: {}",
                args.join(" "),
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    /// Returns the currently checked-out branch name.
    pub fn branch_name(&self) -> Result<String, GitProviderError> {
        let out = self.run(&["rev-parse", "--abbrev-ref", "HEAD"])?;
        Ok(out.trim().to_string())
    }

    /// Returns the diff of staged-but-uncommitted changes.
    ///
    /// Empty output means nothing is staged.
    pub fn staged_diff(&self) -> Result<String, GitProviderError> {
        self.run(&["diff", "--cached"])
    }

    /// Returns the diff between two branches.
    ///
    /// `to..from` semantics: changes present in `from` that are not yet in
    /// `to`.
    pub fn branch_diff(&self, from_branch: &str, to_branch: &str) -> Result<String, GitProviderError> {
        self.run(&["diff", &format!("{to_branch}..{from_branch}")])
    }

    /// Returns a short log of recent commits on a branch.
    pub fn recent_commits(
        &self,
        branch: Option<&str>,
        limit: usize,
    ) -> Result<String, GitProviderError> {
        let count = format!("-{limit}");
        let mut args = vec!["log", count.as_str(), "--oneline"];
        if let Some(branch) = branch {
            args.push(branch);
        }

        let out = self.run(&args)?;
        Ok(out.trim().to_string())
    }

    /// Creates a commit with the given message.
    pub fn commit(&self, message: &str) -> Result<(), GitProviderError> {
        self.run(&["commit", "-m", message])?;
        Ok(())
    }

    /// Returns the URL of the `origin` remote.
    pub fn remote_url(&self) -> Result<String, GitProviderError> {
        let out = self.run(&["remote", "get-url", "origin"])?;
        Ok(out.trim().to_string())
    }
}
