//! Commit message workflow.

use anyhow::Result;
use tracing::debug;

use crate::data::{CommitContext, CommitOutcome, Lang};
use crate::git::local::DEFAULT_HISTORY_LIMIT;
use crate::git::GitProvider;
use crate::llm::LlmProvider;

/// Generates a commit message for the staged changes.
pub struct GenerateCommitMessage<'a> {
    git: &'a dyn GitProvider,
    llm: &'a dyn LlmProvider,
}

impl<'a> GenerateCommitMessage<'a> {
    /// Creates the workflow over the given providers.
    pub fn new(git: &'a dyn GitProvider, llm: &'a dyn LlmProvider) -> Self {
        Self { git, llm }
    }

    /// Generates a commit message from the staged diff.
    pub async fn execute(&self, lang: Lang) -> Result<CommitOutcome> {
        let diff = self.git.staged_diff()?;
        if diff.trim().is_empty() {
            return Ok(CommitOutcome::NoStagedChanges);
        }

        let branch_name = self.git.branch_name()?;

        // Best effort; absent history just means a thinner prompt.
        let commit_history = self
            .git
            .recent_commits(None, DEFAULT_HISTORY_LIMIT)
            .ok()
            .filter(|h| !h.is_empty());

        debug!(branch = %branch_name, diff_len = diff.len(), "generating commit message");

        let context = CommitContext {
            diff,
            branch_name,
            lang,
            commit_history,
        };

        let message = self.llm.generate_commit_message(&context).await?;
        Ok(CommitOutcome::Generated { message })
    }

    /// Creates a local commit with the given message.
    pub fn apply(&self, message: &str) -> Result<()> {
        self.git.commit(message)?;
        Ok(())
    }
}
