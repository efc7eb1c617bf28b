//! Use-case orchestration for commit message and PR documentation runs.
//!
//! Workflows own the control flow between the git provider and the LLM
//! provider; the CLI layer only renders their outcomes and handles
//! confirmation prompts.

pub mod commit;
pub mod pr;

pub use commit::GenerateCommitMessage;
pub use pr::{GeneratePrDocs, PrDocsRequest};

#[cfg(test)]
pub(crate) mod mocks {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::data::{CommitContext, GenerationResult, PrContext, PullRequestInfo};
    use crate::error::{GitProviderError, LlmProviderError};
    use crate::git::GitProvider;
    use crate::llm::LlmProvider;

    /// Scripted git provider recording remote mutation calls.
    pub(crate) struct MockGit {
        pub branch: String,
        pub staged_diff: String,
        pub branch_diff: String,
        pub history: Option<String>,
        pub pr_info: Option<PullRequestInfo>,
        pub lookup_fails: bool,
        pub apply_fails: bool,
        pub updates: Mutex<Vec<(u64, String, String)>>,
        pub creates: Mutex<Vec<(String, String)>>,
        pub commits: Mutex<Vec<String>>,
    }

    impl Default for MockGit {
        fn default() -> Self {
            Self {
                branch: "feat/a".to_string(),
                staged_diff: "+line\n".to_string(),
                branch_diff: "+line\n".to_string(),
                history: Some("abc1234 earlier work".to_string()),
                pr_info: None,
                lookup_fails: false,
                apply_fails: false,
                updates: Mutex::new(Vec::new()),
                creates: Mutex::new(Vec::new()),
                commits: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl GitProvider for MockGit {
        fn branch_name(&self) -> Result<String, GitProviderError> {
            Ok(self.branch.clone())
        }

        fn staged_diff(&self) -> Result<String, GitProviderError> {
            Ok(self.staged_diff.clone())
        }

        fn branch_diff(&self, _from: &str, _to: &str) -> Result<String, GitProviderError> {
            Ok(self.branch_diff.clone())
        }

        fn recent_commits(
            &self,
            _branch: Option<&str>,
            _limit: usize,
        ) -> Result<String, GitProviderError> {
            self.history
                .clone()
                .ok_or_else(|| GitProviderError::CommandFailed("no history".to_string()))
        }

        fn commit(&self, message: &str) -> Result<(), GitProviderError> {
            self.commits.lock().unwrap().push(message.to_string());
            Ok(())
        }

        async fn pull_request(&self, number: u64) -> Result<PullRequestInfo, GitProviderError> {
            if self.lookup_fails {
                return Err(GitProviderError::NotFound(format!(
                    "pull request #{number}"
                )));
            }
            self.pr_info
                .clone()
                .ok_or_else(|| GitProviderError::NotFound(format!("pull request #{number}")))
        }

        async fn update_pull_request(
            &self,
            number: u64,
            title: &str,
            body: &str,
        ) -> Result<(), GitProviderError> {
            if self.apply_fails {
                return Err(GitProviderError::AuthFailed(format!(
                    "pull request #{number}"
                )));
            }
            self.updates
                .lock()
                .unwrap()
                .push((number, title.to_string(), body.to_string()));
            Ok(())
        }

        async fn create_pull_request(
            &self,
            from_branch: &str,
            to_branch: &str,
            _title: &str,
            _body: &str,
        ) -> Result<String, GitProviderError> {
            if self.apply_fails {
                return Err(GitProviderError::DuplicatePullRequest {
                    number: 7,
                    from_branch: from_branch.to_string(),
                    to_branch: to_branch.to_string(),
                });
            }
            self.creates
                .lock()
                .unwrap()
                .push((from_branch.to_string(), to_branch.to_string()));
            Ok("https://example.com/pull/1".to_string())
        }
    }

    /// Scripted LLM provider with canned output.
    pub(crate) struct MockLlm {
        pub calls: Mutex<usize>,
    }

    impl Default for MockLlm {
        fn default() -> Self {
            Self {
                calls: Mutex::new(0),
            }
        }
    }

    #[async_trait]
    impl LlmProvider for MockLlm {
        async fn generate_commit_message(
            &self,
            _context: &CommitContext,
        ) -> Result<String, LlmProviderError> {
            *self.calls.lock().unwrap() += 1;
            Ok("feat: generated message".to_string())
        }

        async fn generate_pr_documentation(
            &self,
            _context: &PrContext,
        ) -> Result<GenerationResult, LlmProviderError> {
            *self.calls.lock().unwrap() += 1;
            Ok(GenerationResult {
                title: "Generated title".to_string(),
                body: "Generated body".to_string(),
            })
        }
    }
}
