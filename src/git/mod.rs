//! Git operations: local repository access, remote provider resolution, and
//! host API adapters.

use anyhow::Result;
use async_trait::async_trait;

pub mod azure;
pub mod github;
pub mod local;
pub mod remote;
pub mod ssh;

pub use azure::AzureDevOpsAdapter;
pub use github::GitHubAdapter;
pub use local::LocalGit;
pub use remote::{parse_remote_url, resolve_remote, RemoteDescriptor};
pub use ssh::SshConfigResolver;

use crate::config::AppConfig;
use crate::data::PullRequestInfo;
use crate::error::GitProviderError;

/// Capability set implemented by each git host adapter.
///
/// Local diff/log/branch operations shell out to the `git` binary; the PR
/// operations talk to the host's REST API.
#[async_trait]
pub trait GitProvider: Send + Sync {
    /// Returns the currently checked-out branch name.
    fn branch_name(&self) -> Result<String, GitProviderError>;

    /// Returns the staged diff; empty when nothing is staged.
    fn staged_diff(&self) -> Result<String, GitProviderError>;

    /// Returns the diff between two local branches (`to..from` semantics).
    fn branch_diff(&self, from_branch: &str, to_branch: &str)
        -> Result<String, GitProviderError>;

    /// Returns a short log of recent commits for prompt context.
    fn recent_commits(
        &self,
        branch: Option<&str>,
        limit: usize,
    ) -> Result<String, GitProviderError>;

    /// Creates a local commit with the given message.
    fn commit(&self, message: &str) -> Result<(), GitProviderError>;

    /// Looks up a pull request by number on the remote host.
    async fn pull_request(&self, number: u64) -> Result<PullRequestInfo, GitProviderError>;

    /// Updates an existing pull request's title and body.
    async fn update_pull_request(
        &self,
        number: u64,
        title: &str,
        body: &str,
    ) -> Result<(), GitProviderError>;

    /// Creates a pull request and returns its canonical URL.
    ///
    /// Idempotent create: if an open pull request already exists for the same
    /// branch pair, fails with [`GitProviderError::DuplicatePullRequest`]
    /// instead of creating a duplicate.
    async fn create_pull_request(
        &self,
        from_branch: &str,
        to_branch: &str,
        title: &str,
        body: &str,
    ) -> Result<String, GitProviderError>;
}

/// Builds the adapter matching a resolved remote descriptor.
///
/// Selected once at startup; the rest of the invocation goes through the
/// returned trait object. A missing host token is not an error here: local
/// operations never need one, and remote calls surface the auth failure.
pub fn provider_for(descriptor: RemoteDescriptor, config: &AppConfig) -> Box<dyn GitProvider> {
    match descriptor {
        RemoteDescriptor::GitHub { owner, repo } => {
            let token = config.github_token.clone().unwrap_or_default();
            Box::new(GitHubAdapter::new(token, owner, repo))
        }
        RemoteDescriptor::AzureDevOps {
            organization,
            project,
            repo,
        } => {
            let token = config.azure_devops_token.clone().unwrap_or_default();
            Box::new(AzureDevOpsAdapter::new(token, organization, project, repo))
        }
    }
}
