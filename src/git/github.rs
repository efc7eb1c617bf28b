//! GitHub REST API adapter.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::data::PullRequestInfo;
use crate::error::GitProviderError;
use crate::git::local::LocalGit;
use crate::git::GitProvider;

const DEFAULT_BASE_URL: &str = "https://api.github.com";

#[derive(Deserialize)]
struct BranchRef {
    #[serde(rename = "ref")]
    name: String,
}

#[derive(Deserialize)]
struct PullResponse {
    number: u64,
    head: BranchRef,
    base: BranchRef,
    html_url: Option<String>,
}

#[derive(Serialize)]
struct UpdatePullRequest<'a> {
    title: &'a str,
    body: &'a str,
}

#[derive(Serialize)]
struct CreatePullRequest<'a> {
    head: &'a str,
    base: &'a str,
    title: &'a str,
    body: &'a str,
}

#[derive(Deserialize, Default)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    errors: Vec<serde_json::Value>,
}

/// GitHub adapter: bearer-token auth, `head`/`base` branch naming.
pub struct GitHubAdapter {
    client: Client,
    local: LocalGit,
    token: String,
    owner: String,
    repo: String,
    base_url: String,
}

impl GitHubAdapter {
    /// Creates an adapter for `owner/repo` on api.github.com.
    pub fn new(token: String, owner: String, repo: String) -> Self {
        Self {
            client: Client::new(),
            local: LocalGit::new(),
            token,
            owner,
            repo,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Overrides the API base URL (GitHub Enterprise, tests).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let mut base = base_url.into();
        while base.ends_with('/') {
            base.pop();
        }
        self.base_url = base;
        self
    }

    fn repo_url(&self) -> String {
        format!("{}/repos/{}/{}", self.base_url, self.owner, self.repo)
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", concat!("gitscribe/", env!("CARGO_PKG_VERSION")))
    }

    /// Maps a non-success response to the error taxonomy.
    async fn api_error(&self, what: &str, response: Response) -> GitProviderError {
        let status = response.status();
        match status {
            StatusCode::NOT_FOUND => GitProviderError::NotFound(what.to_string()),
            StatusCode::FORBIDDEN | StatusCode::UNAUTHORIZED => {
                GitProviderError::AuthFailed(what.to_string())
            }
            _ => {
                let body: ErrorBody = response.json().await.unwrap_or_default();
                let mut message = body.message;
                if !body.errors.is_empty() {
                    let details: Vec<String> =
                        body.errors.iter().map(ToString::to_string).collect();
                    message = format!("{message} ({})", details.join("; "));
                }
                GitProviderError::ApiError {
                    host: "GitHub",
                    status: status.as_u16(),
                    message,
                }
            }
        }
    }

    /// Finds an already-open PR for the given branch pair, if any.
    async fn find_open_pull_request(
        &self,
        from_branch: &str,
        to_branch: &str,
    ) -> Result<Option<PullRequestInfo>, GitProviderError> {
        let url = format!("{}/pulls", self.repo_url());
        let response = self
            .request(self.client.get(&url))
            .query(&[
                ("state", "open"),
                ("head", &format!("{}:{from_branch}", self.owner)),
                ("base", to_branch),
            ])
            .send()
            .await
            .map_err(|e| GitProviderError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(self
                .api_error(&format!("repository '{}/{}'", self.owner, self.repo), response)
                .await);
        }

        let pulls: Vec<PullResponse> = response
            .json()
            .await
            .map_err(|e| GitProviderError::Network(e.to_string()))?;

        Ok(pulls.into_iter().next().map(|pr| PullRequestInfo {
            number: pr.number,
            from_branch: pr.head.name,
            to_branch: pr.base.name,
        }))
    }
}

#[async_trait]
impl GitProvider for GitHubAdapter {
    fn branch_name(&self) -> Result<String, GitProviderError> {
        self.local.branch_name()
    }

    fn staged_diff(&self) -> Result<String, GitProviderError> {
        self.local.staged_diff()
    }

    fn branch_diff(
        &self,
        from_branch: &str,
        to_branch: &str,
    ) -> Result<String, GitProviderError> {
        self.local.branch_diff(from_branch, to_branch)
    }

    fn recent_commits(
        &self,
        branch: Option<&str>,
        limit: usize,
    ) -> Result<String, GitProviderError> {
        self.local.recent_commits(branch, limit)
    }

    fn commit(&self, message: &str) -> Result<(), GitProviderError> {
        self.local.commit(message)
    }

    async fn pull_request(&self, number: u64) -> Result<PullRequestInfo, GitProviderError> {
        let url = format!("{}/pulls/{number}", self.repo_url());
        debug!(url, "fetching GitHub pull request");

        let response = self
            .request(self.client.get(&url))
            .send()
            .await
            .map_err(|e| GitProviderError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(self
                .api_error(&format!("pull request #{number}"), response)
                .await);
        }

        let pr: PullResponse = response
            .json()
            .await
            .map_err(|e| GitProviderError::Network(e.to_string()))?;

        Ok(PullRequestInfo {
            number,
            from_branch: pr.head.name,
            to_branch: pr.base.name,
        })
    }

    async fn update_pull_request(
        &self,
        number: u64,
        title: &str,
        body: &str,
    ) -> Result<(), GitProviderError> {
        let url = format!("{}/pulls/{number}", self.repo_url());
        debug!(url, "updating GitHub pull request");

        let response = self
            .request(self.client.patch(&url))
            .json(&UpdatePullRequest { title, body })
            .send()
            .await
            .map_err(|e| GitProviderError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(self
                .api_error(&format!("pull request #{number}"), response)
                .await);
        }

        Ok(())
    }

    async fn create_pull_request(
        &self,
        from_branch: &str,
        to_branch: &str,
        title: &str,
        body: &str,
    ) -> Result<String, GitProviderError> {
        // Check-then-act duplicate guard; best effort, not atomic.
        if let Some(existing) = self.find_open_pull_request(from_branch, to_branch).await? {
            return Err(GitProviderError::DuplicatePullRequest {
                number: existing.number,
                from_branch: from_branch.to_string(),
                to_branch: to_branch.to_string(),
            });
        }

        let url = format!("{}/pulls", self.repo_url());
        debug!(url, from_branch, to_branch, "creating GitHub pull request");

        let response = self
            .request(self.client.post(&url))
            .json(&CreatePullRequest {
                head: from_branch,
                base: to_branch,
                title,
                body,
            })
            .send()
            .await
            .map_err(|e| GitProviderError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(self
                .api_error(&format!("repository '{}/{}'", self.owner, self.repo), response)
                .await);
        }

        let pr: PullResponse = response
            .json()
            .await
            .map_err(|e| GitProviderError::Network(e.to_string()))?;

        Ok(pr.html_url.unwrap_or_default())
    }
}
