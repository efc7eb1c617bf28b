//! Azure DevOps REST API adapter.
//!
//! Azure differs from GitHub in three ways that matter here: HTTP Basic auth
//! with an empty username and the token as password, `sourceRefName` /
//! `targetRefName` branch fields carrying a `refs/heads/` prefix, and an
//! explicit preview API version on every request.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::data::PullRequestInfo;
use crate::error::GitProviderError;
use crate::git::local::LocalGit;
use crate::git::GitProvider;

const DEFAULT_BASE_URL: &str = "https://dev.azure.com";
const API_VERSION: &str = "7.1-preview.1";
const REF_PREFIX: &str = "refs/heads/";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PullResponse {
    pull_request_id: u64,
    source_ref_name: String,
    target_ref_name: String,
    url: Option<String>,
}

#[derive(Deserialize)]
struct PullListResponse {
    value: Vec<PullResponse>,
}

#[derive(Serialize)]
struct UpdatePullRequest<'a> {
    title: &'a str,
    description: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreatePullRequest<'a> {
    source_ref_name: String,
    target_ref_name: String,
    title: &'a str,
    description: &'a str,
}

#[derive(Deserialize, Default)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// Adds the `refs/heads/` prefix expected by the Azure API.
fn to_ref_name(branch: &str) -> String {
    format!("{REF_PREFIX}{branch}")
}

/// Strips the `refs/heads/` prefix from an Azure ref name.
fn from_ref_name(ref_name: &str) -> String {
    ref_name
        .strip_prefix(REF_PREFIX)
        .unwrap_or(ref_name)
        .to_string()
}

/// Azure DevOps adapter.
pub struct AzureDevOpsAdapter {
    client: Client,
    local: LocalGit,
    token: String,
    organization: String,
    project: String,
    repo: String,
    base_url: String,
}

impl AzureDevOpsAdapter {
    /// Creates an adapter for a repository on dev.azure.com.
    pub fn new(token: String, organization: String, project: String, repo: String) -> Self {
        Self {
            client: Client::new(),
            local: LocalGit::new(),
            token,
            organization,
            project,
            repo,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Overrides the API base URL (tests, on-premises servers).
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
        format!(
            "{}/{}/{}/_apis/git/repositories/{}",
            self.base_url, self.organization, self.project, self.repo
        )
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        // Empty username, token as password.
        let credentials = BASE64.encode(format!(":{}", self.token));
        builder
            .header("Authorization", format!("Basic {credentials}"))
            .header("Content-Type", "application/json")
            .query(&[("api-version", API_VERSION)])
    }

    async fn api_error(&self, what: &str, response: Response) -> GitProviderError {
        let status = response.status();
        match status {
            StatusCode::NOT_FOUND => GitProviderError::NotFound(what.to_string()),
            StatusCode::FORBIDDEN | StatusCode::UNAUTHORIZED => {
                GitProviderError::AuthFailed(what.to_string())
            }
            _ => {
                let body: ErrorBody = response.json().await.unwrap_or_default();
                GitProviderError::ApiError {
                    host: "Azure DevOps",
                    status: status.as_u16(),
                    message: body.message,
                }
            }
        }
    }

    async fn find_open_pull_request(
        &self,
        from_branch: &str,
        to_branch: &str,
    ) -> Result<Option<PullRequestInfo>, GitProviderError> {
        let url = format!("{}/pullrequests", self.repo_url());
        let response = self
            .request(self.client.get(&url))
            .query(&[
                ("searchCriteria.status", "active"),
                ("searchCriteria.sourceRefName", &to_ref_name(from_branch)),
                ("searchCriteria.targetRefName", &to_ref_name(to_branch)),
            ])
            .send()
            .await
            .map_err(|e| GitProviderError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(self.api_error(&self.repo_label(), response).await);
        }

        let list: PullListResponse = response
            .json()
            .await
            .map_err(|e| GitProviderError::Network(e.to_string()))?;

        Ok(list.value.into_iter().next().map(|pr| PullRequestInfo {
            number: pr.pull_request_id,
            from_branch: from_ref_name(&pr.source_ref_name),
            to_branch: from_ref_name(&pr.target_ref_name),
        }))
    }

    fn repo_label(&self) -> String {
        format!(
            "repository '{}/{}/{}'",
            self.organization, self.project, self.repo
        )
    }
}

#[async_trait]
impl GitProvider for AzureDevOpsAdapter {
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
        let url = format!("{}/pullrequests/{number}", self.repo_url());
        debug!(url, "fetching Azure DevOps pull request");

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
            from_branch: from_ref_name(&pr.source_ref_name),
            to_branch: from_ref_name(&pr.target_ref_name),
        })
    }

    async fn update_pull_request(
        &self,
        number: u64,
        title: &str,
        body: &str,
    ) -> Result<(), GitProviderError> {
        let url = format!("{}/pullrequests/{number}", self.repo_url());
        debug!(url, "updating Azure DevOps pull request");

        let response = self
            .request(self.client.patch(&url))
            .json(&UpdatePullRequest {
                title,
                description: body,
            })
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

        let url = format!("{}/pullrequests", self.repo_url());
        debug!(url, from_branch, to_branch, "creating Azure DevOps pull request");

        let response = self
            .request(self.client.post(&url))
            .json(&CreatePullRequest {
                source_ref_name: to_ref_name(from_branch),
                target_ref_name: to_ref_name(to_branch),
                title,
                description: body,
            })
            .send()
            .await
            .map_err(|e| GitProviderError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(self.api_error(&self.repo_label(), response).await);
        }

        let pr: PullResponse = response
            .json()
            .await
            .map_err(|e| GitProviderError::Network(e.to_string()))?;

        Ok(pr.url.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ref_names_round_trip() {
        assert_eq!(to_ref_name("feature/x"), "refs/heads/feature/x");
        assert_eq!(from_ref_name("refs/heads/feature/x"), "feature/x");
        assert_eq!(from_ref_name(&to_ref_name("main")), "main");
    }

    #[test]
    fn from_ref_name_tolerates_missing_prefix() {
        assert_eq!(from_ref_name("main"), "main");
    }
}
