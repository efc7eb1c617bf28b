//! Remote provider resolution.
//!
//! Classifies the repository's `origin` URL as GitHub or Azure DevOps and
//! extracts the structured identifiers the host adapters need. SSH aliases
//! are resolved through the user's SSH client configuration.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::error::GitProviderError;
use crate::git::local::LocalGit;
use crate::git::ssh::SshConfigResolver;

/// Structured identity of a repository's remote host.
///
/// Derived from the remote URL on each resolution; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteDescriptor {
    /// A repository hosted on GitHub.
    GitHub {
        /// Repository owner (user or organization).
        owner: String,
        /// Repository name.
        repo: String,
    },
    /// A repository hosted on Azure DevOps.
    AzureDevOps {
        /// Azure DevOps organization.
        organization: String,
        /// Project within the organization.
        project: String,
        /// Repository name.
        repo: String,
    },
}

static GITHUB_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"github\.com[:/]([^/]+)/([^/]+?)(?:\.git)?/?$").unwrap());

static AZURE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"dev\.azure\.com/([^/]+)/([^/]+)/_git/([^/?#]+?)(?:\.git)?/?$").unwrap()
});

// SSH URL shapes: user@alias:path, ssh://user@alias/path, alias:path.
static SSH_USER_AT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@]+@([^:/]+):(.+)$").unwrap());
static SSH_SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ssh://(?:[^@]+@)?([^:/]+)(?::\d+)?/(.+)$").unwrap());
static SSH_BARE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([^:/@]+):(.+)$").unwrap());

// Path extraction once the host is known.
static OWNER_REPO_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^/:]+)/([^/]+?)(?:\.git)?/?$").unwrap());
static AZURE_SSH_PATH: LazyLock<Regex> = LazyLock::new(|| {
    // Classic: Org/Project/_git/Repo; v3: v3/Org/Project/Repo.
    Regex::new(r"^(?:v3/)?([^/]+)/([^/]+)/(?:_git/)?([^/]+?)(?:\.git)?/?$").unwrap()
});

/// Resolves the provider for the current repository's `origin` remote.
pub fn resolve_remote(local: &LocalGit) -> Result<RemoteDescriptor, GitProviderError> {
    let url = local.remote_url()?;
    parse_remote_url(&url, &SshConfigResolver::load_default())
}

/// Classifies a remote URL, consulting SSH config for alias indirection.
///
/// Priority order: direct GitHub match, direct Azure DevOps match, SSH-alias
/// resolution, last-resort GitHub extraction for non-HTTP URLs.
pub fn parse_remote_url(
    url: &str,
    ssh: &SshConfigResolver,
) -> Result<RemoteDescriptor, GitProviderError> {
    let url = url.trim();

    if url.contains("github.com") {
        if let Some(descriptor) = parse_github(url) {
            return Ok(descriptor);
        }
    }

    if url.contains("dev.azure.com") {
        if let Some(descriptor) = parse_azure_https(url) {
            return Ok(descriptor);
        }
        // Malformed Azure path (fewer than three segments) falls through to
        // the SSH-alias step rather than failing here.
    }

    if let Some(descriptor) = resolve_via_ssh_alias(url, ssh) {
        return Ok(descriptor);
    }

    // Last resort: assume GitHub for non-HTTP URLs with an owner/repo tail.
    if !url.starts_with("http") {
        if let Some(caps) = OWNER_REPO_PATH.captures(url) {
            debug!(url, "assuming GitHub for unrecognized non-HTTP remote");
            return Ok(RemoteDescriptor::GitHub {
                owner: caps[1].to_string(),
                repo: caps[2].to_string(),
            });
        }
    }

    Err(GitProviderError::UnknownProvider(url.to_string()))
}

fn parse_github(url: &str) -> Option<RemoteDescriptor> {
    let caps = GITHUB_URL.captures(url)?;
    Some(RemoteDescriptor::GitHub {
        owner: caps[1].to_string(),
        repo: caps[2].to_string(),
    })
}

fn parse_azure_https(url: &str) -> Option<RemoteDescriptor> {
    let caps = AZURE_URL.captures(url)?;
    Some(RemoteDescriptor::AzureDevOps {
        organization: caps[1].to_string(),
        project: caps[2].to_string(),
        repo: caps[3].to_string(),
    })
}

/// Splits an SSH-shaped URL into (alias, path), if it matches a known shape.
fn split_ssh_url(url: &str) -> Option<(String, String)> {
    if let Some(caps) = SSH_USER_AT.captures(url) {
        return Some((caps[1].to_string(), caps[2].to_string()));
    }
    if let Some(caps) = SSH_SCHEME.captures(url) {
        return Some((caps[1].to_string(), caps[2].to_string()));
    }
    if url.starts_with("http") {
        return None;
    }
    if let Some(caps) = SSH_BARE.captures(url) {
        return Some((caps[1].to_string(), caps[2].to_string()));
    }
    None
}

fn resolve_via_ssh_alias(url: &str, ssh: &SshConfigResolver) -> Option<RemoteDescriptor> {
    let (alias, path) = split_ssh_url(url)?;
    let hostname = ssh.hostname_for(&alias)?;
    debug!(alias, hostname, "resolved SSH alias via ssh config");

    if hostname.contains("github.com") {
        let caps = OWNER_REPO_PATH.captures(&path)?;
        return Some(RemoteDescriptor::GitHub {
            owner: caps[1].to_string(),
            repo: caps[2].to_string(),
        });
    }

    if hostname.contains("dev.azure.com") {
        let caps = AZURE_SSH_PATH.captures(&path)?;
        return Some(RemoteDescriptor::AzureDevOps {
            organization: caps[1].to_string(),
            project: caps[2].to_string(),
            repo: caps[3].to_string(),
        });
    }

    None
}
