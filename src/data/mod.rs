//! Shared data types exchanged between the CLI, workflows, and providers.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Output language for generated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    /// English.
    #[default]
    En,
    /// Spanish.
    Es,
}

impl std::fmt::Display for Lang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Lang::En => write!(f, "en"),
            Lang::Es => write!(f, "es"),
        }
    }
}

/// Pull request metadata returned by a host API lookup.
///
/// The branch pair resolved from a PR number is authoritative for the rest of
/// the invocation and overrides any user-supplied branch flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestInfo {
    /// Host-assigned pull request number.
    pub number: u64,
    /// Source branch (the branch being merged).
    pub from_branch: String,
    /// Target branch (the branch being merged into).
    pub to_branch: String,
}

/// Context assembled for commit message generation.
#[derive(Debug, Clone)]
pub struct CommitContext {
    /// Staged diff (`git diff --cached`).
    pub diff: String,
    /// Currently checked-out branch.
    pub branch_name: String,
    /// Output language.
    pub lang: Lang,
    /// Recent commit subjects for historical context, when available.
    pub commit_history: Option<String>,
}

/// Context assembled for pull request documentation generation.
#[derive(Debug, Clone)]
pub struct PrContext {
    /// Diff between the two branches (`git diff to..from`).
    pub diff: String,
    /// Source branch.
    pub from_branch: String,
    /// Target branch.
    pub to_branch: String,
    /// Output language.
    pub lang: Lang,
    /// Recent commit subjects for historical context, when available.
    pub commit_history: Option<String>,
}

/// Title and body produced by the LLM provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    /// PR title, at most 60 characters.
    pub title: String,
    /// PR description in markdown.
    pub body: String,
}

/// Remote action applied to a pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrAction {
    /// A new pull request was created at the given URL.
    Created {
        /// Canonical URL of the new pull request.
        url: String,
    },
    /// An existing pull request was updated.
    Updated {
        /// Number of the updated pull request.
        number: u64,
    },
}

/// Terminal disposition of a PR documentation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrDocsStatus {
    /// Generation only; no remote contact was made.
    DryRun,
    /// Documentation is ready but the caller must confirm before applying.
    RequiresConfirmation,
    /// The remote pull request was created or updated.
    Applied(PrAction),
    /// The apply step failed; generated documentation is still usable.
    ApplyFailed(String),
}

/// Result of a PR documentation run that produced output.
#[derive(Debug, Clone)]
pub struct PrDocsResult {
    /// Generated title.
    pub title: String,
    /// Generated body.
    pub body: String,
    /// Source branch used for the diff.
    pub from_branch: String,
    /// Target branch used for the diff.
    pub to_branch: String,
    /// Pull request number, when the run targeted an existing PR.
    pub pr_number: Option<u64>,
    /// Whether the remote host was reachable for PR metadata.
    pub remote_available: bool,
    /// Terminal disposition of the run.
    pub status: PrDocsStatus,
}

/// Outcome of a PR documentation run.
///
/// An empty diff is an expected, user-facing outcome distinct from both
/// success and provider failure, so it gets its own variant instead of an
/// error.
#[derive(Debug, Clone)]
pub enum PrDocsOutcome {
    /// No differences between the resolved branches.
    NoChanges {
        /// Source branch that was compared.
        from_branch: String,
        /// Target branch that was compared.
        to_branch: String,
    },
    /// Documentation was generated.
    Generated(Box<PrDocsResult>),
}

/// Outcome of a commit message run.
#[derive(Debug, Clone)]
pub enum CommitOutcome {
    /// Nothing is staged; there is no diff to describe.
    NoStagedChanges,
    /// A commit message was generated.
    Generated {
        /// The generated commit message.
        message: String,
    },
}
