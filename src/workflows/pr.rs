//! Pull request documentation workflow.
//!
//! One invocation walks: resolve context → fetch diff → generate → decide
//! (dry-run / confirmation / apply). Confirmation re-entry is a second,
//! explicit entry point that never re-fetches or re-generates.

use anyhow::Result;
use tracing::{debug, warn};

use crate::data::{Lang, PrAction, PrContext, PrDocsOutcome, PrDocsResult, PrDocsStatus};
use crate::git::local::DEFAULT_HISTORY_LIMIT;
use crate::git::GitProvider;
use crate::llm::LlmProvider;

/// Parameters for one PR documentation run.
#[derive(Debug, Clone, Default)]
pub struct PrDocsRequest {
    /// Source branch; overridden by the PR lookup when a number is given.
    pub from_branch: Option<String>,
    /// Target branch; overridden by the PR lookup when a number is given.
    pub to_branch: Option<String>,
    /// Existing pull request number to update.
    pub pr_number: Option<u64>,
    /// Output language.
    pub lang: Lang,
    /// Apply without asking for confirmation.
    pub auto_confirm: bool,
    /// Generate only; never contact the remote host for mutation.
    pub dry_run: bool,
}

/// Generates and optionally applies pull request documentation.
pub struct GeneratePrDocs<'a> {
    git: &'a dyn GitProvider,
    llm: &'a dyn LlmProvider,
}

impl<'a> GeneratePrDocs<'a> {
    /// Creates the workflow over the given providers.
    pub fn new(git: &'a dyn GitProvider, llm: &'a dyn LlmProvider) -> Self {
        Self { git, llm }
    }

    /// Runs the workflow end to end.
    pub async fn execute(&self, request: &PrDocsRequest) -> Result<PrDocsOutcome> {
        let mut remote_available = true;

        // Resolve the branch pair. A PR number is authoritative: its lookup
        // result overrides any user-supplied branch flags.
        let (from_branch, to_branch) = if let Some(number) = request.pr_number {
            match self.git.pull_request(number).await {
                Ok(info) => {
                    debug!(
                        number,
                        from = %info.from_branch,
                        to = %info.to_branch,
                        "resolved branch pair from remote pull request"
                    );
                    (info.from_branch, info.to_branch)
                }
                Err(e) => match (&request.from_branch, &request.to_branch) {
                    (Some(from), Some(to)) => {
                        warn!(error = %e, "remote PR lookup failed, using supplied branches");
                        remote_available = false;
                        (from.clone(), to.clone())
                    }
                    _ => return Err(e.into()),
                },
            }
        } else {
            let from = request
                .from_branch
                .clone()
                .ok_or_else(|| anyhow::anyhow!("a source branch is required without --pr"))?;
            let to = request
                .to_branch
                .clone()
                .ok_or_else(|| anyhow::anyhow!("a target branch is required without --pr"))?;
            (from, to)
        };

        // An empty diff is an expected outcome, not a failure, and it must
        // short-circuit before any remote mutation.
        let diff = self.git.branch_diff(&from_branch, &to_branch)?;
        if diff.trim().is_empty() {
            return Ok(PrDocsOutcome::NoChanges {
                from_branch,
                to_branch,
            });
        }

        // History is prompt garnish; its failure never sinks the run.
        let commit_history = self
            .git
            .recent_commits(Some(&from_branch), DEFAULT_HISTORY_LIMIT)
            .ok();

        let context = PrContext {
            diff,
            from_branch: from_branch.clone(),
            to_branch: to_branch.clone(),
            lang: request.lang,
            commit_history,
        };

        let generated = self.llm.generate_pr_documentation(&context).await?;

        let status = if request.dry_run || !remote_available {
            PrDocsStatus::DryRun
        } else if !request.auto_confirm {
            PrDocsStatus::RequiresConfirmation
        } else {
            self.apply(
                request.pr_number,
                &from_branch,
                &to_branch,
                &generated.title,
                &generated.body,
            )
            .await
        };

        Ok(PrDocsOutcome::Generated(Box::new(PrDocsResult {
            title: generated.title,
            body: generated.body,
            from_branch,
            to_branch,
            pr_number: request.pr_number,
            remote_available,
            status,
        })))
    }

    /// Applies previously generated documentation after user confirmation.
    ///
    /// Takes the title/body from the earlier run; does not re-fetch the diff
    /// or re-generate.
    pub async fn confirm_and_execute(
        &self,
        pr_number: Option<u64>,
        from_branch: &str,
        to_branch: &str,
        title: &str,
        body: &str,
    ) -> PrDocsStatus {
        self.apply(pr_number, from_branch, to_branch, title, body)
            .await
    }

    /// Update when a PR number was given, create otherwise. Failures are
    /// captured in the status so the generated documentation survives.
    async fn apply(
        &self,
        pr_number: Option<u64>,
        from_branch: &str,
        to_branch: &str,
        title: &str,
        body: &str,
    ) -> PrDocsStatus {
        let result = match pr_number {
            Some(number) => self
                .git
                .update_pull_request(number, title, body)
                .await
                .map(|()| PrAction::Updated { number }),
            None => self
                .git
                .create_pull_request(from_branch, to_branch, title, body)
                .await
                .map(|url| PrAction::Created { url }),
        };

        match result {
            Ok(action) => PrDocsStatus::Applied(action),
            Err(e) => PrDocsStatus::ApplyFailed(e.to_string()),
        }
    }
}
