//! Pr command: generates or updates pull request documentation.

use anyhow::Result;
use clap::Parser;

use crate::config::ConfigManager;
use crate::data::{Lang, PrAction, PrDocsOutcome, PrDocsStatus};
use crate::git::{provider_for, resolve_remote, LocalGit};
use crate::llm;
use crate::workflows::{GeneratePrDocs, PrDocsRequest};

/// Pr command options.
#[derive(Parser)]
pub struct PrCommand {
    /// Source branch with the changes.
    #[arg(long)]
    pub from: Option<String>,

    /// Target branch to merge into.
    #[arg(long)]
    pub to: Option<String>,

    /// Existing pull request number to update.
    #[arg(long)]
    pub pr: Option<u64>,

    /// Applies the documentation without confirmation.
    #[arg(long)]
    pub auto: bool,

    /// Generates without touching the remote host.
    #[arg(long)]
    pub dry_run: bool,

    /// Output language for the generated documentation.
    #[arg(long, value_enum)]
    pub lang: Option<Lang>,
}

impl PrCommand {
    /// Executes the pr command.
    pub async fn execute(self) -> Result<()> {
        if self.pr.is_none() && (self.from.is_none() || self.to.is_none()) {
            anyhow::bail!("either --pr or both --from and --to are required");
        }

        let config = ConfigManager::new().load()?;
        let lang = self.lang.unwrap_or(config.lang);

        let descriptor = resolve_remote(&LocalGit::new())?;
        let git = provider_for(descriptor, &config);
        let llm = llm::provider_from_config(&config)?;

        let workflow = GeneratePrDocs::new(git.as_ref(), llm.as_ref());

        let request = PrDocsRequest {
            from_branch: self.from,
            to_branch: self.to,
            pr_number: self.pr,
            lang,
            auto_confirm: self.auto,
            dry_run: self.dry_run,
        };

        let result = match workflow.execute(&request).await? {
            PrDocsOutcome::NoChanges {
                from_branch,
                to_branch,
            } => {
                println!("ℹ️  No changes between {to_branch} and {from_branch}.");
                return Ok(());
            }
            PrDocsOutcome::Generated(result) => result,
        };

        println!("\n📝 {}\n", result.title);
        println!("{}\n", result.body);

        match result.status {
            PrDocsStatus::DryRun => {
                if !result.remote_available {
                    println!("ℹ️  Remote pull request was not reachable; nothing was applied.");
                } else {
                    println!("ℹ️  Dry run; nothing was applied.");
                }
            }
            PrDocsStatus::RequiresConfirmation => {
                let verb = if result.pr_number.is_some() {
                    "update"
                } else {
                    "create"
                };
                if super::confirm(&format!("Do you want to {verb} the pull request?"))? {
                    let status = workflow
                        .confirm_and_execute(
                            result.pr_number,
                            &result.from_branch,
                            &result.to_branch,
                            &result.title,
                            &result.body,
                        )
                        .await;
                    render_applied(&status);
                } else {
                    println!("❌ Cancelled; nothing was applied.");
                }
            }
            ref status => render_applied(status),
        }

        Ok(())
    }
}

fn render_applied(status: &PrDocsStatus) {
    match status {
        PrDocsStatus::Applied(PrAction::Created { url }) => {
            println!("✅ Pull request created: {url}");
        }
        PrDocsStatus::Applied(PrAction::Updated { number }) => {
            println!("✅ Pull request #{number} updated.");
        }
        PrDocsStatus::ApplyFailed(message) => {
            println!("❌ Failed to apply the documentation: {message}");
        }
        PrDocsStatus::DryRun | PrDocsStatus::RequiresConfirmation => {}
    }
}
