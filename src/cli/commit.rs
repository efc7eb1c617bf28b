//! Commit command: AI-generated commit messages for staged changes.

use anyhow::Result;
use clap::Parser;

use crate::config::ConfigManager;
use crate::data::{CommitOutcome, Lang};
use crate::git::{provider_for, resolve_remote, LocalGit};
use crate::llm;
use crate::workflows::GenerateCommitMessage;

/// Commit command options.
#[derive(Parser)]
pub struct CommitCommand {
    /// Creates the commit automatically without confirmation.
    #[arg(long)]
    pub auto: bool,

    /// Output language for the generated message.
    #[arg(long, value_enum)]
    pub lang: Option<Lang>,
}

impl CommitCommand {
    /// Executes the commit command.
    pub async fn execute(self) -> Result<()> {
        let config = ConfigManager::new().load()?;
        let lang = self.lang.unwrap_or(config.lang);

        let descriptor = resolve_remote(&LocalGit::new())?;
        let git = provider_for(descriptor, &config);
        let llm = llm::provider_from_config(&config)?;

        let workflow = GenerateCommitMessage::new(git.as_ref(), llm.as_ref());

        let message = match workflow.execute(lang).await? {
            CommitOutcome::NoStagedChanges => {
                println!("ℹ️  No staged changes to generate a commit message from.");
                return Ok(());
            }
            CommitOutcome::Generated { message } => message,
        };

        println!("\n🔤 Generated commit message:\n");
        println!("{message}\n");

        if self.auto || super::confirm("Do you want to create this commit?")? {
            workflow.apply(&message)?;
            println!("✅ Commit created.");
        } else {
            println!("❌ Commit cancelled.");
        }

        Ok(())
    }
}
