//! CLI interface for gitscribe.

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod commit;
pub mod config;
pub mod pr;

/// gitscribe: AI-assisted commit messages and PR documentation
#[derive(Parser)]
#[command(name = "gitscribe")]
#[command(about = "AI-assisted commit messages and PR documentation", long_about = None)]
#[command(version)]
pub struct Cli {
    /// The main command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Main command categories
#[derive(Subcommand)]
pub enum Commands {
    /// Generate a commit message from staged changes
    Commit(commit::CommitCommand),
    /// Generate or update pull request documentation
    Pr(pr::PrCommand),
    /// Show or change configuration
    Config(config::ConfigCommand),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Commit(cmd) => cmd.execute().await,
            Commands::Pr(cmd) => cmd.execute().await,
            Commands::Config(cmd) => cmd.execute(),
        }
    }
}

/// Asks a yes/no question on stdin and returns the answer.
pub(crate) fn confirm(question: &str) -> Result<bool> {
    use std::io::{self, Write};

    print!("{question} [y/N] ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let response = input.trim().to_lowercase();
    Ok(response == "y" || response == "yes")
}
