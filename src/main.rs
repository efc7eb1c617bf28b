use std::process;

use clap::Parser;
use gitscribe::error::{GitProviderError, LlmProviderError};
use gitscribe::Cli;

#[tokio::main]
async fn main() {
    // Initialize tracing subscriber with RUST_LOG environment variable support.
    // Default to "warn" level if RUST_LOG is not set.
    // Write to stderr so debug logs don't interfere with stdout output.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = cli.execute().await {
        // Domain errors get a distinct marker from unexpected failures.
        if let Some(git_err) = e.downcast_ref::<GitProviderError>() {
            eprintln!("❌ Git provider error: {git_err}");
        } else if let Some(llm_err) = e.downcast_ref::<LlmProviderError>() {
            eprintln!("❌ LLM provider error: {llm_err}");
        } else {
            eprintln!("💥 Unexpected error: {e}");

            for cause in e.chain().skip(1) {
                eprintln!("  Caused by: {cause}");
            }
        }

        process::exit(1);
    }
}
