//! Language-model providers.
//!
//! Generation is a pure call from an assembled context to text; providers
//! never touch the repository or the remote git host.

use anyhow::Result;
use async_trait::async_trait;

pub mod openai;
pub mod prompts;

pub use openai::OpenAiProvider;

use crate::config::AppConfig;
use crate::data::{CommitContext, GenerationResult, PrContext};
use crate::error::LlmProviderError;

/// Maximum length of a generated PR title.
pub const MAX_PR_TITLE_LEN: usize = 60;
/// Maximum length of a generated commit subject line.
pub const MAX_COMMIT_SUBJECT_LEN: usize = 72;

/// Capability set of a language-model provider.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generates a commit message from the staged diff context.
    async fn generate_commit_message(
        &self,
        context: &CommitContext,
    ) -> Result<String, LlmProviderError>;

    /// Generates PR title and body from the branch diff context.
    async fn generate_pr_documentation(
        &self,
        context: &PrContext,
    ) -> Result<GenerationResult, LlmProviderError>;
}

/// Builds the configured LLM provider.
pub fn provider_from_config(config: &AppConfig) -> Result<Box<dyn LlmProvider>> {
    match config.provider.as_str() {
        "openai" => {
            let api_key = config
                .openai_api_key
                .clone()
                .ok_or(LlmProviderError::ApiKeyNotFound)?;
            Ok(Box::new(OpenAiProvider::new(api_key, config.model.clone())))
        }
        other => anyhow::bail!("Unsupported LLM provider: {other}"),
    }
}

/// Truncates text to a maximum number of characters on a char boundary.
pub(crate) fn clamp_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    text.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_leaves_short_text_alone() {
        assert_eq!(clamp_chars("short", 60), "short");
    }

    #[test]
    fn clamp_cuts_long_text() {
        let long = "x".repeat(100);
        assert_eq!(clamp_chars(&long, 60).chars().count(), 60);
    }

    #[test]
    fn clamp_respects_char_boundaries() {
        let text = "ñ".repeat(10);
        assert_eq!(clamp_chars(&text, 5).chars().count(), 5);
    }
}
