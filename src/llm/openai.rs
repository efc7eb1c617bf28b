//! OpenAI chat-completions provider.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{clamp_chars, prompts, LlmProvider, MAX_COMMIT_SUBJECT_LEN, MAX_PR_TITLE_LEN};
use crate::data::{CommitContext, GenerationResult, PrContext};
use crate::error::LlmProviderError;

const DEFAULT_BASE_URL: &str = "https://api.openai.com";

#[derive(Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f32,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

/// OpenAI-compatible chat completions client.
pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiProvider {
    /// Creates a provider for api.openai.com.
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Overrides the API base URL (compatible servers, tests).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let mut base = base_url.into();
        while base.ends_with('/') {
            base.pop();
        }
        self.base_url = base;
        self
    }

    async fn send_request(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, LlmProviderError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                Message {
                    role: "system",
                    content: system_prompt.to_string(),
                },
                Message {
                    role: "user",
                    content: user_prompt.to_string(),
                },
            ],
            // Low temperature for consistent output.
            temperature: 0.1,
        };

        let url = format!("{}/v1/chat/completions", self.base_url);
        debug!(url, model = %self.model, "sending LLM request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmProviderError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(LlmProviderError::RequestFailed(format!(
                "HTTP {status}: {error_text}"
            )));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmProviderError::InvalidResponse(e.to_string()))?;

        chat.choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| LlmProviderError::InvalidResponse("no choices in response".to_string()))
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn generate_commit_message(
        &self,
        context: &CommitContext,
    ) -> Result<String, LlmProviderError> {
        let user_prompt = prompts::commit_user_prompt(context);
        let response = self
            .send_request(prompts::COMMIT_SYSTEM_PROMPT, &user_prompt)
            .await?;

        Ok(parse_commit_message(&response))
    }

    async fn generate_pr_documentation(
        &self,
        context: &PrContext,
    ) -> Result<GenerationResult, LlmProviderError> {
        let user_prompt = prompts::pr_user_prompt(context);
        let response = self
            .send_request(prompts::PR_SYSTEM_PROMPT, &user_prompt)
            .await?;

        parse_pr_documentation(&response)
    }
}

/// Normalizes a commit message response and clamps its subject line.
fn parse_commit_message(content: &str) -> String {
    let content = strip_code_fence(content).trim().to_string();

    let mut lines = content.lines();
    let subject = clamp_chars(lines.next().unwrap_or(""), MAX_COMMIT_SUBJECT_LEN);
    let rest: Vec<&str> = lines.collect();

    if rest.iter().all(|l| l.trim().is_empty()) {
        subject
    } else {
        format!("{subject}\n{}", rest.join("\n"))
    }
}

/// Parses the JSON `{title, body}` object out of a PR documentation response.
fn parse_pr_documentation(content: &str) -> Result<GenerationResult, LlmProviderError> {
    let json = strip_code_fence(content).trim().to_string();

    let mut result: GenerationResult = serde_json::from_str(&json).map_err(|e| {
        LlmProviderError::InvalidResponse(format!("expected JSON with title and body: {e}"))
    })?;

    result.title = clamp_chars(result.title.trim(), MAX_PR_TITLE_LEN);
    Ok(result)
}

/// Strips a surrounding markdown code fence, if present.
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    if !trimmed.starts_with("```") {
        return trimmed;
    }

    trimmed
        .split_once('\n')
        .map(|(_, rest)| rest.rsplit_once("```").map_or(rest, |(inner, _)| inner))
        .unwrap_or(trimmed)
}
