//! Error taxonomy shared across the crate.
//!
//! Domain errors are concrete `thiserror` enums so the CLI layer can
//! distinguish known failure classes from unexpected ones; everything else
//! travels through `anyhow` with context attached at the call site.

use thiserror::Error;

/// Errors from local git invocations and remote host APIs.
#[derive(Error, Debug)]
pub enum GitProviderError {
    /// The configured remote URL could not be classified as a supported host.
    #[error("could not determine git provider for remote URL: {0}")]
    UnknownProvider(String),

    /// A local `git` invocation exited non-zero.
    #[error("git command failed: {0}")]
    CommandFailed(String),

    /// The host API returned 404 for a repository or pull request.
    #[error("{0} not found or no access")]
    NotFound(String),

    /// The host API returned 403.
    #[error("invalid token or insufficient permissions for {0}")]
    AuthFailed(String),

    /// An open pull request already exists for the requested branch pair.
    #[error(
        "an open pull request (#{number}) already exists for {from_branch} -> {to_branch}; \
         use --pr {number} to update it instead of creating a duplicate"
    )]
    DuplicatePullRequest {
        /// Number of the already-open pull request.
        number: u64,
        /// Source branch of the existing pull request.
        from_branch: String,
        /// Target branch of the existing pull request.
        to_branch: String,
    },

    /// Any other non-2xx response from the host API.
    #[error("{host} API error (HTTP {status}): {message}")]
    ApiError {
        /// Host name the request was sent to.
        host: &'static str,
        /// HTTP status code of the response.
        status: u16,
        /// Error message extracted from the response body.
        message: String,
    },

    /// Network-level failure before an HTTP status was available.
    #[error("network error: {0}")]
    Network(String),
}

/// Errors from the language-model provider.
#[derive(Error, Debug)]
pub enum LlmProviderError {
    /// API key missing from configuration and environment.
    #[error("LLM API key not found. Set GITSCRIBE_OPENAI_API_KEY or run `gitscribe config set openai_api_key <key>`")]
    ApiKeyNotFound,

    /// The LLM API request failed with an error response.
    #[error("LLM API request failed: {0}")]
    RequestFailed(String),

    /// The LLM response could not be parsed into the expected shape.
    #[error("invalid response from LLM API: {0}")]
    InvalidResponse(String),

    /// Network-level failure.
    #[error("network error: {0}")]
    Network(String),
}

/// Configuration loading and persistence errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file exists but could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// Path to the offending file.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file contains invalid JSON.
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        /// Path to the offending file.
        path: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// An unknown key was passed to `config set`.
    #[error("unknown config key: {0}")]
    UnknownKey(String),
}
