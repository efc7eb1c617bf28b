//! # gitscribe
//!
//! AI-assisted commit message and pull request documentation generator.
//!
//! gitscribe reads local git state through the `git` binary, classifies the
//! repository's remote as GitHub or Azure DevOps, asks a language model to
//! draft commit messages or PR documentation from the diff, and can create or
//! update the pull request on the detected host.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod git;
pub mod llm;
pub mod workflows;

pub use crate::cli::Cli;

/// The current version of gitscribe.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
