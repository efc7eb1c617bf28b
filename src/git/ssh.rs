//! SSH client configuration lookup.
//!
//! Remote URLs that use an SSH alias (`git@work-github:owner/repo.git`) only
//! reveal their real host through the user's `~/.ssh/config`. This wraps
//! `ssh2-config` so an absent or unparsable file degrades to an empty host
//! map instead of failing resolution outright.

use std::io::BufRead;

use ssh2_config::{ParseRule, SshConfig};
use tracing::debug;

/// Resolves SSH host aliases to their configured `HostName`.
#[derive(Debug, Default)]
pub struct SshConfigResolver {
    config: Option<SshConfig>,
}

impl SshConfigResolver {
    /// Loads the user's default SSH config (`~/.ssh/config`).
    ///
    /// Missing or malformed files yield a resolver with no entries.
    pub fn load_default() -> Self {
        match SshConfig::parse_default_file(ParseRule::ALLOW_UNKNOWN_FIELDS) {
            Ok(config) => Self {
                config: Some(config),
            },
            Err(e) => {
                debug!(error = %e, "SSH config unavailable, treating as empty");
                Self { config: None }
            }
        }
    }

    /// Parses SSH config content from a reader.
    ///
    /// Used by tests and callers with a non-default config location.
    pub fn from_reader<R: BufRead>(reader: &mut R) -> Self {
        match SshConfig::default().parse(reader, ParseRule::ALLOW_UNKNOWN_FIELDS) {
            Ok(config) => Self {
                config: Some(config),
            },
            Err(e) => {
                debug!(error = %e, "failed to parse SSH config, treating as empty");
                Self { config: None }
            }
        }
    }

    /// Returns the configured `HostName` for an alias, if any.
    pub fn hostname_for(&self, alias: &str) -> Option<String> {
        let config = self.config.as_ref()?;
        config.query(alias).host_name
    }
}
