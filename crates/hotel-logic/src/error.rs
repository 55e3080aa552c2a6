//! Error types for the fallible edges of the crate.
//!
//! Gameplay never fails: rejected actions are reported through outcome enums
//! in [`crate::lifecycle`]. Only loading configuration can go wrong.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigIssue;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {}", format_issues(.0))]
    Invalid(Vec<ConfigIssue>),
}

fn format_issues(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
