use std::time::Duration;

use clap::{Parser, Subcommand};
use labels_client::HttpConfig;

#[derive(Debug, Parser)]
#[command(name = "labels", about = "Manage labels on a platform service")]
pub struct CliConfig {
    /// Service URL
    #[arg(long, env = "LABELS_URL", default_value = "http://localhost:9999")]
    pub url: String,

    /// API token, sent as `Authorization: Token <token>`
    #[arg(long, env = "LABELS_TOKEN")]
    pub token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "LABELS_TIMEOUT", default_value = "30")]
    pub timeout: u64,

    #[command(subcommand)]
    pub command: Command,
}

impl CliConfig {
    pub fn http_config(&self) -> HttpConfig {
        HttpConfig {
            base_url: self.url.clone(),
            token: self.token.clone(),
            timeout: Some(Duration::from_secs(self.timeout)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// List all labels
    List,
    /// Show one label
    Get { id: String },
    /// Create a label
    Create {
        name: String,
        /// Property as key=value (repeatable)
        #[arg(short = 'p', long = "property", value_parser = parse_property)]
        properties: Vec<(String, String)>,
    },
    /// Merge properties into a label; `-p key=` removes a key
    Update {
        id: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// Property as key=value (repeatable)
        #[arg(short = 'p', long = "property", value_parser = parse_property)]
        properties: Vec<(String, String)>,
    },
    /// Delete a label (succeeds if it is already gone)
    Delete { id: String },
}

/// Split `key=value` on the first `=`. The value may be empty.
pub fn parse_property(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, _)) if key.is_empty() => Err(format!("empty property key in {s:?}")),
        Some((key, value)) => Ok((key.to_string(), value.to_string())),
        None => Err(format!("expected key=value, got {s:?}")),
    }
}
