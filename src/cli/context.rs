//! Command execution context
//!
//! Loads configuration once and builds the single shared client that every
//! command handler talks through.

use std::sync::Arc;

use crate::cli::{Cli, OutputFormat};
use crate::client::MarketingCloudClient;
use crate::config::Config;
use crate::error::Result;

/// Global CLI options passed to all command handlers.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Output format (pretty, json)
    pub format: OutputFormat,

    /// Custom config file path (defaults to ~/.mcrelay/config.yaml)
    pub config: Option<String>,
}

impl GlobalOptions {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
        }
    }

    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }
}

/// Context for command execution containing config, client, and output format.
pub struct CommandContext {
    /// Authenticating API client (Arc-wrapped for concurrent use)
    pub client: Arc<MarketingCloudClient>,
    /// Output format preference
    pub format: OutputFormat,
}

impl CommandContext {
    /// Load config, validate credentials and build the client.
    ///
    /// # Errors
    /// Returns error if config cannot be loaded or the credentials are missing.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config = Config::load_at(opts.config_ref())?;
        let client = Arc::new(MarketingCloudClient::new(&config)?);

        Ok(Self {
            client,
            format: opts.format,
        })
    }
}
