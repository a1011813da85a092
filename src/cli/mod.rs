//! CLI command definitions and handlers

use clap::{Args, Parser, Subcommand};

pub mod connect;
pub mod contact;
pub mod context;
pub mod push;
pub mod status;

pub use crate::output::OutputFormat;
pub use context::GlobalOptions;

/// mcrelay - forward operations to the Salesforce Marketing Cloud REST API
#[derive(Parser, Debug)]
#[command(name = "mcrelay")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, json)
    #[arg(
        long,
        global = true,
        env = "MCRELAY_FORMAT",
        default_value = "pretty",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "MCRELAY_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "MCRELAY_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Authenticate against Marketing Cloud and report the outcome
    TestConnect,

    /// Create a new contact
    NewContact(NewContactArgs),

    /// Get the number of contacts in the account
    ContactCount,

    /// Create a new push message
    NewPush(NewPushArgs),

    /// Send a push message to its devices
    SendPush {
        /// Push message id returned by `new-push`
        message_id: String,
    },

    /// Show resolved configuration
    Status,

    /// Display version information
    Version,
}

/// Arguments for `new-contact`
#[derive(Debug, Clone, Args)]
pub struct NewContactArgs {
    /// First name (generated if omitted)
    #[arg(long)]
    pub first_name: Option<String>,

    /// Last name (generated if omitted)
    #[arg(long)]
    pub last_name: Option<String>,

    /// Email address (generated if omitted)
    #[arg(long)]
    pub email: Option<String>,

    /// Number of contacts to create
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=1000))]
    pub count: u32,

    /// Maximum contacts created concurrently when --count > 1
    #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u32).range(1..=32))]
    pub concurrency: u32,
}

/// Arguments for `new-push`
#[derive(Debug, Clone, Args)]
pub struct NewPushArgs {
    /// Notification title
    #[arg(long)]
    pub title: String,

    /// Notification subtitle
    #[arg(long)]
    pub subtitle: String,

    /// Alert text
    #[arg(long)]
    pub alert: String,

    /// Message type (defaults to 1)
    #[arg(long)]
    pub message_type: Option<u32>,

    /// Content type (defaults to 1)
    #[arg(long)]
    pub content_type: Option<u32>,

    /// Message name (generated if omitted)
    #[arg(long)]
    pub name: Option<String>,

    /// Target application id (defaults to SFMC_APP_ID)
    #[arg(long)]
    pub app_id: Option<String>,

    /// Target application name (defaults to SFMC_APP_NAME)
    #[arg(long)]
    pub app_name: Option<String>,
}
