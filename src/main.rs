//! mcrelay CLI - relay for the Salesforce Marketing Cloud REST API

use clap::Parser;

mod cli;
mod client;
mod config;
mod error;
mod output;

use cli::{Cli, Commands, GlobalOptions};
use error::Result;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins; otherwise `--debug` picks debug over info.
fn init_logging(debug: bool) {
    let level = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(format!("mcrelay={level}")),
    )
    .init();
}

async fn run(cli: Cli) -> Result<()> {
    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::TestConnect => cli::connect::run(&opts).await,
        Commands::NewContact(args) => cli::contact::create(&opts, args).await,
        Commands::ContactCount => cli::contact::count(&opts).await,
        Commands::NewPush(args) => cli::push::create(&opts, args).await,
        Commands::SendPush { message_id } => cli::push::send(&opts, &message_id).await,
        Commands::Status => cli::status::run(&opts),
        Commands::Version => {
            println!("mcrelay version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
