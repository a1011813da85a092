//! Status command implementation

use colored::Colorize;
use serde_json::json;

use crate::cli::{GlobalOptions, OutputFormat};
use crate::client::models::auth::mask;
use crate::config::Config;
use crate::error::Result;
use crate::output::json::format_json;

/// Run the status command to display configuration status
pub fn run(opts: &GlobalOptions) -> Result<()> {
    let config = Config::load_at(opts.config_ref())?;
    let config_path = match opts.config_ref() {
        Some(p) => p.to_string(),
        None => Config::default_path()?.display().to_string(),
    };
    let ready = config.validate().is_ok();

    if opts.format == OutputFormat::Json {
        let data = json!({
            "configFile": config_path,
            "authUrl": config.auth_url,
            "restBaseUrl": config.base_url(),
            "clientId": config.client_id.as_deref().map(mask),
            "clientSecretSet": config.client_secret.is_some(),
            "appId": config.app_id,
            "appName": config.app_name,
            "ready": ready,
        });
        println!("{}", format_json("status", &data)?);
        return Ok(());
    }

    println!("{}\n", "mcrelay Configuration Status".bold());
    println!("Config file: {}", config_path.cyan());
    println!("Auth URL: {}", config.auth_url);
    println!("REST base URL: {}", config.base_url());
    println!();

    match config.client_id.as_deref() {
        Some(id) => println!("{} Client ID configured ({})", "✓".green(), mask(id)),
        None => println!("{} Client ID not configured (SFMC_API_CLIENTID)", "✗".red()),
    }
    if config.client_secret.is_some() {
        println!("{} Client secret configured", "✓".green());
    } else {
        println!(
            "{} Client secret not configured (SFMC_API_CLIENTSECRET)",
            "✗".red()
        );
    }

    match (&config.app_id, &config.app_name) {
        (Some(id), name) => println!(
            "{} Push application: {} {}",
            "✓".green(),
            id,
            name.as_deref().unwrap_or_default().dimmed()
        ),
        _ => println!("{} No default push application set", "○".dimmed()),
    }

    println!();
    if ready {
        println!("{} Ready", "✓".green());
    } else if let Err(e) = config.validate() {
        println!("{} {}", "✗".red(), e);
    }

    Ok(())
}
