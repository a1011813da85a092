//! Connection test command

use serde_json::json;

use crate::cli::GlobalOptions;
use crate::cli::context::CommandContext;
use crate::client::MarketingCloudApi;
use crate::client::models::auth::mask;
use crate::error::Result;
use crate::output::print_result;

/// Run the test-connect command.
///
/// Pretty output shows a masked token; JSON output carries the full token
/// for scripts.
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let token = ctx.client.test_connection().await?;

    print_result(
        ctx.format,
        "test-connect",
        &format!("Successfully connected to Marketing Cloud (token {})", mask(&token)),
        &json!({ "accessToken": token }),
    )
}
