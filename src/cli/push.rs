//! Push message command implementations

use serde_json::json;

use crate::cli::context::CommandContext;
use crate::cli::{GlobalOptions, NewPushArgs};
use crate::client::models::PushApplication;
use crate::client::{MarketingCloudApi, PushRequest};
use crate::error::Result;
use crate::output::print_result;

impl From<NewPushArgs> for PushRequest {
    fn from(args: NewPushArgs) -> Self {
        let application = if args.app_id.is_some() || args.app_name.is_some() {
            Some(vec![PushApplication {
                id: args.app_id,
                name: args.app_name,
            }])
        } else {
            None
        };

        Self {
            message_type: args.message_type,
            content_type: args.content_type,
            name: args.name,
            application,
            ..PushRequest::new(args.title, args.subtitle, args.alert)
        }
    }
}

/// Run the new-push command
pub async fn create(opts: &GlobalOptions, args: NewPushArgs) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let message = ctx.client.create_push(args.into()).await?;

    print_result(
        ctx.format,
        "new-push",
        &format!("Created push message {}", message.id),
        &json!({ "messageId": message.id }),
    )
}

/// Run the send-push command
pub async fn send(opts: &GlobalOptions, message_id: &str) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let response = ctx.client.send_push(message_id).await?;

    print_result(
        ctx.format,
        "send-push",
        "Successfully sent push message to devices",
        &response,
    )
}
