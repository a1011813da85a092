//! Contact command implementations

use log::debug;
use serde_json::json;

use crate::cli::context::CommandContext;
use crate::cli::{GlobalOptions, NewContactArgs};
use crate::client::{ContactRequest, MarketingCloudApi, run_bounded};
use crate::error::Result;
use crate::output::print_result;

/// Run the new-contact command
pub async fn create(opts: &GlobalOptions, args: NewContactArgs) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let request = ContactRequest {
        first_name: args.first_name,
        last_name: args.last_name,
        email: args.email,
    };

    if args.count == 1 {
        let created = ctx.client.create_contact(request).await?;
        return print_result(
            ctx.format,
            "new-contact",
            "Successfully created new Contact",
            &json!({ "created": created }),
        );
    }

    debug!(
        "Creating {} contacts, {} at a time",
        args.count, args.concurrency
    );
    let client = ctx.client.clone();
    let results = run_bounded(
        args.count as usize,
        move |_| {
            let c = client.clone();
            let req = request.clone();
            async move { c.create_contact(req).await }
        },
        args.concurrency as usize,
    )
    .await?;

    let created = results.iter().filter(|ok| **ok).count();
    debug!(
        "Token fetches for batch: {}",
        ctx.client.tokens().fetch_count()
    );

    print_result(
        ctx.format,
        "new-contact",
        &format!("Successfully created {} new Contacts", created),
        &json!({ "created": created }),
    )
}

/// Run the contact-count command
pub async fn count(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let count = ctx.client.contact_count().await?;

    print_result(
        ctx.format,
        "contact-count",
        &format!("Contact count = {}", count),
        &json!({ "count": count }),
    )
}
