use serde::Serialize;

use mbx_client::mailbox::ForwardingRuleRequest;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::forwarding::ForwardingCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct RemovedResponse {
    removed: bool,
    rule_id: i64,
}

/// Handle `mbx forwarding <subcommand>`.
///
/// # Errors
///
/// Propagates API failures.
pub async fn handle(
    action: &ForwardingCommands,
    flags: &GlobalFlags,
    ctx: &AppContext,
) -> anyhow::Result<()> {
    match action {
        ForwardingCommands::List(args) => {
            let rules = ctx.client.forwarding_rules(args.mailbox_id).await?;
            output(&rules, flags.format)
        }
        ForwardingCommands::Add(args) => {
            let rule = ctx
                .client
                .create_forwarding_rule(
                    args.mailbox_id,
                    &ForwardingRuleRequest {
                        recipient_email: args.recipient.clone(),
                        is_enabled: !args.disabled,
                    },
                )
                .await?;
            output(&rule, flags.format)
        }
        ForwardingCommands::Update(args) => {
            let rule = ctx
                .client
                .update_forwarding_rule(
                    args.mailbox_id,
                    args.rule_id,
                    &ForwardingRuleRequest {
                        recipient_email: args.recipient.clone(),
                        is_enabled: !args.disabled,
                    },
                )
                .await?;
            output(&rule, flags.format)
        }
        ForwardingCommands::Remove(args) => {
            ctx.client
                .delete_forwarding_rule(args.mailbox_id, args.rule_id)
                .await?;
            output(
                &RemovedResponse {
                    removed: true,
                    rule_id: args.rule_id,
                },
                flags.format,
            )
        }
    }
}
