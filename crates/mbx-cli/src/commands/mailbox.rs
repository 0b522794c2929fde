use mbx_client::mailbox::ReplyRequest;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::mailbox::MailboxCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `mbx mailbox <subcommand>`.
///
/// # Errors
///
/// Propagates API failures.
pub async fn handle(
    action: &MailboxCommands,
    flags: &GlobalFlags,
    ctx: &AppContext,
) -> anyhow::Result<()> {
    match action {
        MailboxCommands::List => {
            let mailboxes = ctx.client.mailboxes().await?;
            output(&mailboxes, flags.format)
        }
        MailboxCommands::Messages(args) => {
            let messages = ctx.client.messages(args.mailbox_id).await?;
            output(&messages, flags.format)
        }
        MailboxCommands::Read(args) => {
            let message = ctx.client.message(args.mailbox_id, args.message_id).await?;
            output(&message, flags.format)
        }
        MailboxCommands::Reply(args) => {
            let sent = ctx
                .client
                .reply(
                    args.mailbox_id,
                    args.message_id,
                    &ReplyRequest {
                        body: args.body.clone(),
                    },
                )
                .await?;
            output(&sent, flags.format)
        }
    }
}
