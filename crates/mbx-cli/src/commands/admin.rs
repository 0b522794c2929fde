use serde::Serialize;

use mbx_client::admin::{
    AssignMailboxRequest, CreateMailboxRequest, CreateUserRequest, WhitelistSenderRequest,
};
use mbx_core::Role;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::admin::{
    AdminCommands, AdminMailboxCommands, UserCommands, WhitelistCommands,
};
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct DoneResponse {
    done: bool,
    subject: String,
}

/// Handle `mbx admin <subcommand>`.
///
/// # Errors
///
/// Propagates API failures; a non-admin session surfaces the server's 403.
pub async fn handle(
    action: &AdminCommands,
    flags: &GlobalFlags,
    ctx: &AppContext,
) -> anyhow::Result<()> {
    match action {
        AdminCommands::User { action } => handle_user(action, flags, ctx).await,
        AdminCommands::Mailbox { action } => handle_mailbox(action, flags, ctx).await,
        AdminCommands::Whitelist { action } => handle_whitelist(action, flags, ctx).await,
        AdminCommands::AuditLog => {
            let entries = ctx.client.admin_audit_log().await?;
            output(&entries, flags.format)
        }
    }
}

async fn handle_user(
    action: &UserCommands,
    flags: &GlobalFlags,
    ctx: &AppContext,
) -> anyhow::Result<()> {
    match action {
        UserCommands::List => {
            let users = ctx.client.admin_users().await?;
            output(&users, flags.format)
        }
        UserCommands::Create(args) => {
            let role = Role::parse(&args.role).ok_or_else(|| {
                anyhow::anyhow!(
                    "unknown role '{}': expected SYSTEM_ADMIN, TEAM_MEMBER, or CLIENT_USER",
                    args.role
                )
            })?;
            let user = ctx
                .client
                .admin_create_user(&CreateUserRequest {
                    email: args.email.clone(),
                    display_name: args.display_name.clone(),
                    role,
                })
                .await?;
            output(&user, flags.format)
        }
        UserCommands::ResetPassword(args) => {
            ctx.client.admin_reset_password(&args.user_id).await?;
            output(
                &DoneResponse {
                    done: true,
                    subject: args.user_id.clone(),
                },
                flags.format,
            )
        }
        UserCommands::Delete(args) => {
            ctx.client.admin_delete_user(&args.user_id).await?;
            output(
                &DoneResponse {
                    done: true,
                    subject: args.user_id.clone(),
                },
                flags.format,
            )
        }
    }
}

async fn handle_mailbox(
    action: &AdminMailboxCommands,
    flags: &GlobalFlags,
    ctx: &AppContext,
) -> anyhow::Result<()> {
    match action {
        AdminMailboxCommands::List => {
            let mailboxes = ctx.client.admin_mailboxes().await?;
            output(&mailboxes, flags.format)
        }
        AdminMailboxCommands::Create(args) => {
            let mailbox = ctx
                .client
                .admin_create_mailbox(&CreateMailboxRequest {
                    email_address: args.email_address.clone(),
                    quota_mb: args.quota_mb,
                })
                .await?;
            output(&mailbox, flags.format)
        }
        AdminMailboxCommands::Assign(args) => {
            let mailbox = ctx
                .client
                .admin_assign_mailbox(
                    args.mailbox_id,
                    &AssignMailboxRequest {
                        user_id: args.user_id.clone(),
                    },
                )
                .await?;
            output(&mailbox, flags.format)
        }
        AdminMailboxCommands::Delete(args) => {
            ctx.client.admin_delete_mailbox(args.mailbox_id).await?;
            output(
                &DoneResponse {
                    done: true,
                    subject: args.mailbox_id.to_string(),
                },
                flags.format,
            )
        }
    }
}

async fn handle_whitelist(
    action: &WhitelistCommands,
    flags: &GlobalFlags,
    ctx: &AppContext,
) -> anyhow::Result<()> {
    match action {
        WhitelistCommands::List => {
            let senders = ctx.client.admin_whitelisted_senders().await?;
            output(&senders, flags.format)
        }
        WhitelistCommands::Add(args) => {
            let sender = ctx
                .client
                .admin_whitelist_sender(&WhitelistSenderRequest {
                    domain: args.domain.clone(),
                })
                .await?;
            output(&sender, flags.format)
        }
        WhitelistCommands::Remove(args) => {
            ctx.client
                .admin_remove_whitelisted_sender(&args.domain)
                .await?;
            output(
                &DoneResponse {
                    done: true,
                    subject: args.domain.clone(),
                },
                flags.format,
            )
        }
    }
}
