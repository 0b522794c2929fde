use clap::Subcommand;

use super::subcommands::{AdminCommands, AuthCommands, ForwardingCommands, MailboxCommands};

/// Root command tree for the `mbx` binary.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sign in, sign out, and inspect the active session.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Browse mailboxes and messages.
    Mailbox {
        #[command(subcommand)]
        action: MailboxCommands,
    },
    /// Manage per-mailbox forwarding rules.
    Forwarding {
        #[command(subcommand)]
        action: ForwardingCommands,
    },
    /// Administration: users, mailbox provisioning, sender whitelist, audit log.
    Admin {
        #[command(subcommand)]
        action: AdminCommands,
    },
}
