use clap::{Args, Subcommand};

/// Mailbox and message commands.
#[derive(Clone, Debug, Subcommand)]
pub enum MailboxCommands {
    /// List the mailboxes visible to the current session.
    List,
    /// List message summaries for a mailbox.
    Messages(MailboxRefArgs),
    /// Read one full message.
    Read(MessageRefArgs),
    /// Reply to a message.
    Reply(ReplyArgs),
}

#[derive(Clone, Debug, Args)]
pub struct MailboxRefArgs {
    /// Mailbox id.
    pub mailbox_id: i64,
}

#[derive(Clone, Debug, Args)]
pub struct MessageRefArgs {
    /// Mailbox id.
    pub mailbox_id: i64,
    /// Message id.
    pub message_id: i64,
}

#[derive(Clone, Debug, Args)]
pub struct ReplyArgs {
    /// Mailbox id.
    pub mailbox_id: i64,
    /// Message id to reply to.
    pub message_id: i64,
    /// Reply body text.
    #[arg(long)]
    pub body: String,
}
