use clap::{Args, Subcommand};

/// Forwarding-rule commands, all scoped to one mailbox.
#[derive(Clone, Debug, Subcommand)]
pub enum ForwardingCommands {
    /// List forwarding rules for a mailbox.
    List(ForwardingListArgs),
    /// Add a forwarding rule.
    Add(ForwardingAddArgs),
    /// Update a rule's recipient or enabled state.
    Update(ForwardingUpdateArgs),
    /// Remove a forwarding rule.
    Remove(ForwardingRemoveArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ForwardingListArgs {
    /// Mailbox id.
    pub mailbox_id: i64,
}

#[derive(Clone, Debug, Args)]
pub struct ForwardingAddArgs {
    /// Mailbox id.
    pub mailbox_id: i64,
    /// Address to forward to.
    pub recipient: String,
    /// Create the rule disabled.
    #[arg(long)]
    pub disabled: bool,
}

#[derive(Clone, Debug, Args)]
pub struct ForwardingUpdateArgs {
    /// Mailbox id.
    pub mailbox_id: i64,
    /// Rule id.
    pub rule_id: i64,
    /// New recipient address.
    pub recipient: String,
    /// Disable the rule.
    #[arg(long)]
    pub disabled: bool,
}

#[derive(Clone, Debug, Args)]
pub struct ForwardingRemoveArgs {
    /// Mailbox id.
    pub mailbox_id: i64,
    /// Rule id.
    pub rule_id: i64,
}
