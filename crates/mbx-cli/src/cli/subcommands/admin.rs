use clap::{Args, Subcommand};

/// Administration commands. The server rejects these with 403 for
/// non-admin sessions.
#[derive(Clone, Debug, Subcommand)]
pub enum AdminCommands {
    /// User management.
    User {
        #[command(subcommand)]
        action: UserCommands,
    },
    /// Mailbox provisioning and assignment.
    Mailbox {
        #[command(subcommand)]
        action: AdminMailboxCommands,
    },
    /// Whitelisted sender domains.
    Whitelist {
        #[command(subcommand)]
        action: WhitelistCommands,
    },
    /// Show the audit log.
    AuditLog,
}

#[derive(Clone, Debug, Subcommand)]
pub enum UserCommands {
    /// List all users.
    List,
    /// Create a user.
    Create(UserCreateArgs),
    /// Trigger a password reset.
    ResetPassword(UserRefArgs),
    /// Delete a user.
    Delete(UserRefArgs),
}

#[derive(Clone, Debug, Args)]
pub struct UserCreateArgs {
    /// Email address.
    pub email: String,
    /// Display name.
    pub display_name: String,
    /// Role: SYSTEM_ADMIN, TEAM_MEMBER, or CLIENT_USER.
    #[arg(long, default_value = "CLIENT_USER")]
    pub role: String,
}

#[derive(Clone, Debug, Args)]
pub struct UserRefArgs {
    /// User id.
    pub user_id: String,
}

#[derive(Clone, Debug, Subcommand)]
pub enum AdminMailboxCommands {
    /// List all mailboxes, including unassigned ones.
    List,
    /// Provision a mailbox.
    Create(AdminMailboxCreateArgs),
    /// Assign a mailbox to a user.
    Assign(AdminMailboxAssignArgs),
    /// Delete a mailbox.
    Delete(AdminMailboxRefArgs),
}

#[derive(Clone, Debug, Args)]
pub struct AdminMailboxRefArgs {
    /// Mailbox id.
    pub mailbox_id: i64,
}

#[derive(Clone, Debug, Args)]
pub struct AdminMailboxCreateArgs {
    /// Email address for the new mailbox.
    pub email_address: String,
    /// Quota in megabytes.
    #[arg(long)]
    pub quota_mb: Option<u32>,
}

#[derive(Clone, Debug, Args)]
pub struct AdminMailboxAssignArgs {
    /// Mailbox id.
    pub mailbox_id: i64,
    /// User id to assign it to.
    pub user_id: String,
}

#[derive(Clone, Debug, Subcommand)]
pub enum WhitelistCommands {
    /// List whitelisted sender domains.
    List,
    /// Whitelist a sender domain.
    Add(WhitelistDomainArgs),
    /// Remove a sender domain from the whitelist.
    Remove(WhitelistDomainArgs),
}

#[derive(Clone, Debug, Args)]
pub struct WhitelistDomainArgs {
    /// Sender domain, e.g. partner.example.com.
    pub domain: String,
}
