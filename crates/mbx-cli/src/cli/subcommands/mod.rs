pub mod admin;
pub mod auth;
pub mod forwarding;
pub mod mailbox;

pub use admin::AdminCommands;
pub use auth::AuthCommands;
pub use forwarding::ForwardingCommands;
pub use mailbox::MailboxCommands;
