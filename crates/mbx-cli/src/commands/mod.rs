pub mod admin;
pub mod auth;
pub mod forwarding;
pub mod mailbox;

use crate::cli::{Commands, GlobalFlags};
use crate::context::AppContext;

/// Route a parsed command to its handler. Commands that call the backend
/// require a configured base URL up front; auth commands are exempt so
/// dev-bypass login and status work before any API is configured.
///
/// # Errors
///
/// Propagates handler failures.
pub async fn dispatch(
    command: Commands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Auth { action } => auth::handle(&action, flags, ctx).await,
        Commands::Mailbox { action } => {
            ctx.config.api.require_configured()?;
            mailbox::handle(&action, flags, ctx).await
        }
        Commands::Forwarding { action } => {
            ctx.config.api.require_configured()?;
            forwarding::handle(&action, flags, ctx).await
        }
        Commands::Admin { action } => {
            ctx.config.api.require_configured()?;
            admin::handle(&action, flags, ctx).await
        }
    }
}
