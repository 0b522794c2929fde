use serde::Serialize;

use mbx_auth::{
    GuardEnvironment, IdentityBroker, LoginExperience, SessionRecord, choose_experience,
    dev_bypass, local, resolve_session,
};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::{AuthCommands, AuthLoginArgs};
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AuthStatusResponse {
    authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    principal_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    display_name: Option<String>,
    roles: Vec<String>,
}

impl AuthStatusResponse {
    fn anonymous() -> Self {
        Self {
            authenticated: false,
            mode: None,
            principal_id: None,
            email: None,
            display_name: None,
            roles: Vec::new(),
        }
    }

    fn from_session(session: &SessionRecord) -> Self {
        Self {
            authenticated: true,
            mode: Some(session.mode.namespace().to_string()),
            principal_id: Some(session.identity.principal_id.clone()),
            email: Some(session.identity.email.clone()),
            display_name: Some(session.identity.display_name.clone()),
            roles: session
                .identity
                .roles
                .iter()
                .map(|role| role.as_str().to_string())
                .collect(),
        }
    }
}

/// Handle `mbx auth <subcommand>`.
///
/// # Errors
///
/// Fails when login is rejected or the store cannot be updated.
pub async fn handle(
    action: &AuthCommands,
    flags: &GlobalFlags,
    ctx: &AppContext,
) -> anyhow::Result<()> {
    match action {
        AuthCommands::Login(args) => login(args, flags, ctx).await,
        AuthCommands::Logout => logout(flags, ctx).await,
        AuthCommands::Status => status(flags, ctx),
    }
}

async fn login(args: &AuthLoginArgs, flags: &GlobalFlags, ctx: &AppContext) -> anyhow::Result<()> {
    if args.dev {
        login_dev(ctx)?;
    } else if let (Some(email), Some(password)) = (&args.email, &args.password) {
        login_local(ctx, email, password).await?;
    } else {
        // No mode forced: the environment picks, same as the app's login view.
        match choose_experience(GuardEnvironment::from_config(&ctx.config)) {
            LoginExperience::DevBypass => login_dev(ctx)?,
            LoginExperience::LocalForm => anyhow::bail!(
                "federated sign-in is not configured; use 'mbx auth login --email <email> --password <password>'"
            ),
            LoginExperience::FederatedRedirect => {
                ctx.client
                    .broker()
                    .login_redirect(&ctx.config.entra.scopes)
                    .await?;
            }
        }
    }

    status(flags, ctx)
}

fn login_dev(ctx: &AppContext) -> anyhow::Result<()> {
    if !ctx.config.app.is_development() {
        anyhow::bail!("the development bypass is only available in development environments");
    }
    dev_bypass::login(ctx.store.as_ref())?;
    Ok(())
}

async fn login_local(ctx: &AppContext, email: &str, password: &str) -> anyhow::Result<()> {
    let http = reqwest::Client::new();
    local::login(
        &http,
        ctx.config.api.base_url_trimmed(),
        ctx.store.as_ref(),
        email,
        password,
    )
    .await?;
    Ok(())
}

async fn logout(flags: &GlobalFlags, ctx: &AppContext) -> anyhow::Result<()> {
    // Broker logout first so the federated account is forgotten upstream,
    // then drop every stored credential.
    if let Err(error) = ctx.client.broker().logout_redirect().await {
        tracing::warn!(%error, "federated logout failed; clearing local credentials anyway");
    }
    mbx_auth::logout(ctx.store.as_ref())?;

    output(&AuthStatusResponse::anonymous(), flags.format)
}

fn status(flags: &GlobalFlags, ctx: &AppContext) -> anyhow::Result<()> {
    let response = resolve_session(ctx.store.as_ref(), ctx.client.broker()).map_or_else(
        AuthStatusResponse::anonymous,
        |session| AuthStatusResponse::from_session(&session),
    );
    output(&response, flags.format)
}
