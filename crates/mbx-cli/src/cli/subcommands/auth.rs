use clap::{Args, Subcommand};

/// Authentication commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuthCommands {
    /// Sign in. The mode is picked from the environment unless forced.
    Login(AuthLoginArgs),
    /// Clear every stored credential.
    Logout,
    /// Show the resolved session, if any.
    Status,
}

#[derive(Clone, Debug, Args)]
pub struct AuthLoginArgs {
    /// Force the development bypass (development environments only).
    #[arg(long, conflicts_with_all = ["email", "password"])]
    pub dev: bool,
    /// Sign in with a local account.
    #[arg(long, requires = "password")]
    pub email: Option<String>,
    /// Password for --email.
    #[arg(long, requires = "email")]
    pub password: Option<String>,
}
