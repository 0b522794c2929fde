use anyhow::Context;

use mbx_config::MbxConfig;

/// Load layered configuration, including a project `.env` when present.
///
/// # Errors
///
/// Fails when configuration extraction fails.
pub fn load_config() -> anyhow::Result<MbxConfig> {
    let config = MbxConfig::load_with_dotenv().context("failed to load configuration")?;
    warn_unconfigured(&config);
    Ok(config)
}

fn warn_unconfigured(config: &MbxConfig) {
    if config.api.base_url.is_empty() {
        tracing::warn!("api.base_url is not configured; set MBX_API__BASE_URL");
    }
    if !config.app.is_development() && !config.entra.is_configured() {
        tracing::debug!("federated sign-in is not configured; local login only");
    }
}
