use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;

use mbx_auth::{BrowserBroker, CredentialStore, FileCredentialStore};
use mbx_client::{ApiClient, Navigator};
use mbx_config::MbxConfig;

/// Navigator for a terminal session: there is no root view to render, so a
/// torn-down session surfaces as a sign-in hint.
pub struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn to_root(&self) {
        eprintln!("Session expired. Run 'mbx auth login' to sign in again.");
    }
}

/// Everything a command handler needs: the loaded config, the session
/// credential store, and the credential-injecting API client.
pub struct AppContext {
    pub config: MbxConfig,
    pub store: Arc<FileCredentialStore>,
    pub client: ApiClient<BrowserBroker, TerminalNavigator>,
}

impl AppContext {
    /// # Errors
    ///
    /// Fails when the session directory cannot be created.
    pub fn init(config: MbxConfig) -> anyhow::Result<Self> {
        let store = Arc::new(
            FileCredentialStore::new(session_dir()?).context("failed to open session store")?,
        );
        let store_dyn: Arc<dyn CredentialStore> = store.clone();

        let broker = BrowserBroker::new(config.entra.clone(), Arc::clone(&store_dyn));
        let client = ApiClient::new(
            config.api.base_url_trimmed(),
            store_dyn,
            broker,
            TerminalNavigator,
            config.entra.scopes.clone(),
        );

        Ok(Self {
            config,
            store,
            client,
        })
    }
}

/// Where this session's credentials live. `MBX_SESSION_DIR` overrides the
/// platform default; the directory is scoped per login session on platforms
/// with a runtime dir and falls back to the cache dir elsewhere.
fn session_dir() -> anyhow::Result<PathBuf> {
    if let Ok(dir) = std::env::var("MBX_SESSION_DIR") {
        return Ok(PathBuf::from(dir));
    }

    dirs::runtime_dir()
        .or_else(dirs::cache_dir)
        .map(|base| base.join("mbx").join("session"))
        .context("cannot determine a session directory; set MBX_SESSION_DIR")
}
