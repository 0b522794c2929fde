//! Browser-redirect identity broker.
//!
//! Interactive login opens the broker's hosted sign-in page with a
//! localhost callback listener:
//!
//! 1. Start `tiny_http` on `127.0.0.1:0` (random port)
//! 2. Open the browser at the hosted sign-in URL with a CSRF state nonce
//! 3. Wait for the callback carrying `access_token`, `id_token`,
//!    `expires_in` (in `spawn_blocking` — `tiny_http::recv` blocks)
//! 4. Decode the id-token claims and cache account + token
//!
//! Silent acquisition answers from the cache until near expiry; there is no
//! local refresh protocol, so an expired cache escalates to interactive
//! login via `AuthError::InteractionRequired`.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use base64::Engine as _;
use chrono::{TimeDelta, Utc};

use mbx_config::EntraConfig;

use crate::broker::{BrokerAccount, BrokerToken, IdentityBroker, IdTokenClaims};
use crate::error::AuthError;
use crate::mode::AuthMode;
use crate::store::{CredentialRecord, CredentialStore, FederatedCredential};

const EXPIRY_BUFFER_SECS: i64 = 60;
const DEFAULT_CALLBACK_TIMEOUT: Duration = Duration::from_secs(120);

pub struct BrowserBroker {
    entra: EntraConfig,
    store: Arc<dyn CredentialStore>,
    cache: Mutex<Option<FederatedCredential>>,
    timeout: Duration,
}

impl BrowserBroker {
    /// Build a broker over the given store, rehydrating the in-memory cache
    /// from the store's `federated` namespace.
    #[must_use]
    pub fn new(entra: EntraConfig, store: Arc<dyn CredentialStore>) -> Self {
        let cached = match store.get(AuthMode::Federated) {
            Some(CredentialRecord::Federated(credential)) => Some(credential),
            _ => None,
        };
        Self {
            entra,
            store,
            cache: Mutex::new(cached),
            timeout: DEFAULT_CALLBACK_TIMEOUT,
        }
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn cached(&self) -> Option<FederatedCredential> {
        match self.cache.lock() {
            Ok(guard) => guard.clone(),
            Err(error) => {
                tracing::warn!(%error, "broker cache mutex poisoned; treating cache as empty");
                None
            }
        }
    }

    fn cache_credential(&self, credential: FederatedCredential) -> Result<(), AuthError> {
        self.store
            .put(&CredentialRecord::Federated(credential.clone()))?;
        if let Ok(mut guard) = self.cache.lock() {
            *guard = Some(credential);
        }
        Ok(())
    }
}

impl IdentityBroker for BrowserBroker {
    fn accounts(&self) -> Vec<BrokerAccount> {
        self.cached()
            .map(|credential| vec![credential.account])
            .unwrap_or_default()
    }

    fn cached_token(&self, account: &BrokerAccount) -> Option<BrokerToken> {
        self.cached()
            .filter(|credential| credential.account.home_account_id == account.home_account_id)
            .map(|credential| BrokerToken {
                access_token: credential.access_token,
                expires_at: credential.expires_at,
            })
    }

    async fn acquire_token_silent(
        &self,
        _scopes: &[String],
        account: &BrokerAccount,
    ) -> Result<BrokerToken, AuthError> {
        let token = self
            .cached_token(account)
            .ok_or_else(|| AuthError::InteractionRequired("no cached credential".into()))?;

        let threshold = Utc::now() + TimeDelta::seconds(EXPIRY_BUFFER_SECS);
        if token.expires_at <= threshold {
            return Err(AuthError::InteractionRequired(format!(
                "cached credential expires at {}",
                token.expires_at
            )));
        }

        Ok(token)
    }

    async fn login_redirect(&self, scopes: &[String]) -> Result<(), AuthError> {
        let server = tiny_http::Server::http("127.0.0.1:0")
            .map_err(|e| AuthError::BrowserFlowFailed(format!("failed to bind: {e}")))?;
        let port = server
            .server_addr()
            .to_ip()
            .map(|a| a.port())
            .ok_or_else(|| AuthError::BrowserFlowFailed("no port".into()))?;

        let state = csrf_nonce()?;
        let redirect_url = format!("http://127.0.0.1:{port}/callback");
        let sign_in_url = format!(
            "{authority}/sign-in?client_id={client}&scope={scope}&redirect_uri={redirect}&state={state}",
            authority = self.entra.authority(),
            client = urlencoding::encode(&self.entra.client_id),
            scope = urlencoding::encode(&scopes.join(" ")),
            redirect = urlencoding::encode(&redirect_url),
        );

        eprintln!("Opening browser to: {sign_in_url}");
        if let Err(error) = open::that(&sign_in_url) {
            eprintln!("Failed to open browser: {error}");
            eprintln!("Open the URL above manually, then return here.");
        }

        let timeout = self.timeout;
        let callback =
            tokio::task::spawn_blocking(move || wait_for_callback(server, timeout, state))
                .await
                .map_err(|e| AuthError::BrowserFlowFailed(format!("spawn_blocking join: {e}")))??;

        let claims = decode_id_token_claims(&callback.id_token)?;
        let account = BrokerAccount {
            home_account_id: claims
                .sub
                .clone()
                .or_else(|| claims.email.clone())
                .unwrap_or_else(|| "federated-account".into()),
            username: claims.email.clone().unwrap_or_default(),
            name: claims.name.clone(),
            id_token_claims: claims,
        };

        self.cache_credential(FederatedCredential {
            access_token: callback.access_token,
            expires_at: Utc::now() + TimeDelta::seconds(callback.expires_in),
            account,
        })
    }

    async fn logout_redirect(&self) -> Result<(), AuthError> {
        if let Ok(mut guard) = self.cache.lock() {
            *guard = None;
        }
        self.store.clear(AuthMode::Federated)?;

        if self.entra.is_configured() {
            let logout_url = format!("{}/logout", self.entra.authority());
            if let Err(error) = open::that(&logout_url) {
                tracing::warn!(%error, "failed to open logout page");
            }
        }
        Ok(())
    }
}

/// Decode the payload of an id token without signature validation.
///
/// Claims shaping only — the backend authorizes every call with the access
/// token; nothing security-relevant hangs off this decode.
///
/// # Errors
///
/// Returns `AuthError::BrowserFlowFailed` if the JWT format, base64, or JSON
/// payload is invalid.
pub fn decode_id_token_claims(jwt: &str) -> Result<IdTokenClaims, AuthError> {
    let parts: Vec<&str> = jwt.split('.').collect();
    if parts.len() != 3 {
        return Err(AuthError::BrowserFlowFailed("invalid id token format".into()));
    }
    let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(parts[1])
        .map_err(|e| AuthError::BrowserFlowFailed(format!("base64 decode failed: {e}")))?;
    serde_json::from_slice(&payload)
        .map_err(|e| AuthError::BrowserFlowFailed(format!("claims parse failed: {e}")))
}

fn csrf_nonce() -> Result<String, AuthError> {
    let mut nonce_bytes = [0u8; 16];
    getrandom::fill(&mut nonce_bytes)
        .map_err(|e| AuthError::BrowserFlowFailed(format!("failed to generate CSRF nonce: {e}")))?;
    Ok(nonce_bytes.iter().map(|b| format!("{b:02x}")).collect())
}

struct CallbackTokens {
    access_token: String,
    id_token: String,
    expires_in: i64,
}

/// Block until the callback server receives the token redirect.
///
/// Loops on `recv_timeout()`, ignoring requests that aren't the callback.
/// This handles favicon requests, preflight requests, and user refreshes
/// that would otherwise cause a false failure.
fn wait_for_callback(
    server: tiny_http::Server,
    timeout: Duration,
    expected_state: String,
) -> Result<CallbackTokens, AuthError> {
    let deadline = std::time::Instant::now() + timeout;

    loop {
        let remaining = deadline.saturating_duration_since(std::time::Instant::now());
        if remaining.is_zero() {
            return Err(AuthError::BrowserFlowFailed(format!(
                "browser callback timed out after {}s",
                timeout.as_secs()
            )));
        }

        let request = match server.recv_timeout(remaining) {
            Ok(Some(req)) => req,
            Ok(None) => {
                return Err(AuthError::BrowserFlowFailed(format!(
                    "browser callback timed out after {}s",
                    timeout.as_secs()
                )));
            }
            Err(e) => {
                return Err(AuthError::BrowserFlowFailed(format!("recv error: {e}")));
            }
        };

        let url = request.url().to_string();
        if !url.starts_with("/callback?") {
            let response = tiny_http::Response::from_string("").with_status_code(204);
            let _ = request.respond(response);
            continue;
        }

        let Some(query) = url.split('?').nth(1) else {
            respond_html(request, "<h1>Auth failed</h1><p>No tokens in callback.</p>");
            return Err(AuthError::BrowserFlowFailed("no query string in callback".into()));
        };

        let mut access_token = None;
        let mut id_token = None;
        let mut expires_in = None;
        let mut state = None;
        for pair in query.split('&') {
            if let Some((key, value)) = pair.split_once('=') {
                let value = urlencoding::decode(value)
                    .map_err(|e| AuthError::BrowserFlowFailed(format!("URL decode: {e}")))?
                    .into_owned();
                match key {
                    "access_token" => access_token = Some(value),
                    "id_token" => id_token = Some(value),
                    "expires_in" => expires_in = value.parse::<i64>().ok(),
                    "state" => state = Some(value),
                    _ => {}
                }
            }
        }

        let (Some(access_token), Some(id_token)) = (access_token, id_token) else {
            // Likely an intermediate broker redirect; keep waiting.
            respond_html(
                request,
                "<h1>Waiting for authentication…</h1><p>Redirecting — please wait.</p>",
            );
            continue;
        };

        if state.as_deref() != Some(expected_state.as_str()) {
            respond_html(
                request,
                "<h1>Auth failed</h1><p>State mismatch — possible CSRF attack.</p>",
            );
            return Err(AuthError::BrowserFlowFailed(
                "state mismatch — possible CSRF".into(),
            ));
        }

        respond_html(request, "<h1>Authenticated!</h1><p>You can close this tab.</p>");
        return Ok(CallbackTokens {
            access_token,
            id_token,
            expires_in: expires_in.unwrap_or(3600),
        });
    }
}

fn respond_html(request: tiny_http::Request, body: &str) {
    let response = tiny_http::Response::from_string(format!("<html><body>{body}</body></html>"))
        .with_header(
            tiny_http::Header::from_bytes("Content-Type", "text/html")
                .unwrap_or_else(|()| unreachable!("static header is valid")),
        );
    let _ = request.respond(response);
}
