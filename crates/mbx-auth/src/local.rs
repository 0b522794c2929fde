//! Local email/password login against the application's own backend.
//!
//! Used when the federated broker is not configured. The backend issues an
//! access/refresh token pair and the user object; the whole login response
//! is persisted as one record so resolution never needs another call.

use serde::{Deserialize, Serialize};

use mbx_core::Envelope;

use crate::error::AuthError;
use crate::store::{CredentialRecord, CredentialStore, LocalCredential, LocalUser};

const GENERIC_LOGIN_FAILURE: &str = "Login failed. Please check your credentials.";

#[derive(Debug, Serialize)]
struct LocalLoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LocalLoginData {
    access_token: String,
    refresh_token: String,
    user: LocalUser,
}

/// Log in with email/password and persist the credential record.
///
/// On success the whole `{accessToken, refreshToken, user}` payload is
/// written as one record. On failure nothing is written and the backend's
/// `error`/`message` field is surfaced verbatim, falling back to a generic
/// message.
///
/// # Errors
///
/// Returns `AuthError::LoginFailed` for a backend rejection,
/// `AuthError::Http` for transport failures, and `AuthError::StoreError`
/// when the record cannot be persisted.
pub async fn login(
    http: &reqwest::Client,
    api_base_url: &str,
    store: &dyn CredentialStore,
    email: &str,
    password: &str,
) -> Result<LocalUser, AuthError> {
    let url = format!("{}/auth/login/local", api_base_url.trim_end_matches('/'));
    let response = http
        .post(&url)
        .json(&LocalLoginRequest { email, password })
        .send()
        .await
        .map_err(|e| AuthError::Http(e.to_string()))?;

    if !response.status().is_success() {
        let envelope = response
            .json::<Envelope<serde_json::Value>>()
            .await
            .unwrap_or_else(|_| Envelope {
                data: None,
                error: None,
                message: None,
            });
        let message = envelope
            .failure_message()
            .unwrap_or(GENERIC_LOGIN_FAILURE)
            .to_string();
        return Err(AuthError::LoginFailed(message));
    }

    let envelope = response
        .json::<Envelope<LocalLoginData>>()
        .await
        .map_err(|e| AuthError::LoginFailed(format!("malformed login response: {e}")))?;
    let Some(data) = envelope.data else {
        return Err(AuthError::LoginFailed("malformed login response: missing data".into()));
    };

    let user = data.user.clone();
    store.put(&CredentialRecord::Local(LocalCredential {
        access_token: data.access_token,
        refresh_token: data.refresh_token,
        user: data.user,
    }))?;

    Ok(user)
}

#[cfg(test)]
mod tests {
    use std::thread;

    use pretty_assertions::assert_eq;

    use mbx_core::Role;

    use crate::mode::AuthMode;
    use crate::store::MemoryCredentialStore;

    use super::*;

    /// Serve one canned response on a random port, returning the base URL.
    fn serve_once(status: u16, body: &'static str) -> String {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("bind");
        let addr = server.server_addr().to_ip().expect("ip addr");
        thread::spawn(move || {
            if let Ok(request) = server.recv() {
                let response = tiny_http::Response::from_string(body)
                    .with_status_code(status)
                    .with_header(
                        tiny_http::Header::from_bytes("Content-Type", "application/json")
                            .expect("header"),
                    );
                let _ = request.respond(response);
            }
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn successful_login_stores_whole_record() {
        let base = serve_once(
            200,
            r#"{"data":{"accessToken":"T","refreshToken":"R","user":{"id":1,"email":"a@b.com","name":"A","role":"CLIENT_USER"}}}"#,
        );
        let store = MemoryCredentialStore::new();
        let http = reqwest::Client::new();

        let user = login(&http, &base, &store, "a@b.com", "x")
            .await
            .expect("login");
        assert_eq!(user.role, Role::ClientUser);

        let Some(CredentialRecord::Local(credential)) = store.get(AuthMode::Local) else {
            panic!("local record should exist");
        };
        assert_eq!(credential.access_token, "T");
        assert_eq!(credential.refresh_token, "R");
        assert_eq!(credential.user.email, "a@b.com");
    }

    #[tokio::test]
    async fn backend_error_message_is_surfaced_verbatim() {
        let base = serve_once(401, r#"{"error":"Invalid credentials"}"#);
        let store = MemoryCredentialStore::new();
        let http = reqwest::Client::new();

        let error = login(&http, &base, &store, "a@b.com", "wrong")
            .await
            .expect_err("should fail");
        assert_eq!(error.to_string(), "Invalid credentials");
        assert_eq!(store.get(AuthMode::Local), None, "no partial state");
    }

    #[tokio::test]
    async fn unparseable_failure_body_falls_back_to_generic_message() {
        let base = serve_once(500, "Internal Server Error");
        let store = MemoryCredentialStore::new();
        let http = reqwest::Client::new();

        let error = login(&http, &base, &store, "a@b.com", "x")
            .await
            .expect_err("should fail");
        assert_eq!(error.to_string(), GENERIC_LOGIN_FAILURE);
    }
}
