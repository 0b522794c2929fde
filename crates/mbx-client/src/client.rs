//! Credential-injecting request path.
//!
//! Every outbound call goes through [`ApiClient::request`], which wraps the
//! two hook points of the request lifecycle:
//!
//! - before send: consult the token provider and attach
//!   `Authorization: Bearer <value>` when a credential was produced;
//! - after receive: a 401 clears all credential namespaces, then — only
//!   after the clear has completed — re-enters the login path (interactive
//!   federated login when the broker holds an account, root navigation
//!   otherwise). A re-entrant request made during the redirect can never
//!   reuse the invalidated credential.

use std::sync::Arc;

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use mbx_auth::token_provider::{self, TokenOutcome};
use mbx_auth::{CredentialStore, IdentityBroker};
use mbx_core::Envelope;

use crate::error::ApiError;

/// Where "navigate to the application root" goes. The root re-renders the
/// login experience because the store is empty by the time it is invoked.
pub trait Navigator: Send + Sync {
    fn to_root(&self);
}

/// Navigator that does nothing (tests, embedded use).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn to_root(&self) {}
}

pub struct ApiClient<B: IdentityBroker, N: Navigator> {
    http: reqwest::Client,
    base_url: String,
    store: Arc<dyn CredentialStore>,
    broker: B,
    navigator: N,
    scopes: Vec<String>,
}

impl<B: IdentityBroker, N: Navigator> ApiClient<B, N> {
    pub fn new(
        base_url: impl Into<String>,
        store: Arc<dyn CredentialStore>,
        broker: B,
        navigator: N,
        scopes: Vec<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            store,
            broker,
            navigator,
            scopes,
        }
    }

    #[must_use]
    pub const fn broker(&self) -> &B {
        &self.broker
    }

    #[must_use]
    pub const fn navigator(&self) -> &N {
        &self.navigator
    }

    #[must_use]
    pub fn store(&self) -> &dyn CredentialStore {
        self.store.as_ref()
    }

    /// GET a `{data}`-enveloped resource.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.request(Method::GET, path, None::<&()>).await?;
        Self::into_data(response).await
    }

    /// POST a JSON body, expecting a `{data}`-enveloped resource back.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn post_json<T: DeserializeOwned, R: Serialize + Sync>(
        &self,
        path: &str,
        body: &R,
    ) -> Result<T, ApiError> {
        let response = self.request(Method::POST, path, Some(body)).await?;
        Self::into_data(response).await
    }

    /// PUT a JSON body, expecting a `{data}`-enveloped resource back.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn put_json<T: DeserializeOwned, R: Serialize + Sync>(
        &self,
        path: &str,
        body: &R,
    ) -> Result<T, ApiError> {
        let response = self.request(Method::PUT, path, Some(body)).await?;
        Self::into_data(response).await
    }

    /// POST with no payload and no interesting response body.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn post_empty(&self, path: &str) -> Result<(), ApiError> {
        self.request(Method::POST, path, None::<&()>).await?;
        Ok(())
    }

    /// DELETE a resource, ignoring the response body.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.request(Method::DELETE, path, None::<&()>).await?;
        Ok(())
    }

    async fn request<R: Serialize + Sync>(
        &self,
        method: Method,
        path: &str,
        body: Option<&R>,
    ) -> Result<reqwest::Response, ApiError> {
        let url = format!("{}{path}", self.base_url);
        let mut builder = self.http.request(method, &url);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        // Credential attachment completes before the request is dispatched.
        match token_provider::bearer_for_request(self.store.as_ref(), &self.broker, &self.scopes)
            .await
        {
            TokenOutcome::Bearer(token) => builder = builder.bearer_auth(token),
            TokenOutcome::NeedsInteractiveLogin => {
                if let Err(error) = self.broker.login_redirect(&self.scopes).await {
                    tracing::warn!(%error, "interactive login redirect failed");
                }
                // The request proceeds without a credential; the server's
                // 401 drives the recovery path below.
            }
            TokenOutcome::Anonymous => {}
        }

        let response = builder.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            self.handle_unauthorized().await?;
            return Err(ApiError::Unauthorized);
        }

        if status == reqwest::StatusCode::FORBIDDEN {
            let message = Self::failure_message(response).await;
            return Err(ApiError::Forbidden(message));
        }

        if !status.is_success() {
            let message = Self::failure_message(response).await;
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }

    /// 401 teardown. The store clear must complete before any redirect or
    /// navigation is issued.
    async fn handle_unauthorized(&self) -> Result<(), ApiError> {
        self.store.clear_all()?;

        if self.broker.accounts().is_empty() {
            self.navigator.to_root();
        } else if let Err(error) = self.broker.login_redirect(&self.scopes).await {
            tracing::warn!(%error, "federated re-login redirect failed");
        }
        Ok(())
    }

    async fn failure_message(response: reqwest::Response) -> String {
        let status = response.status();
        response
            .json::<Envelope<serde_json::Value>>()
            .await
            .ok()
            .and_then(|envelope| envelope.failure_message().map(ToString::to_string))
            .unwrap_or_else(|| format!("HTTP {status}"))
    }

    async fn into_data<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let envelope = response
            .json::<Envelope<T>>()
            .await
            .map_err(|e| ApiError::MalformedResponse(e.to_string()))?;
        envelope
            .data
            .ok_or_else(|| ApiError::MalformedResponse("missing data field".into()))
    }
}
