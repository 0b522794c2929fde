//! Identity-broker collaborator capability set.
//!
//! The broker is an opaque external collaborator: the trait covers exactly
//! the capabilities this subsystem consumes (account list, silent token
//! acquisition, interactive login redirect, logout redirect). Acquisition
//! never navigates as a side effect — callers get a result and decide.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// A federated account cached by the broker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrokerAccount {
    pub home_account_id: String,
    /// UPN / email the account signed in with.
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub id_token_claims: IdTokenClaims,
}

/// Claims carried by the broker's id token. Only the fields this subsystem
/// reads; everything else stays with the broker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdTokenClaims {
    /// Role strings. Defaults to empty when the claim is absent.
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
}

/// A bearer credential produced by the broker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokerToken {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

#[allow(async_fn_in_trait)]
pub trait IdentityBroker: Send + Sync {
    /// The broker's in-memory account list. Non-empty means a federated
    /// session was established in this browsing context.
    fn accounts(&self) -> Vec<BrokerAccount>;

    /// Peek at the cached credential for an account without refreshing.
    fn cached_token(&self, account: &BrokerAccount) -> Option<BrokerToken>;

    /// Obtain a fresh bearer credential without user interaction.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InteractionRequired` when the credential cannot
    /// be produced silently. Callers must not retry — interactive login is
    /// the single recovery path.
    async fn acquire_token_silent(
        &self,
        scopes: &[String],
        account: &BrokerAccount,
    ) -> Result<BrokerToken, AuthError>;

    /// Redirect to the broker's interactive login.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::BrowserFlowFailed` when the redirect cannot be issued.
    async fn login_redirect(&self, scopes: &[String]) -> Result<(), AuthError>;

    /// Redirect to the broker's logout endpoint and drop cached accounts.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::BrowserFlowFailed` when the redirect cannot be issued.
    async fn logout_redirect(&self) -> Result<(), AuthError>;
}
