//! Bearer credential production for outbound requests.
//!
//! Mode check order mirrors the resolver precedence exactly: dev-bypass,
//! then local, then federated — first match wins. Dev-bypass and local
//! return the stored value synchronously and never refresh. Federated asks
//! the broker for a silent token; a silent failure is never retried — it
//! surfaces as [`TokenOutcome::NeedsInteractiveLogin`] and the caller
//! decides how to react.

use crate::broker::IdentityBroker;
use crate::mode::AuthMode;
use crate::store::{CredentialRecord, CredentialStore};

/// Tagged result of credential production.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenOutcome {
    /// Attach `Authorization: Bearer <token>`.
    Bearer(String),
    /// Silent acquisition failed; interactive login is the recovery path.
    /// The in-flight request proceeds without a credential.
    NeedsInteractiveLogin,
    /// No mode is active; send the request with no Authorization header.
    Anonymous,
}

/// Produce the bearer value for one outbound request.
pub async fn bearer_for_request<B: IdentityBroker>(
    store: &dyn CredentialStore,
    broker: &B,
    scopes: &[String],
) -> TokenOutcome {
    if let Some(CredentialRecord::DevBypass(credential)) = store.get(AuthMode::DevBypass) {
        return TokenOutcome::Bearer(credential.access_token);
    }

    if let Some(CredentialRecord::Local(credential)) = store.get(AuthMode::Local) {
        return TokenOutcome::Bearer(credential.access_token);
    }

    let Some(account) = broker.accounts().into_iter().next() else {
        return TokenOutcome::Anonymous;
    };
    match broker.acquire_token_silent(scopes, &account).await {
        Ok(token) => TokenOutcome::Bearer(token.access_token),
        Err(error) => {
            tracing::warn!(%error, "silent token acquisition failed; escalating to interactive login");
            TokenOutcome::NeedsInteractiveLogin
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, Utc};
    use pretty_assertions::assert_eq;

    use mbx_core::Role;

    use crate::broker::{BrokerAccount, BrokerToken, IdTokenClaims};
    use crate::error::AuthError;
    use crate::store::{LocalCredential, LocalUser, MemoryCredentialStore};

    use super::*;

    struct FakeBroker {
        accounts: Vec<BrokerAccount>,
        silent_fails: bool,
    }

    impl FakeBroker {
        fn empty() -> Self {
            Self {
                accounts: Vec::new(),
                silent_fails: false,
            }
        }

        fn with_account(silent_fails: bool) -> Self {
            Self {
                accounts: vec![BrokerAccount {
                    home_account_id: "acct-1".into(),
                    username: "sso@contoso.com".into(),
                    name: None,
                    id_token_claims: IdTokenClaims::default(),
                }],
                silent_fails,
            }
        }
    }

    impl IdentityBroker for FakeBroker {
        fn accounts(&self) -> Vec<BrokerAccount> {
            self.accounts.clone()
        }

        fn cached_token(&self, _account: &BrokerAccount) -> Option<BrokerToken> {
            None
        }

        async fn acquire_token_silent(
            &self,
            _scopes: &[String],
            _account: &BrokerAccount,
        ) -> Result<BrokerToken, AuthError> {
            if self.silent_fails {
                Err(AuthError::InteractionRequired("refresh token expired".into()))
            } else {
                Ok(BrokerToken {
                    access_token: "sso-token".into(),
                    expires_at: Utc::now() + TimeDelta::hours(1),
                })
            }
        }

        async fn login_redirect(&self, _scopes: &[String]) -> Result<(), AuthError> {
            Ok(())
        }

        async fn logout_redirect(&self) -> Result<(), AuthError> {
            Ok(())
        }
    }

    fn put_local(store: &MemoryCredentialStore, token: &str) {
        store
            .put(&CredentialRecord::Local(LocalCredential {
                access_token: token.into(),
                refresh_token: "R".into(),
                user: LocalUser {
                    id: 1,
                    email: "a@b.com".into(),
                    name: "A".into(),
                    role: Role::ClientUser,
                },
            }))
            .expect("put local");
    }

    #[tokio::test]
    async fn dev_bypass_wins_over_local_and_federated() {
        let store = MemoryCredentialStore::new();
        crate::dev_bypass::login(&store).expect("dev login");
        put_local(&store, "local-token");

        let outcome = bearer_for_request(&store, &FakeBroker::with_account(false), &[]).await;
        assert_eq!(
            outcome,
            TokenOutcome::Bearer(crate::dev_bypass::DEV_TOKEN.into())
        );
    }

    #[tokio::test]
    async fn local_token_returned_without_refresh() {
        let store = MemoryCredentialStore::new();
        put_local(&store, "T");

        let outcome = bearer_for_request(&store, &FakeBroker::with_account(false), &[]).await;
        assert_eq!(outcome, TokenOutcome::Bearer("T".into()));
    }

    #[tokio::test]
    async fn federated_silent_acquisition_produces_bearer() {
        let store = MemoryCredentialStore::new();
        let outcome = bearer_for_request(&store, &FakeBroker::with_account(false), &[]).await;
        assert_eq!(outcome, TokenOutcome::Bearer("sso-token".into()));
    }

    #[tokio::test]
    async fn silent_failure_escalates_without_retry() {
        let store = MemoryCredentialStore::new();
        let outcome = bearer_for_request(&store, &FakeBroker::with_account(true), &[]).await;
        assert_eq!(outcome, TokenOutcome::NeedsInteractiveLogin);
    }

    #[tokio::test]
    async fn no_mode_active_is_anonymous() {
        let store = MemoryCredentialStore::new();
        let outcome = bearer_for_request(&store, &FakeBroker::empty(), &[]).await;
        assert_eq!(outcome, TokenOutcome::Anonymous);
    }

    #[tokio::test]
    async fn stored_bearer_round_trips_byte_identical_until_clear() {
        let store = MemoryCredentialStore::new();
        put_local(&store, "T");
        let broker = FakeBroker::empty();

        for _ in 0..3 {
            let outcome = bearer_for_request(&store, &broker, &[]).await;
            assert_eq!(outcome, TokenOutcome::Bearer("T".into()));
        }

        store.clear_all().expect("clear");
        let outcome = bearer_for_request(&store, &broker, &[]).await;
        assert_eq!(outcome, TokenOutcome::Anonymous);
    }
}
