//! # mbx-auth
//!
//! Mode-resolved authentication for the mbx client.
//!
//! Three mutually exclusive modes answer "who is the current user and what
//! bearer credential authorizes this call": a development-only bypass, a
//! local email/password credential, and federated SSO via an external
//! identity broker. Provides the session-scoped credential store, the
//! session resolver with fixed mode precedence, the token provider, the
//! access guard state machine, and a browser-redirect broker
//! implementation.

pub mod broker;
pub mod browser;
pub mod dev_bypass;
pub mod error;
pub mod guard;
pub mod local;
pub mod mode;
pub mod resolver;
pub mod session;
pub mod store;
pub mod token_provider;

pub use broker::{BrokerAccount, BrokerToken, IdentityBroker, IdTokenClaims};
pub use browser::BrowserBroker;
pub use error::AuthError;
pub use guard::{AccessGuard, GuardEnvironment, GuardState, LoginExperience, choose_experience};
pub use mode::AuthMode;
pub use session::{BearerCredential, SessionRecord};
pub use store::{CredentialRecord, CredentialStore, FileCredentialStore, MemoryCredentialStore};
pub use token_provider::TokenOutcome;

/// Resolve the active session from the store and broker.
///
/// Convenience re-export of [`resolver::resolve`].
pub fn resolve_session<B: IdentityBroker>(
    store: &dyn CredentialStore,
    broker: &B,
) -> Option<SessionRecord> {
    resolver::resolve(store, broker)
}

/// Clear every credential namespace (explicit logout).
///
/// # Errors
///
/// Returns `AuthError::StoreError` when a record cannot be removed.
pub fn logout(store: &dyn CredentialStore) -> Result<(), AuthError> {
    store.clear_all()
}
