//! Session resolution.
//!
//! Produces the single active [`SessionRecord`] by evaluating an explicit
//! ordered list of mode resolvers ([`AuthMode::PRECEDENCE`]): dev-bypass,
//! then local, then federated — first match wins, roles never merge across
//! modes. Resolution is a pure read of existing state: it never triggers
//! login and never touches the network.

use mbx_core::{Role, RoleSet, UserIdentity};

use crate::broker::{BrokerAccount, IdentityBroker};
use crate::mode::AuthMode;
use crate::session::{BearerCredential, SessionRecord};
use crate::store::{CredentialRecord, CredentialStore};

/// Resolve the active session, or `None` when unauthenticated.
pub fn resolve<B: IdentityBroker>(
    store: &dyn CredentialStore,
    broker: &B,
) -> Option<SessionRecord> {
    AuthMode::PRECEDENCE
        .into_iter()
        .find_map(|mode| resolve_mode(mode, store, broker))
}

fn resolve_mode<B: IdentityBroker>(
    mode: AuthMode,
    store: &dyn CredentialStore,
    broker: &B,
) -> Option<SessionRecord> {
    match mode {
        AuthMode::DevBypass => resolve_dev_bypass(store),
        AuthMode::Local => resolve_local(store),
        AuthMode::Federated => resolve_federated(broker),
    }
}

fn resolve_dev_bypass(store: &dyn CredentialStore) -> Option<SessionRecord> {
    let CredentialRecord::DevBypass(credential) = store.get(AuthMode::DevBypass)? else {
        return None;
    };
    Some(SessionRecord {
        mode: AuthMode::DevBypass,
        identity: UserIdentity {
            principal_id: credential.account.principal_id,
            display_name: credential.account.name,
            email: credential.account.email,
            roles: credential.account.roles,
        },
        credential: BearerCredential {
            token: credential.access_token,
            expires_at: Some(credential.expires_at),
        },
    })
}

fn resolve_local(store: &dyn CredentialStore) -> Option<SessionRecord> {
    let CredentialRecord::Local(credential) = store.get(AuthMode::Local)? else {
        return None;
    };
    // Reconstructed entirely from the stored login response; single role,
    // taken verbatim from the stored user object.
    let user = credential.user;
    Some(SessionRecord {
        mode: AuthMode::Local,
        identity: UserIdentity {
            principal_id: user.id.to_string(),
            display_name: user.name,
            email: user.email,
            roles: [user.role].into_iter().collect(),
        },
        credential: BearerCredential {
            token: credential.access_token,
            expires_at: None,
        },
    })
}

fn resolve_federated<B: IdentityBroker>(broker: &B) -> Option<SessionRecord> {
    let account = broker.accounts().into_iter().next()?;
    let token = broker.cached_token(&account)?;
    let roles = claim_roles(&account);

    let claims = &account.id_token_claims;
    Some(SessionRecord {
        mode: AuthMode::Federated,
        identity: UserIdentity {
            principal_id: claims
                .sub
                .clone()
                .unwrap_or_else(|| account.home_account_id.clone()),
            display_name: account
                .name
                .clone()
                .or_else(|| claims.name.clone())
                .unwrap_or_else(|| account.username.clone()),
            email: claims
                .email
                .clone()
                .unwrap_or_else(|| account.username.clone()),
            roles,
        },
        credential: BearerCredential {
            token: token.access_token,
            expires_at: Some(token.expires_at),
        },
    })
}

/// Derive the typed role set from the account's id-token `roles` claim.
/// Absent claim means empty set; unknown role strings are dropped.
fn claim_roles(account: &BrokerAccount) -> RoleSet {
    account
        .id_token_claims
        .roles
        .iter()
        .filter_map(|value| {
            let role = Role::parse(value);
            if role.is_none() {
                tracing::warn!(role = %value, "unknown role claim; ignoring");
            }
            role
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, Utc};
    use pretty_assertions::assert_eq;

    use mbx_core::role_set;

    use crate::broker::{BrokerToken, IdTokenClaims};
    use crate::error::AuthError;
    use crate::store::{
        DevAccount, DevBypassCredential, LocalCredential, LocalUser, MemoryCredentialStore,
    };

    use super::*;

    /// Broker fake holding a fixed account list and cached token.
    struct FakeBroker {
        accounts: Vec<BrokerAccount>,
        token: Option<BrokerToken>,
    }

    impl FakeBroker {
        fn empty() -> Self {
            Self {
                accounts: Vec::new(),
                token: None,
            }
        }

        fn with_account(roles: &[&str]) -> Self {
            Self {
                accounts: vec![BrokerAccount {
                    home_account_id: "acct-1".into(),
                    username: "sso@contoso.com".into(),
                    name: Some("Sso User".into()),
                    id_token_claims: IdTokenClaims {
                        roles: roles.iter().map(ToString::to_string).collect(),
                        email: Some("sso@contoso.com".into()),
                        name: Some("Sso User".into()),
                        sub: Some("sso-sub".into()),
                    },
                }],
                token: Some(BrokerToken {
                    access_token: "sso-token".into(),
                    expires_at: Utc::now() + TimeDelta::hours(1),
                }),
            }
        }
    }

    impl IdentityBroker for FakeBroker {
        fn accounts(&self) -> Vec<BrokerAccount> {
            self.accounts.clone()
        }

        fn cached_token(&self, _account: &BrokerAccount) -> Option<BrokerToken> {
            self.token.clone()
        }

        async fn acquire_token_silent(
            &self,
            _scopes: &[String],
            _account: &BrokerAccount,
        ) -> Result<BrokerToken, AuthError> {
            self.token
                .clone()
                .ok_or_else(|| AuthError::InteractionRequired("no token".into()))
        }

        async fn login_redirect(&self, _scopes: &[String]) -> Result<(), AuthError> {
            Ok(())
        }

        async fn logout_redirect(&self) -> Result<(), AuthError> {
            Ok(())
        }
    }

    fn put_dev(store: &MemoryCredentialStore) {
        crate::dev_bypass::login(store).expect("dev login");
    }

    fn put_local(store: &MemoryCredentialStore) {
        store
            .put(&CredentialRecord::Local(LocalCredential {
                access_token: "local-token".into(),
                refresh_token: "local-refresh".into(),
                user: LocalUser {
                    id: 1,
                    email: "a@b.com".into(),
                    name: "A".into(),
                    role: Role::ClientUser,
                },
            }))
            .expect("put local");
    }

    #[test]
    fn all_modes_present_dev_bypass_wins() {
        let store = MemoryCredentialStore::new();
        put_dev(&store);
        put_local(&store);
        let broker = FakeBroker::with_account(&["CLIENT_USER"]);

        let session = resolve(&store, &broker).expect("session");
        assert_eq!(session.mode, AuthMode::DevBypass);
        // Never a mix of roles from two modes.
        assert_eq!(session.identity.roles, role_set(&[Role::SystemAdmin]));
    }

    #[test]
    fn local_wins_over_federated() {
        let store = MemoryCredentialStore::new();
        put_local(&store);
        let broker = FakeBroker::with_account(&["SYSTEM_ADMIN"]);

        let session = resolve(&store, &broker).expect("session");
        assert_eq!(session.mode, AuthMode::Local);
        assert_eq!(session.identity.roles, role_set(&[Role::ClientUser]));
        assert_eq!(session.credential.token, "local-token");
    }

    #[test]
    fn federated_resolves_when_store_is_empty() {
        let store = MemoryCredentialStore::new();
        let broker = FakeBroker::with_account(&["TEAM_MEMBER"]);

        let session = resolve(&store, &broker).expect("session");
        assert_eq!(session.mode, AuthMode::Federated);
        assert_eq!(session.identity.principal_id, "sso-sub");
        assert_eq!(session.identity.roles, role_set(&[Role::TeamMember]));
    }

    #[test]
    fn empty_everything_is_unauthenticated() {
        let store = MemoryCredentialStore::new();
        assert_eq!(resolve(&store, &FakeBroker::empty()), None);
    }

    #[test]
    fn dev_bypass_session_exposes_admin_booleans() {
        let store = MemoryCredentialStore::new();
        put_dev(&store);

        let session = resolve(&store, &FakeBroker::empty()).expect("session");
        assert!(session.is_admin());
        assert!(session.is_team_member());
        assert!(!session.is_client());
    }

    #[test]
    fn local_role_is_taken_verbatim() {
        let store = MemoryCredentialStore::new();
        put_local(&store);

        let session = resolve(&store, &FakeBroker::empty()).expect("session");
        assert_eq!(session.identity.principal_id, "1");
        assert_eq!(session.identity.display_name, "A");
        assert!(session.is_client());
        assert!(!session.is_team_member());
    }

    #[test]
    fn unknown_federated_role_claims_are_dropped() {
        let store = MemoryCredentialStore::new();
        let broker = FakeBroker::with_account(&["SYSTEM_ADMIN", "MYSTERY_ROLE"]);

        let session = resolve(&store, &broker).expect("session");
        assert_eq!(session.identity.roles, role_set(&[Role::SystemAdmin]));
    }

    #[test]
    fn federated_missing_roles_claim_is_empty_set() {
        let store = MemoryCredentialStore::new();
        let broker = FakeBroker::with_account(&[]);

        let session = resolve(&store, &broker).expect("session");
        assert!(session.identity.roles.is_empty());
        assert!(!session.is_admin());
    }
}
