//! Development-only login bypass.
//!
//! Fabricates a `SYSTEM_ADMIN` session without contacting any identity
//! provider. Only offered in development execution environments.

use chrono::{TimeDelta, Utc};

use mbx_core::{Role, role_set};

use crate::error::AuthError;
use crate::store::{CredentialRecord, CredentialStore, DevAccount, DevBypassCredential};

/// Sentinel bearer value for dev-bypass sessions. The backend's dev
/// configuration accepts exactly this value.
pub const DEV_TOKEN: &str = "DEV_TOKEN_BYPASS";

pub const DEV_PRINCIPAL_ID: &str = "dev-user-id";
const DEV_EMAIL: &str = "dev@localhost";
const DEV_NAME: &str = "Developer (Dev Mode)";
const DEV_SESSION_HOURS: i64 = 24;

/// Write the dev-bypass credential record. No network side effects.
///
/// # Errors
///
/// Returns `AuthError::StoreError` when the record cannot be persisted.
pub fn login(store: &dyn CredentialStore) -> Result<(), AuthError> {
    store.put(&CredentialRecord::DevBypass(DevBypassCredential {
        access_token: DEV_TOKEN.into(),
        expires_at: Utc::now() + TimeDelta::hours(DEV_SESSION_HOURS),
        account: DevAccount {
            principal_id: DEV_PRINCIPAL_ID.into(),
            email: DEV_EMAIL.into(),
            name: DEV_NAME.into(),
            roles: role_set(&[Role::SystemAdmin]),
        },
    }))
}

#[cfg(test)]
mod tests {
    use crate::mode::AuthMode;
    use crate::store::MemoryCredentialStore;

    use super::*;

    #[test]
    fn login_writes_sentinel_record_with_synthetic_expiry() {
        let store = MemoryCredentialStore::new();
        login(&store).expect("dev login");

        let Some(CredentialRecord::DevBypass(credential)) = store.get(AuthMode::DevBypass) else {
            panic!("dev-bypass record should exist");
        };
        assert_eq!(credential.access_token, DEV_TOKEN);
        assert_eq!(credential.account.roles, role_set(&[Role::SystemAdmin]));

        let hours_left = (credential.expires_at - Utc::now()).num_hours();
        assert!((23..=24).contains(&hours_left), "expiry should be ~24h out");
    }
}
