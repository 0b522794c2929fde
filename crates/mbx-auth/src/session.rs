use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mbx_core::{Role, UserIdentity};

use crate::mode::AuthMode;

/// The bearer credential attached to a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BearerCredential {
    pub token: String,
    /// Expiry when the issuer communicates one. Local tokens carry none;
    /// the backend's 401 is the expiry signal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// The resolved, mode-tagged identity used by the rest of the application.
///
/// At most one mode is active at a time; roles are never merged across
/// modes. Created on successful login, destroyed on logout or 401.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub mode: AuthMode,
    #[serde(flatten)]
    pub identity: UserIdentity,
    pub credential: BearerCredential,
}

impl SessionRecord {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.identity.roles.contains(&Role::SystemAdmin)
    }

    /// Admin implies team-member privilege.
    #[must_use]
    pub fn is_team_member(&self) -> bool {
        self.identity.roles.contains(&Role::TeamMember) || self.is_admin()
    }

    #[must_use]
    pub fn is_client(&self) -> bool {
        self.identity.roles.contains(&Role::ClientUser)
    }
}
