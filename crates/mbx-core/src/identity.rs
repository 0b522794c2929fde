use serde::{Deserialize, Serialize};

use crate::roles::RoleSet;

/// Normalized authenticated user identity for cross-crate passing.
///
/// Produced by session resolution in `mbx-auth`, consumed by the client and
/// CLI. Contains only data fields — no auth logic, no broker calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    /// Opaque unique identifier for the user.
    pub principal_id: String,
    pub display_name: String,
    pub email: String,
    /// Role set used for authorization checks. Empty set, never absent.
    #[serde(default)]
    pub roles: RoleSet,
}
