//! Roles and role requirements.
//!
//! Roles arrive from two places — the backend user object (local mode) and
//! the broker's id-token `roles` claim (federated mode) — and always end up
//! in a typed [`RoleSet`]. The empty set is the defined default: there is no
//! "unknown roles" state.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A platform role, as emitted by the backend and the identity broker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "SYSTEM_ADMIN")]
    SystemAdmin,
    #[serde(rename = "TEAM_MEMBER")]
    TeamMember,
    #[serde(rename = "CLIENT_USER")]
    ClientUser,
}

impl Role {
    /// The wire spelling of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SystemAdmin => "SYSTEM_ADMIN",
            Self::TeamMember => "TEAM_MEMBER",
            Self::ClientUser => "CLIENT_USER",
        }
    }

    /// Parse a wire role string. Unknown strings map to `None` so callers
    /// can drop them instead of inventing a role.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "SYSTEM_ADMIN" => Some(Self::SystemAdmin),
            "TEAM_MEMBER" => Some(Self::TeamMember),
            "CLIENT_USER" => Some(Self::ClientUser),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The set of roles attached to an authenticated session.
pub type RoleSet = BTreeSet<Role>;

/// Build a [`RoleSet`] from a slice of roles.
#[must_use]
pub fn role_set(roles: &[Role]) -> RoleSet {
    roles.iter().copied().collect()
}

/// The minimal set of roles a protected view demands.
///
/// Satisfied by a non-empty intersection with the session's role set. An
/// empty requirement means "any authenticated session".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRequirement(BTreeSet<Role>);

impl RoleRequirement {
    /// A requirement satisfied by any authenticated session.
    #[must_use]
    pub const fn any_authenticated() -> Self {
        Self(BTreeSet::new())
    }

    /// A requirement satisfied by any of the given roles.
    pub fn of(roles: impl IntoIterator<Item = Role>) -> Self {
        Self(roles.into_iter().collect())
    }

    /// True when the requirement names no specific role.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when `roles` intersects the requirement, or the requirement is empty.
    #[must_use]
    pub fn is_satisfied_by(&self, roles: &RoleSet) -> bool {
        self.0.is_empty() || self.0.iter().any(|role| roles.contains(role))
    }

    /// Human-readable rendering for access-denied messages,
    /// e.g. `"SYSTEM_ADMIN or TEAM_MEMBER"`.
    #[must_use]
    pub fn describe(&self) -> String {
        self.0
            .iter()
            .map(|role| role.as_str())
            .collect::<Vec<_>>()
            .join(" or ")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn role_wire_names_round_trip() {
        for role in [Role::SystemAdmin, Role::TeamMember, Role::ClientUser] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
            let json = serde_json::to_string(&role).expect("serialize");
            assert_eq!(json, format!("\"{}\"", role.as_str()));
        }
    }

    #[test]
    fn unknown_role_string_is_none() {
        assert_eq!(Role::parse("SUPER_USER"), None);
        assert_eq!(Role::parse(""), None);
    }

    #[test]
    fn empty_requirement_accepts_any_authenticated_session() {
        let requirement = RoleRequirement::any_authenticated();
        assert!(requirement.is_satisfied_by(&role_set(&[Role::ClientUser])));
        assert!(requirement.is_satisfied_by(&RoleSet::new()));
    }

    #[test]
    fn requirement_satisfied_by_intersection() {
        let requirement = RoleRequirement::of([Role::SystemAdmin, Role::TeamMember]);
        assert!(requirement.is_satisfied_by(&role_set(&[Role::TeamMember])));
        assert!(!requirement.is_satisfied_by(&role_set(&[Role::ClientUser])));
        assert!(!requirement.is_satisfied_by(&RoleSet::new()));
    }

    #[test]
    fn describe_joins_with_or() {
        let requirement = RoleRequirement::of([Role::TeamMember, Role::SystemAdmin]);
        assert_eq!(requirement.describe(), "SYSTEM_ADMIN or TEAM_MEMBER");
    }
}
