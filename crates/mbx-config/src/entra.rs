//! Federated identity broker (Entra External ID) configuration.

use serde::{Deserialize, Serialize};

/// Substrings that mark a value as an unfilled template placeholder.
/// A config containing any of these is treated as not configured.
const PLACEHOLDER_MARKERS: [&str; 3] = ["YOUR_", "yourcompany", "CHANGE_ME"];

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EntraConfig {
    /// Application (client) identifier.
    #[serde(default)]
    pub client_id: String,

    /// Tenant identifier.
    #[serde(default)]
    pub tenant_id: String,

    /// Tenant domain name, e.g. `contoso.ciamlogin.com`.
    #[serde(default)]
    pub tenant_name: String,

    /// Redirect URI registered with the broker.
    #[serde(default)]
    pub redirect_uri: String,

    /// Scopes requested on login and silent acquisition.
    #[serde(default = "default_scopes")]
    pub scopes: Vec<String>,
}

fn default_scopes() -> Vec<String> {
    ["openid", "profile", "email", "offline_access"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for EntraConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            tenant_id: String::new(),
            tenant_name: String::new(),
            redirect_uri: String::new(),
            scopes: default_scopes(),
        }
    }
}

impl EntraConfig {
    /// Check whether the federated broker is usable: client id, tenant id,
    /// and tenant name must all be present and free of placeholder values.
    /// Any empty or placeholder value means "not configured" and routes
    /// logins to the local email/password form instead.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        [&self.client_id, &self.tenant_id, &self.tenant_name]
            .into_iter()
            .all(|value| !value.is_empty() && !contains_placeholder(value))
    }

    /// The broker authority URL, e.g. `https://contoso.ciamlogin.com/<tenant-id>`.
    #[must_use]
    pub fn authority(&self) -> String {
        format!("https://{}/{}", self.tenant_name, self.tenant_id)
    }
}

fn contains_placeholder(value: &str) -> bool {
    PLACEHOLDER_MARKERS
        .iter()
        .any(|marker| value.contains(marker))
}
