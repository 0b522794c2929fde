use serde::{Deserialize, Serialize};

/// The three mutually exclusive authentication modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AuthMode {
    DevBypass,
    Local,
    Federated,
}

impl AuthMode {
    /// Fixed resolution order: dev-bypass wins over local, local over
    /// federated. Dev-bypass must win even when a federated account is
    /// cached, so engineers can skip SSO entirely during local development.
    /// Reordering this list is the single place to change precedence.
    pub const PRECEDENCE: [Self; 3] = [Self::DevBypass, Self::Local, Self::Federated];

    /// The store namespace for this mode.
    #[must_use]
    pub const fn namespace(self) -> &'static str {
        match self {
            Self::DevBypass => "devBypass",
            Self::Local => "local",
            Self::Federated => "federated",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precedence_order_is_dev_then_local_then_federated() {
        assert_eq!(
            AuthMode::PRECEDENCE,
            [AuthMode::DevBypass, AuthMode::Local, AuthMode::Federated]
        );
    }

    #[test]
    fn namespaces_are_distinct() {
        let namespaces: std::collections::BTreeSet<_> = AuthMode::PRECEDENCE
            .iter()
            .map(|mode| mode.namespace())
            .collect();
        assert_eq!(namespaces.len(), 3);
    }

    #[test]
    fn mode_serializes_camel_case() {
        assert_eq!(
            serde_json::to_string(&AuthMode::DevBypass).expect("serialize"),
            "\"devBypass\""
        );
    }
}
