//! Backend API configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Base URL of the backend API, e.g. `http://localhost:3001`.
    #[serde(default)]
    pub base_url: String,
}

impl ApiConfig {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.base_url.is_empty()
    }

    /// Require a usable backend URL before issuing API calls.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotConfigured` when no base URL is set.
    pub fn require_configured(&self) -> Result<(), ConfigError> {
        if self.is_configured() {
            Ok(())
        } else {
            Err(ConfigError::NotConfigured {
                section: "api".into(),
            })
        }
    }

    /// Base URL without a trailing slash, so paths can be appended directly.
    #[must_use]
    pub fn base_url_trimmed(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        assert!(!ApiConfig::default().is_configured());
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let config = ApiConfig {
            base_url: "http://localhost:3001/".into(),
        };
        assert_eq!(config.base_url_trimmed(), "http://localhost:3001");
    }

    #[test]
    fn missing_base_url_is_a_not_configured_error() {
        let result = ApiConfig::default().require_configured();
        assert!(matches!(
            result,
            Err(ConfigError::NotConfigured { ref section }) if section == "api"
        ));

        let config = ApiConfig {
            base_url: "http://localhost:3001".into(),
        };
        assert!(config.require_configured().is_ok());
    }
}
