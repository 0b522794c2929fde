//! Application-level configuration.

use serde::{Deserialize, Serialize};

/// Environment names that count as a development execution environment.
/// In these environments the dev-bypass login is offered first.
const DEV_ENVIRONMENTS: [&str; 2] = ["local", "development"];

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Display name of the application.
    #[serde(default = "default_name")]
    pub name: String,

    /// Execution environment: `local`, `development`, or `production`.
    #[serde(default = "default_environment")]
    pub environment: String,

    /// Public domain the application is served from.
    #[serde(default)]
    pub domain: String,
}

fn default_name() -> String {
    "Email MFA Platform".into()
}

fn default_environment() -> String {
    "production".into()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            environment: default_environment(),
            domain: String::new(),
        }
    }
}

impl AppConfig {
    /// True when running in a development execution environment,
    /// where the dev-bypass login is available.
    #[must_use]
    pub fn is_development(&self) -> bool {
        DEV_ENVIRONMENTS
            .iter()
            .any(|env| self.environment.eq_ignore_ascii_case(env))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_environment_is_production() {
        let config = AppConfig::default();
        assert_eq!(config.environment, "production");
        assert!(!config.is_development());
    }

    #[test]
    fn local_and_development_count_as_development() {
        for env in ["local", "development", "Development"] {
            let config = AppConfig {
                environment: env.into(),
                ..AppConfig::default()
            };
            assert!(config.is_development(), "{env} should be development");
        }
    }
}
