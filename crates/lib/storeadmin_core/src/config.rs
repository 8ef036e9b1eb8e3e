// @awa-component: CFG-ConsoleConfig
//
//! Console configuration: storage key names and guard destinations.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Names of the keys the session lives under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageKeys {
    /// Raw (or `Bearer `-prefixed) credential token.
    pub access_token: String,
    /// Logged-in marker, `"true"` while a session is active.
    pub logged_in: String,
    /// Opaque user profile written at login.
    pub user_info: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            access_token: "accessToken".into(),
            logged_in: "isLoggedIn".into(),
            user_info: "userInfo".into(),
        }
    }
}

/// Destinations the route guards redirect to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardRoutes {
    /// Where unauthenticated users are sent.
    pub login: String,
    /// Where authenticated users land when they open a public-only page.
    pub landing: String,
    /// Where users without the required role are sent.
    pub access_denied: String,
}

impl Default for GuardRoutes {
    fn default() -> Self {
        Self {
            login: "/login".into(),
            landing: "/dashboard".into(),
            access_denied: "/403".into(),
        }
    }
}

/// Top-level console configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub storage: StorageKeys,
    pub routes: GuardRoutes,
}

impl ConsoleConfig {
    /// Parse a YAML document. Missing fields keep their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(yaml)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Load a YAML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Apply overrides from environment variables.
    ///
    /// | Variable                        | Field                  |
    /// |---------------------------------|------------------------|
    /// | `STOREADMIN_LOGIN_PATH`         | `routes.login`         |
    /// | `STOREADMIN_LANDING_PATH`       | `routes.landing`       |
    /// | `STOREADMIN_ACCESS_DENIED_PATH` | `routes.access_denied` |
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let targets = [
            ("STOREADMIN_LOGIN_PATH", &mut self.routes.login),
            ("STOREADMIN_LANDING_PATH", &mut self.routes.landing),
            ("STOREADMIN_ACCESS_DENIED_PATH", &mut self.routes.access_denied),
        ];
        for (name, field) in targets {
            if let Some(value) = lookup(name)
                && !value.is_empty()
            {
                *field = value;
            }
        }
        self.validate()?;
        Ok(self)
    }

    /// Check that every destination is an absolute path and every key is set.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let routes = [
            ("login", &self.routes.login),
            ("landing", &self.routes.landing),
            ("access_denied", &self.routes.access_denied),
        ];
        for (name, path) in routes {
            if !path.starts_with('/') {
                return Err(ConfigError::Invalid(format!(
                    "route `{name}` must start with '/', got {path:?}"
                )));
            }
        }
        let keys = [
            ("access_token", &self.storage.access_token),
            ("logged_in", &self.storage.logged_in),
            ("user_info", &self.storage.user_info),
        ];
        for (name, key) in keys {
            if key.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "storage key `{name}` must not be empty"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn defaults_match_console_conventions() {
        let config = ConsoleConfig::default();
        assert_eq!(config.storage.access_token, "accessToken");
        assert_eq!(config.storage.logged_in, "isLoggedIn");
        assert_eq!(config.storage.user_info, "userInfo");
        assert_eq!(config.routes.login, "/login");
        assert_eq!(config.routes.landing, "/dashboard");
        assert_eq!(config.routes.access_denied, "/403");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = ConsoleConfig::from_yaml_str("routes:\n  login: /signin\n").unwrap();
        assert_eq!(config.routes.login, "/signin");
        assert_eq!(config.routes.landing, "/dashboard");
        assert_eq!(config.storage, StorageKeys::default());
    }

    #[test]
    fn empty_yaml_is_default() {
        assert_eq!(
            ConsoleConfig::from_yaml_str("").unwrap(),
            ConsoleConfig::default()
        );
    }

    #[test]
    fn relative_route_is_rejected() {
        let err = ConsoleConfig::from_yaml_str("routes:\n  access_denied: forbidden\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn empty_storage_key_is_rejected() {
        let err = ConsoleConfig::from_yaml_str("storage:\n  logged_in: ''\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let err = ConsoleConfig::from_yaml_str("routes: [").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn overrides_replace_routes() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("STOREADMIN_LOGIN_PATH", "/auth/login"),
            ("STOREADMIN_ACCESS_DENIED_PATH", ""),
        ]);
        let config = ConsoleConfig::default()
            .with_overrides(|name| vars.get(name).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.routes.login, "/auth/login");
        assert_eq!(config.routes.access_denied, "/403");
    }

    #[test]
    fn invalid_override_is_rejected() {
        let result = ConsoleConfig::default().with_overrides(|name| {
            (name == "STOREADMIN_LANDING_PATH").then(|| "home".to_string())
        });
        assert!(result.is_err());
    }
}
