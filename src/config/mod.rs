//! Configuration management for mcrelay
//!
//! Endpoints and application settings come from an optional YAML file.
//! Credentials come from the environment only, and the environment wins
//! over the file for every other field it sets.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

use crate::client::models::Credentials;
use crate::error::{ConfigError, Result};

/// Marketing Cloud auth endpoint for the tenant this relay was built against
pub const DEFAULT_AUTH_URL: &str =
    "https://mcz111jg0kwv-qyxpw8rh1dff6j8.auth.marketingcloudapis.com/v2/token";

/// Marketing Cloud REST base URL for the same tenant
pub const DEFAULT_REST_BASE_URL: &str =
    "https://mcz111jg0kwv-qyxpw8rh1dff6j8.rest.marketingcloudapis.com/";

pub const ENV_CLIENT_ID: &str = "SFMC_API_CLIENTID";
pub const ENV_CLIENT_SECRET: &str = "SFMC_API_CLIENTSECRET";
pub const ENV_APP_ID: &str = "SFMC_APP_ID";
pub const ENV_APP_NAME: &str = "SFMC_APP_NAME";
pub const ENV_ACCOUNT_ID: &str = "SFMC_ACCOUNT_ID";
pub const ENV_AUTH_URL: &str = "SFMC_AUTH_URL";
pub const ENV_REST_BASE_URL: &str = "SFMC_REST_BASE_URL";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// OAuth token endpoint
    #[serde(default = "default_auth_url")]
    pub auth_url: String,

    /// REST API base URL
    #[serde(default = "default_rest_base_url")]
    pub rest_base_url: String,

    /// Business unit MID sent with token requests
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,

    /// MobilePush application id used as the default push target
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,

    /// MobilePush application name used as the default push target
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Client-side cap on outbound vendor calls
    #[serde(default = "default_rate_limit")]
    pub rate_limit_per_second: u32,

    #[serde(skip)]
    pub client_id: Option<String>,

    #[serde(skip)]
    pub client_secret: Option<String>,
}

fn default_auth_url() -> String {
    DEFAULT_AUTH_URL.to_string()
}

fn default_rest_base_url() -> String {
    DEFAULT_REST_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_rate_limit() -> u32 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            auth_url: default_auth_url(),
            rest_base_url: default_rest_base_url(),
            account_id: None,
            app_id: None,
            app_name: None,
            timeout_secs: default_timeout_secs(),
            rate_limit_per_second: default_rate_limit(),
            client_id: None,
            client_secret: None,
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".mcrelay").join("config.yaml"))
    }

    /// Load the file (if any) and overlay the process environment.
    ///
    /// An explicit `path` must exist. The default path is optional.
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        let mut config = match path {
            Some(p) => {
                let path = PathBuf::from(p);
                if !path.exists() {
                    return Err(ConfigError::Invalid(format!(
                        "config file not found: {}",
                        path.display()
                    ))
                    .into());
                }
                Self::load_from(path)?
            }
            None => {
                let path = Self::default_path()?;
                if path.exists() {
                    Self::load_from(path)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_env_with(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: PathBuf) -> Result<Self> {
        let contents = std::fs::read_to_string(&path)?;
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Overlay values from an environment lookup. Empty values are ignored.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get(ENV_CLIENT_ID) {
            self.client_id = Some(v);
        }
        if let Some(v) = get(ENV_CLIENT_SECRET) {
            self.client_secret = Some(v);
        }
        if let Some(v) = get(ENV_APP_ID) {
            self.app_id = Some(v);
        }
        if let Some(v) = get(ENV_APP_NAME) {
            self.app_name = Some(v);
        }
        if let Some(v) = get(ENV_ACCOUNT_ID) {
            self.account_id = Some(v);
        }
        if let Some(v) = get(ENV_AUTH_URL) {
            self.auth_url = v;
        }
        if let Some(v) = get(ENV_REST_BASE_URL) {
            self.rest_base_url = v;
        }
    }

    /// REST base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.rest_base_url.trim_end_matches('/')
    }

    /// Validate everything a client needs and hand back the credentials.
    ///
    /// Called before any client is built so a misconfigured process fails
    /// at startup rather than on first use.
    pub fn validate(&self) -> Result<Credentials> {
        let client_id = self.client_id.as_deref().unwrap_or_default();
        let client_secret = self.client_secret.as_deref().unwrap_or_default();
        if client_id.is_empty() || client_secret.is_empty() {
            return Err(ConfigError::MissingCredentials.into());
        }

        for (name, value) in [
            ("auth_url", self.auth_url.as_str()),
            ("rest_base_url", self.rest_base_url.as_str()),
        ] {
            Url::parse(value)
                .map_err(|e| ConfigError::Invalid(format!("{name} '{value}': {e}")))?;
        }

        if self.rate_limit_per_second == 0 {
            return Err(
                ConfigError::Invalid("rate_limit_per_second must be positive".to_string()).into(),
            );
        }

        Ok(Credentials::new(client_id, client_secret))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.auth_url, DEFAULT_AUTH_URL);
        assert!(config.client_id.is_none());
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.rate_limit_per_second, 10);
    }

    #[test]
    fn test_missing_credentials_fail_fast() {
        let config = Config::default();
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::Config(ConfigError::MissingCredentials)
        ));
    }

    #[test]
    fn test_missing_secret_fails() {
        let mut config = Config::default();
        config.apply_env_with(env(&[(ENV_CLIENT_ID, "id")]));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_env_values_are_ignored() {
        let mut config = Config::default();
        config.apply_env_with(env(&[(ENV_CLIENT_ID, "  "), (ENV_CLIENT_SECRET, "")]));
        assert!(config.client_id.is_none());
        assert!(config.client_secret.is_none());
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut config: Config = serde_yaml::from_str(
            "auth_url: https://file.example.com/v2/token\napp_id: file-app\n",
        )
        .unwrap();
        config.apply_env_with(env(&[
            (ENV_CLIENT_ID, "id"),
            (ENV_CLIENT_SECRET, "secret"),
            (ENV_APP_ID, "env-app"),
            (ENV_APP_NAME, "Env App"),
        ]));

        assert_eq!(config.auth_url, "https://file.example.com/v2/token");
        assert_eq!(config.app_id.as_deref(), Some("env-app"));
        assert_eq!(config.app_name.as_deref(), Some("Env App"));

        let creds = config.validate().unwrap();
        assert_eq!(creds.client_id(), "id");
    }

    #[test]
    fn test_secrets_are_not_read_from_file_or_written_back() {
        let config: Config =
            serde_yaml::from_str("client_id: file-id\nclient_secret: file-secret\n").unwrap();
        assert!(config.client_id.is_none());

        let mut config = Config::default();
        config.apply_env_with(env(&[(ENV_CLIENT_ID, "id"), (ENV_CLIENT_SECRET, "s3cret")]));
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(!yaml.contains("s3cret"));
    }

    #[test]
    fn test_invalid_url_rejected() {
        let mut config = Config::default();
        config.apply_env_with(env(&[
            (ENV_CLIENT_ID, "id"),
            (ENV_CLIENT_SECRET, "secret"),
            (ENV_REST_BASE_URL, "not a url"),
        ]));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("rest_base_url"));
    }

    #[test]
    fn test_base_url_trims_trailing_slash() {
        let config = Config::default();
        assert!(!config.base_url().ends_with('/'));
        assert!(config.base_url().ends_with("marketingcloudapis.com"));
    }

    #[test]
    fn test_load_at_missing_explicit_path() {
        let err = Config::load_at(Some("/nonexistent/mcrelay/config.yaml")).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "rest_base_url: http://localhost:9999/\ntimeout_secs: 5\n").unwrap();

        let config = Config::load_from(path).unwrap();
        assert_eq!(config.base_url(), "http://localhost:9999");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.auth_url, DEFAULT_AUTH_URL);
    }

    #[test]
    fn test_empty_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "\n").unwrap();

        let config = Config::load_from(path).unwrap();
        assert_eq!(config.rest_base_url, DEFAULT_REST_BASE_URL);
        assert_eq!(config.rate_limit_per_second, 10);
    }
}
