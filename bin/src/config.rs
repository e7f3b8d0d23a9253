//! Tap configuration file.

use anyhow::{Context, Result};
use partnertap_lib::prelude::*;
use serde::{Deserialize, Deserializer};
use std::path::Path;
use std::time::Duration;

/// Contents of the `--config` JSON file.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TapConfig {
    /// Partner organization id (string or number).
    #[serde(default, deserialize_with = "string_or_number")]
    pub(crate) organization_id: String,
    /// Partner API client access token.
    #[serde(default)]
    pub(crate) shopify_partners_access_token: String,
    /// Fallback start date when neither the flag nor a bookmark is given.
    #[serde(default)]
    pub(crate) start_date: Option<String>,
    /// Request timeout in seconds.
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
    /// User agent override.
    #[serde(default)]
    pub(crate) user_agent: Option<String>,
}

impl TapConfig {
    /// Reads and parses a config file.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Builds the credentials for this run.
    pub(crate) fn auth(&self) -> partnertap_lib::Result<AuthContext> {
        AuthContext::new(
            self.organization_id.as_str(),
            self.shopify_partners_access_token.as_str(),
        )
    }

    /// Builds the HTTP transport configuration.
    pub(crate) fn client_config(&self) -> ClientConfig {
        let defaults = ClientConfig::default();
        ClientConfig {
            timeout: self
                .timeout_secs
                .map_or(defaults.timeout, Duration::from_secs),
            user_agent: self.user_agent.clone().unwrap_or(defaults.user_agent),
            ..defaults
        }
    }
}

/// Picks the start date: explicit flag, then bookmark, then config.
pub(crate) fn resolve_start_date<'a>(
    flag: Option<&'a str>,
    bookmark: Option<&'a str>,
    config: Option<&'a str>,
) -> Option<&'a str> {
    [flag, bookmark, config]
        .into_iter()
        .flatten()
        .find(|s| !s.trim().is_empty())
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(u64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn test_load_config() {
        let (_dir, path) = write_config(
            r#"{
                "organization_id": "1234567",
                "shopify_partners_access_token": "prtapi_secret",
                "start_date": "2022-03-01",
                "timeout_secs": 15
            }"#,
        );

        let config = TapConfig::load(&path).unwrap();
        assert_eq!(config.start_date.as_deref(), Some("2022-03-01"));
        assert_eq!(config.client_config().timeout, Duration::from_secs(15));

        let auth = config.auth().unwrap();
        assert_eq!(auth.organization_id(), "1234567");
    }

    #[test]
    fn test_numeric_organization_id() {
        let (_dir, path) = write_config(
            r#"{"organization_id": 1234567, "shopify_partners_access_token": "t"}"#,
        );
        let config = TapConfig::load(&path).unwrap();
        assert_eq!(config.organization_id, "1234567");
        assert!(config.start_date.is_none());
        assert_eq!(config.client_config().timeout, ClientConfig::default().timeout);
    }

    #[test]
    fn test_missing_token_is_config_error() {
        let (_dir, path) = write_config(r#"{"organization_id": "1234567"}"#);
        let config = TapConfig::load(&path).unwrap();
        assert!(matches!(config.auth(), Err(TapError::Config(_))));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = TapConfig::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_resolve_start_date_precedence() {
        assert_eq!(
            resolve_start_date(Some("2022-03-03"), Some("2022-03-02"), Some("2022-03-01")),
            Some("2022-03-03")
        );
        assert_eq!(
            resolve_start_date(None, Some("2022-03-02"), Some("2022-03-01")),
            Some("2022-03-02")
        );
        assert_eq!(
            resolve_start_date(Some(" "), None, Some("2022-03-01")),
            Some("2022-03-01")
        );
        assert_eq!(resolve_start_date(None, None, Some("")), None);
    }
}
