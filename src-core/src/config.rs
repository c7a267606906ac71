//! Remote service configuration
//!
//! Values are read from the process environment first and fall back to
//! whatever was present in the build environment, so a browser bundle can
//! carry its service URL and public key.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const URL_VAR: &str = "SUPABASE_URL";
pub const ANON_KEY_VAR: &str = "SUPABASE_ANON_KEY";

/// Connection settings for the hosted backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Project base URL, without trailing slash
    pub url: String,
    /// Public (anon) API key
    pub anon_key: String,
}

impl RemoteConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into().trim().trim_end_matches('/').to_string();
        let anon_key = anon_key.into().trim().to_string();

        if url.is_empty() {
            return Err(ConfigError::Missing(URL_VAR));
        }
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(ConfigError::InvalidUrl(url));
        }
        if anon_key.is_empty() {
            return Err(ConfigError::Missing(ANON_KEY_VAR));
        }

        Ok(Self { url, anon_key })
    }

    /// Resolve configuration from the environment.
    ///
    /// Returns `Ok(None)` when neither value is set (no backend configured).
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        let url = lookup(URL_VAR, option_env!("SUPABASE_URL"));
        let anon_key = lookup(ANON_KEY_VAR, option_env!("SUPABASE_ANON_KEY"));

        match (url, anon_key) {
            (None, None) => Ok(None),
            (Some(url), Some(key)) => Self::new(url, key).map(Some),
            (None, Some(_)) => Err(ConfigError::Missing(URL_VAR)),
            (Some(_), None) => Err(ConfigError::Missing(ANON_KEY_VAR)),
        }
    }

    pub fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.url, path)
    }

    pub fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.url, table)
    }
}

fn lookup(name: &str, built_in: Option<&'static str>) -> Option<String> {
    std::env::var(name)
        .ok()
        .or_else(|| built_in.map(str::to_string))
        .filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = RemoteConfig::new("https://abc.supabase.co/", "key").unwrap();
        assert_eq!(config.url, "https://abc.supabase.co");
        assert_eq!(config.rest_url("items"), "https://abc.supabase.co/rest/v1/items");
        assert_eq!(config.auth_url("signup"), "https://abc.supabase.co/auth/v1/signup");
    }

    #[test]
    fn test_rejects_bad_values() {
        assert_eq!(
            RemoteConfig::new("abc.supabase.co", "key"),
            Err(ConfigError::InvalidUrl("abc.supabase.co".to_string()))
        );
        assert_eq!(
            RemoteConfig::new("https://abc.supabase.co", "  "),
            Err(ConfigError::Missing(ANON_KEY_VAR))
        );
        assert_eq!(RemoteConfig::new("", "key"), Err(ConfigError::Missing(URL_VAR)));
    }
}
