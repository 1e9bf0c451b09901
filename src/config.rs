//! Process configuration for the benchmark drivers.
//!
//! Values are read once at startup and treated as immutable for the run.

use crate::error::ConfigError;

/// Environment variable holding the proxy base URL.
pub const PROXY_URL_VAR: &str = "PROXY_URL";

/// Environment variable holding the upstream provider base URL.
pub const PROVIDER_URL_VAR: &str = "POSITRON_URL";

/// Environment variable holding the bearer credential.
pub const API_KEY_VAR: &str = "POSITRON_KEY";

/// Environment variable overriding the default model identifier.
pub const MODEL_VAR: &str = "MMLU_MODEL";

pub const DEFAULT_PROXY_URL: &str = "http://localhost:9000/v1";
pub const DEFAULT_PROVIDER_URL: &str = "https://api.positron.ai/v1";
pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instruct-good-tp2";

/// Endpoint and credential configuration shared by both benchmarks.
#[derive(Clone)]
pub struct BenchConfig {
    /// Base URL of the reliability proxy.
    pub proxy_url: String,
    /// Base URL of the upstream inference provider.
    pub provider_url: String,
    /// Bearer credential attached to every request.
    pub api_key: String,
    /// Model used when the CLI does not name one.
    pub default_model: String,
}

impl BenchConfig {
    /// Read configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingCredential` if `POSITRON_KEY` is unset or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingCredential(API_KEY_VAR))?;

        Ok(Self {
            proxy_url: lookup(PROXY_URL_VAR).unwrap_or_else(|| DEFAULT_PROXY_URL.to_string()),
            provider_url: lookup(PROVIDER_URL_VAR)
                .unwrap_or_else(|| DEFAULT_PROVIDER_URL.to_string()),
            api_key,
            default_model: lookup(MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        })
    }

    /// Credential masked for logging.
    pub fn api_key_masked(&self) -> String {
        let char_count = self.api_key.chars().count();
        if char_count <= 8 {
            return "*".repeat(char_count);
        }

        let head: String = self.api_key.chars().take(4).collect();
        let mut tail: Vec<char> = self.api_key.chars().rev().take(4).collect();
        tail.reverse();
        format!("{}...{}", head, tail.into_iter().collect::<String>())
    }
}

impl std::fmt::Debug for BenchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BenchConfig")
            .field("proxy_url", &self.proxy_url)
            .field("provider_url", &self.provider_url)
            .field("api_key", &self.api_key_masked())
            .field("default_model", &self.default_model)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_applied_when_only_key_set() {
        let config = BenchConfig::from_lookup(lookup_from(&[(API_KEY_VAR, "secret-key")]))
            .expect("key is present");

        assert_eq!(config.proxy_url, DEFAULT_PROXY_URL);
        assert_eq!(config.provider_url, DEFAULT_PROVIDER_URL);
        assert_eq!(config.default_model, DEFAULT_MODEL);
        assert_eq!(config.api_key, "secret-key");
    }

    #[test]
    fn test_overrides_from_lookup() {
        let config = BenchConfig::from_lookup(lookup_from(&[
            (API_KEY_VAR, "k"),
            (PROXY_URL_VAR, "http://proxy:1234/v1/"),
            (PROVIDER_URL_VAR, "https://provider.example/v1"),
            (MODEL_VAR, "tiny-model"),
        ]))
        .expect("key is present");

        assert_eq!(config.proxy_url, "http://proxy:1234/v1/");
        assert_eq!(config.provider_url, "https://provider.example/v1");
        assert_eq!(config.default_model, "tiny-model");
    }

    #[test]
    fn test_missing_key_is_fatal() {
        let err = BenchConfig::from_lookup(lookup_from(&[(PROXY_URL_VAR, "http://x")]))
            .expect_err("key is missing");
        assert!(matches!(err, ConfigError::MissingCredential(API_KEY_VAR)));
        assert_eq!(err.to_string(), "Missing POSITRON_KEY in environment.");
    }

    #[test]
    fn test_empty_key_is_missing() {
        let err = BenchConfig::from_lookup(lookup_from(&[(API_KEY_VAR, "")]))
            .expect_err("empty key");
        assert!(matches!(err, ConfigError::MissingCredential(_)));
    }

    #[test]
    fn test_debug_masks_key() {
        let config =
            BenchConfig::from_lookup(lookup_from(&[(API_KEY_VAR, "abcd1234efgh5678")])).unwrap();
        let rendered = format!("{:?}", config);
        assert!(rendered.contains("abcd...5678"));
        assert!(!rendered.contains("abcd1234efgh5678"));
    }

    #[test]
    fn test_mask_counts_chars_not_bytes() {
        let config =
            BenchConfig::from_lookup(lookup_from(&[(API_KEY_VAR, "aéééé-key")])).unwrap();
        assert_eq!(config.api_key_masked(), "aééé...-key");
        assert!(format!("{:?}", config).contains("aééé...-key"));

        let config = BenchConfig::from_lookup(lookup_from(&[(API_KEY_VAR, "ééé")])).unwrap();
        assert_eq!(config.api_key_masked(), "***");
    }
}
