//! Routing modes and their target URL and header sets.
//!
//! The only behavioral difference between the two proxy modes is the bypass
//! header; direct mode swaps the base URL for the upstream provider.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::BenchConfig;
use crate::error::ConfigError;

/// Header that tells the proxy to pass requests through untouched.
pub const BYPASS_HEADER: &str = "x-raph-mode";

/// Value of [`BYPASS_HEADER`] that disables proxy logic.
pub const BYPASS_VALUE: &str = "off";

/// Path appended to every base URL.
pub const CHAT_COMPLETIONS_PATH: &str = "chat/completions";

/// Which network path a benchmark request takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum RoutingMode {
    /// Through the reliability proxy with its logic active.
    #[value(name = "proxy_on")]
    ProxyOn,
    /// Through the proxy with its logic bypassed.
    #[value(name = "proxy_off")]
    ProxyOff,
    /// Straight to the upstream provider.
    #[value(name = "direct")]
    Direct,
}

impl RoutingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoutingMode::ProxyOn => "proxy_on",
            RoutingMode::ProxyOff => "proxy_off",
            RoutingMode::Direct => "direct",
        }
    }
}

impl fmt::Display for RoutingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Target of a chat-completions request.
#[derive(Debug, Clone)]
pub struct Route {
    pub url: String,
    pub headers: HeaderMap,
}

impl Route {
    /// True when the proxy bypass header is present.
    #[cfg(test)]
    fn bypasses_proxy(&self) -> bool {
        self.headers
            .get(BYPASS_HEADER)
            .is_some_and(|value| value == BYPASS_VALUE)
    }
}

/// Maps a [`RoutingMode`] to a [`Route`].
#[derive(Clone)]
pub struct ModeRouter {
    proxy_endpoint: String,
    provider_endpoint: String,
    authorization: HeaderValue,
}

impl ModeRouter {
    /// Build a router from process configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidCredential` if the key cannot be sent as a header.
    pub fn new(config: &BenchConfig) -> Result<Self, ConfigError> {
        let mut authorization = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|e| ConfigError::InvalidCredential(e.to_string()))?;
        authorization.set_sensitive(true);

        Ok(Self {
            proxy_endpoint: join_endpoint(&config.proxy_url),
            provider_endpoint: join_endpoint(&config.provider_url),
            authorization,
        })
    }

    pub fn resolve(&self, mode: RoutingMode) -> Route {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, self.authorization.clone());

        let url = match mode {
            RoutingMode::ProxyOn => self.proxy_endpoint.clone(),
            RoutingMode::ProxyOff => {
                headers.insert(
                    HeaderName::from_static(BYPASS_HEADER),
                    HeaderValue::from_static(BYPASS_VALUE),
                );
                self.proxy_endpoint.clone()
            }
            RoutingMode::Direct => self.provider_endpoint.clone(),
        };

        Route { url, headers }
    }
}

impl fmt::Debug for ModeRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModeRouter")
            .field("proxy_endpoint", &self.proxy_endpoint)
            .field("provider_endpoint", &self.provider_endpoint)
            .finish_non_exhaustive()
    }
}

/// Join a base URL and the chat-completions path, ignoring trailing slashes.
fn join_endpoint(base: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), CHAT_COMPLETIONS_PATH)
}
