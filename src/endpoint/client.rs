//! HTTP client for the chat-completions endpoint.
//!
//! One request is sent per call with no retries. Non-200 statuses, network
//! failures and timeouts are transport errors; a body without `choices` is a
//! shape error.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

use super::router::{ModeRouter, RoutingMode};
use super::types::{ChatCompletion, ChatRequest};
use crate::error::EndpointError;

/// Per-request timeout in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Anything that can answer a chat-completions request.
#[async_trait]
pub trait ChatEndpoint: Send + Sync {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatCompletion, EndpointError>;
}

/// Sends requests along the route of a fixed [`RoutingMode`].
pub struct ChatClient {
    http_client: Client,
    router: ModeRouter,
    mode: RoutingMode,
}

impl ChatClient {
    /// Create a client with the default request timeout.
    pub fn new(router: ModeRouter, mode: RoutingMode) -> Result<Self, EndpointError> {
        Self::with_timeout(router, mode, Duration::from_secs(REQUEST_TIMEOUT_SECS))
    }

    pub fn with_timeout(
        router: ModeRouter,
        mode: RoutingMode,
        timeout: Duration,
    ) -> Result<Self, EndpointError> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EndpointError::ClientBuild(e.to_string()))?;

        Ok(Self {
            http_client,
            router,
            mode,
        })
    }
}

#[async_trait]
impl ChatEndpoint for ChatClient {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatCompletion, EndpointError> {
        let route = self.router.resolve(self.mode);
        tracing::debug!(
            url = %route.url,
            mode = %self.mode,
            model = %request.model,
            tools = request.tools.as_ref().map_or(0, Vec::len),
            logprobs = request.logprobs.is_some(),
            "Sending chat completion request"
        );

        let http_response = self
            .http_client
            .post(&route.url)
            .headers(route.headers)
            .json(request)
            .send()
            .await
            .map_err(|e| EndpointError::RequestFailed(e.to_string()))?;

        let status = http_response.status();
        let body = http_response
            .text()
            .await
            .map_err(|e| EndpointError::RequestFailed(e.to_string()))?;

        if status != StatusCode::OK {
            return Err(EndpointError::Status {
                code: status.as_u16(),
                body,
            });
        }

        let value: serde_json::Value = serde_json::from_str(&body)
            .map_err(|e| EndpointError::UnexpectedShape(format!("{}: {}", e, body)))?;
        ChatCompletion::from_value(value)
    }
}
