//! Chat-completions endpoint access.
//!
//! [`router`] resolves a routing mode to a URL and header set, [`client`]
//! sends requests along that route, and [`types`] holds the wire format.

pub mod client;
pub mod router;
pub mod types;

pub use client::{ChatClient, ChatEndpoint, REQUEST_TIMEOUT_SECS};
pub use router::{ModeRouter, Route, RoutingMode, BYPASS_HEADER, BYPASS_VALUE};
pub use types::{
    AlternativeLogprob, ChatCompletion, ChatRequest, Message, ModelResponse, TokenLogprob,
    ToolDefinition, ToolInvocation,
};
