//! raph-bench: accuracy and tool-call benchmarks for a reliability proxy.
//!
//! The same sample of multiple-choice questions or tool-use prompts is sent
//! through one of three routing modes (proxy on, proxy bypassed, direct to the
//! provider) so behavioral drift introduced by the proxy can be measured.

pub mod bench;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod endpoint;
pub mod error;
pub mod scoring;

// Re-export commonly used error types
pub use error::{ConfigError, DatasetError, EndpointError};
