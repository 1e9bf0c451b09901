//! Command-line interface for the benchmark binaries.
//!
//! Each binary parses its own argument struct, initializes logging, and hands
//! off to the matching runner.

mod commands;

pub use commands::{
    parse_mmlu_cli, parse_toolbench_cli, run_mmlu, run_toolbench, MmluCli, ToolbenchCli,
};

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing on stderr.
///
/// Priority: RUST_LOG env var > `--log-level` CLI arg > default "info".
pub fn init_tracing(log_level: &str) {
    let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string());

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter)))
        .init();
}
