//! run_mmlu entry point.
//!
//! Initializes logging and delegates to the CLI module. Any error is printed to
//! stderr and the process exits with status 1.

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments first to get log_level
    let cli = raph_bench::cli::parse_mmlu_cli();
    raph_bench::cli::init_tracing(&cli.log_level);

    raph_bench::cli::run_mmlu(cli).await?;
    Ok(())
}
