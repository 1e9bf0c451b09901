//! run_toolbench entry point.
//!
//! Initializes logging and delegates to the CLI module. Any error is printed to
//! stderr and the process exits with status 1.

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = raph_bench::cli::parse_toolbench_cli();
    raph_bench::cli::init_tracing(&cli.log_level);

    raph_bench::cli::run_toolbench(cli).await?;
    Ok(())
}
