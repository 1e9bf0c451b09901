//! CLI definitions and runners for the two benchmarks.
//!
//! `run_mmlu` measures multiple-choice accuracy and `run_toolbench` measures
//! tool-call correctness. Both accept a routing mode so the same run can be
//! repeated through the proxy, through the proxy with its logic bypassed, and
//! directly against the provider.

use chrono::Utc;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::bench::{
    BenchReport, BenchmarkKind, McqEvaluator, McqSettings, ToolCallEvaluator, ToolSettings,
};
use crate::config::{BenchConfig, MODEL_VAR};
use crate::dataset::{load_tasks, tool_specs, MmluSource, DEFAULT_DATASET};
use crate::endpoint::{ChatClient, ModeRouter, RoutingMode};
use crate::scoring::ScoringLoop;

const DEFAULT_SUBJECT: &str = "college_computer_science";

/// Split that supplies few-shot exemplars.
const DEV_SPLIT: &str = "dev";

/// Lightweight MMLU benchmark against a custom inference endpoint.
#[derive(Parser, Debug)]
#[command(name = "run_mmlu")]
#[command(about = "Run a lightweight MMLU benchmark against a custom endpoint")]
#[command(version)]
#[command(
    long_about = "Runs a small MMLU sample through one routing mode and reports accuracy.\n\nModes:\n  proxy_on   through the reliability proxy\n  proxy_off  through the proxy with its logic bypassed (x-raph-mode: off)\n  direct     straight to the upstream provider\n\nExample usage:\n  run_mmlu --subject college_computer_science --num-samples 20 --mode proxy_off"
)]
pub struct MmluCli {
    /// MMLU subject to evaluate.
    #[arg(long, default_value = DEFAULT_SUBJECT)]
    pub subject: String,

    /// Dataset split to score.
    #[arg(long, default_value = "test")]
    pub split: String,

    /// HuggingFace dataset repository.
    #[arg(long, default_value = DEFAULT_DATASET)]
    pub dataset: String,

    /// How many questions to run.
    #[arg(short = 'n', long, default_value = "5")]
    pub num_samples: usize,

    /// Routing mode.
    #[arg(long, value_enum, default_value = "proxy_on")]
    pub mode: RoutingMode,

    /// Model identifier (defaults to MMLU_MODEL or the built-in default).
    #[arg(short = 'm', long, env = MODEL_VAR)]
    pub model: Option<String>,

    /// Sampling temperature.
    #[arg(long, default_value = "0.0")]
    pub temperature: f64,

    /// Number of few-shot examples (0 for zero-shot).
    #[arg(long, default_value = "5")]
    pub shots: usize,

    /// Score by token logprobs when the endpoint returns them.
    #[arg(long)]
    pub use_logprobs: bool,

    /// Print the report as JSON instead of progress lines.
    #[arg(short = 'j', long)]
    pub json: bool,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info")]
    pub log_level: String,
}

/// Minimal tool-call benchmark comparing proxy and direct behavior.
#[derive(Parser, Debug)]
#[command(name = "run_toolbench")]
#[command(about = "Minimal tool-call benchmark (proxy vs direct)")]
#[command(version)]
#[command(
    long_about = "Sends tool-use prompts with a fixed tool table and checks that the first call\nnames the expected tool and carries its required arguments.\n\nExample usage:\n  run_toolbench --mode direct --limit 10\n  run_toolbench --tasks tasks.jsonl"
)]
pub struct ToolbenchCli {
    /// Routing mode.
    #[arg(long, value_enum, default_value = "proxy_on")]
    pub mode: RoutingMode,

    /// Model identifier (defaults to MMLU_MODEL or the built-in default).
    #[arg(short = 'm', long, env = MODEL_VAR)]
    pub model: Option<String>,

    /// Sampling temperature.
    #[arg(long, default_value = "0.0")]
    pub temperature: f64,

    /// JSONL file with fields: prompt, expected_tool, required_args.
    #[arg(long)]
    pub tasks: Option<PathBuf>,

    /// Limit number of tasks to run (0 = all).
    #[arg(long, default_value = "0")]
    pub limit: usize,

    /// Print the report as JSON instead of progress lines.
    #[arg(short = 'j', long)]
    pub json: bool,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info")]
    pub log_level: String,
}

/// Parse `run_mmlu` arguments.
///
/// This allows the binary to read `log_level` before running.
pub fn parse_mmlu_cli() -> MmluCli {
    MmluCli::parse()
}

/// Parse `run_toolbench` arguments.
pub fn parse_toolbench_cli() -> ToolbenchCli {
    ToolbenchCli::parse()
}

fn scoring_loop(limit: usize, json: bool) -> ScoringLoop {
    let scoring = ScoringLoop::new(limit);
    if json {
        scoring.quiet()
    } else {
        scoring
    }
}

fn emit_report(report: &BenchReport, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!("\n{}", report.summary_line());
    }
    Ok(())
}

/// Run the multiple-choice benchmark.
pub async fn run_mmlu(args: MmluCli) -> anyhow::Result<BenchReport> {
    let config = BenchConfig::from_env()?;
    let model = args.model.unwrap_or_else(|| config.default_model.clone());
    info!(config = ?config, mode = %args.mode, "Loaded configuration");

    if !args.json {
        println!(
            "--- Running MMLU: {} | mode={} | model={} | shots={} | logprobs={} ---",
            args.subject, args.mode, model, args.shots, args.use_logprobs
        );
    }

    let client = ChatClient::new(ModeRouter::new(&config)?, args.mode)?;

    let source = MmluSource::with_dataset(&args.dataset)?;
    let questions = source
        .fetch(&args.subject, &args.split, args.num_samples)
        .await?;
    let exemplars = if args.shots > 0 {
        source.fetch(&args.subject, DEV_SPLIT, args.shots).await?
    } else {
        Vec::new()
    };

    let evaluator = McqEvaluator::new(
        Arc::new(client),
        McqSettings {
            model: model.clone(),
            temperature: args.temperature,
            shots: args.shots,
            use_logprobs: args.use_logprobs,
        },
        exemplars,
    );

    let started_at = Utc::now();
    let tally = scoring_loop(0, args.json)
        .run(&evaluator, &questions)
        .await?;

    let report = BenchReport::new(
        BenchmarkKind::Mmlu,
        Some(args.subject),
        args.mode,
        model,
        tally,
        started_at,
    );
    info!(
        attempted = report.attempted,
        correct = report.correct,
        accuracy = report.accuracy,
        "MMLU run finished"
    );
    emit_report(&report, args.json)?;
    Ok(report)
}

/// Run the tool-call benchmark.
pub async fn run_toolbench(args: ToolbenchCli) -> anyhow::Result<BenchReport> {
    let config = BenchConfig::from_env()?;
    let model = args.model.unwrap_or_else(|| config.default_model.clone());
    info!(config = ?config, mode = %args.mode, "Loaded configuration");

    let tasks = load_tasks(args.tasks.as_deref())?;
    if tasks.is_empty() {
        anyhow::bail!("No tasks to run.");
    }

    let client = ChatClient::new(ModeRouter::new(&config)?, args.mode)?;
    let evaluator = ToolCallEvaluator::new(
        Arc::new(client),
        ToolSettings {
            model: model.clone(),
            temperature: args.temperature,
        },
        tool_specs(),
    );

    let started_at = Utc::now();
    let tally = scoring_loop(args.limit, args.json)
        .run(&evaluator, &tasks)
        .await?;

    let report = BenchReport::new(
        BenchmarkKind::ToolCall,
        None,
        args.mode,
        model,
        tally,
        started_at,
    );
    info!(
        attempted = report.attempted,
        correct = report.correct,
        accuracy = report.accuracy,
        "Tool-call run finished"
    );
    emit_report(&report, args.json)?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parses() {
        MmluCli::command().debug_assert();
        ToolbenchCli::command().debug_assert();
    }

    #[test]
    fn test_mmlu_defaults() {
        let cli = MmluCli::try_parse_from(["run_mmlu"]).expect("should parse");
        assert_eq!(cli.subject, DEFAULT_SUBJECT);
        assert_eq!(cli.split, "test");
        assert_eq!(cli.dataset, DEFAULT_DATASET);
        assert_eq!(cli.num_samples, 5);
        assert_eq!(cli.mode, RoutingMode::ProxyOn);
        assert_eq!(cli.temperature, 0.0);
        assert_eq!(cli.shots, 5);
        assert!(!cli.use_logprobs);
        assert!(!cli.json);
        assert_eq!(cli.log_level, "info");
    }

    #[test]
    fn test_mmlu_with_all_options() {
        let cli = MmluCli::try_parse_from([
            "run_mmlu",
            "--subject",
            "astronomy",
            "--split",
            "validation",
            "-n",
            "20",
            "--mode",
            "proxy_off",
            "-m",
            "other-model",
            "--temperature",
            "0.7",
            "--shots",
            "0",
            "--use-logprobs",
            "-j",
        ])
        .expect("should parse");

        assert_eq!(cli.subject, "astronomy");
        assert_eq!(cli.split, "validation");
        assert_eq!(cli.num_samples, 20);
        assert_eq!(cli.mode, RoutingMode::ProxyOff);
        assert_eq!(cli.model.as_deref(), Some("other-model"));
        assert_eq!(cli.temperature, 0.7);
        assert_eq!(cli.shots, 0);
        assert!(cli.use_logprobs);
        assert!(cli.json);
    }

    #[test]
    fn test_unknown_mode_rejected() {
        assert!(MmluCli::try_parse_from(["run_mmlu", "--mode", "sideways"]).is_err());
        assert!(ToolbenchCli::try_parse_from(["run_toolbench", "--mode", "proxy-on"]).is_err());
    }

    #[test]
    fn test_toolbench_defaults() {
        let cli = ToolbenchCli::try_parse_from(["run_toolbench"]).expect("should parse");
        assert_eq!(cli.mode, RoutingMode::ProxyOn);
        assert!(cli.tasks.is_none());
        assert_eq!(cli.limit, 0);
        assert!(!cli.json);
    }

    #[test]
    fn test_toolbench_with_options() {
        let cli = ToolbenchCli::try_parse_from([
            "run_toolbench",
            "--mode",
            "direct",
            "--tasks",
            "tasks.jsonl",
            "--limit",
            "10",
        ])
        .expect("should parse");
        assert_eq!(cli.mode, RoutingMode::Direct);
        assert_eq!(cli.tasks, Some(PathBuf::from("tasks.jsonl")));
        assert_eq!(cli.limit, 10);
    }
}
