//! Final run report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::endpoint::RoutingMode;
use crate::scoring::ScoreTally;

/// Which benchmark produced a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenchmarkKind {
    Mmlu,
    ToolCall,
}

/// Outcome of one benchmark run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchReport {
    pub benchmark: BenchmarkKind,
    /// Dataset subject for multiple-choice runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub mode: RoutingMode,
    pub model: String,
    pub attempted: usize,
    pub correct: usize,
    /// Success percentage in `[0, 100]`.
    pub accuracy: f64,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl BenchReport {
    pub fn new(
        benchmark: BenchmarkKind,
        subject: Option<String>,
        mode: RoutingMode,
        model: impl Into<String>,
        tally: ScoreTally,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            benchmark,
            subject,
            mode,
            model: model.into(),
            attempted: tally.attempted,
            correct: tally.correct,
            accuracy: tally.percentage(),
            started_at,
            finished_at: Utc::now(),
        }
    }

    /// The closing line printed after the progress lines.
    pub fn summary_line(&self) -> String {
        match self.benchmark {
            BenchmarkKind::Mmlu => format!(
                "Final Score for {} ({}): {:.2}%",
                self.subject.as_deref().unwrap_or("unknown"),
                self.mode,
                self.accuracy
            ),
            BenchmarkKind::ToolCall => format!(
                "Tool-call success ({}): {:.2}% ({}/{})",
                self.mode, self.accuracy, self.correct, self.attempted
            ),
        }
    }
}
