//! The two benchmark drivers and their shared report.
//!
//! Both drivers plug an [`ItemEvaluator`](crate::scoring::ItemEvaluator) into
//! the scoring loop: [`mcq`] for multiple-choice accuracy and [`tools`] for
//! tool-call correctness.

pub mod mcq;
pub mod report;
pub mod tools;

pub use mcq::{McqEvaluator, McqSettings, MCQ_SYSTEM_PROMPT};
pub use report::{BenchReport, BenchmarkKind};
pub use tools::{ToolCallEvaluator, ToolSettings, TOOL_SYSTEM_PROMPT};
