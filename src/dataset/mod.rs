//! Benchmark inputs: multiple-choice questions and tool-call tasks.

pub mod mmlu;
pub mod tasks;

pub use mmlu::{parse_rows_page, MmluSource, QuestionItem, DEFAULT_DATASET};
pub use tasks::{default_tasks, load_tasks, parse_tasks, tool_specs, ToolSpec, ToolTask};
