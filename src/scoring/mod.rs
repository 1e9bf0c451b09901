//! Evaluation and scoring engine.
//!
//! - [`prompt`]: multiple-choice prompt rendering with optional few-shot exemplars
//! - [`extract`]: answer-letter extraction strategies and their fallback chain
//! - [`tool_call`]: tool-call name and argument validation
//! - [`runner`]: the sequential scoring loop and its tally

pub mod extract;
pub mod letter;
pub mod prompt;
pub mod runner;
pub mod tool_call;

pub use extract::{
    extract_from_logprobs, extract_from_text, AnswerStrategy, ExtractorChain, LogprobStrategy,
    TextStrategy,
};
pub use letter::Letter;
pub use prompt::{render_few_shot, render_question, ANSWER_INSTRUCTION};
pub use runner::{ItemEvaluator, ScoreTally, ScoringLoop, Verdict};
pub use tool_call::validate;
