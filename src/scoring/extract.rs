//! Answer extraction from model responses.
//!
//! Two strategies are provided:
//! 1. [`LogprobStrategy`] picks the A-D token with the highest reported logprob
//! 2. [`TextStrategy`] finds the first standalone A-D letter in the completion
//!
//! An [`ExtractorChain`] tries its strategies in order and returns the first
//! letter found. A chain built for logprob scoring runs the logprob strategy
//! before falling back to text.

use regex::Regex;
use std::sync::OnceLock;

use crate::endpoint::{ModelResponse, TokenLogprob};
use crate::scoring::Letter;

static ANSWER_PATTERN: OnceLock<Regex> = OnceLock::new();

fn answer_pattern() -> &'static Regex {
    ANSWER_PATTERN.get_or_init(|| Regex::new(r"\b([A-D])\b").expect("answer pattern is valid"))
}

/// Select the A-D token with the maximum logprob across all positions.
///
/// Each position contributes its primary token followed by its alternatives.
/// Comparisons are strict, so the first entry seen wins a tie.
pub fn extract_from_logprobs(positions: &[TokenLogprob]) -> Option<Letter> {
    let mut best: Option<(Letter, f64)> = None;
    for (token, logprob) in positions.iter().flat_map(|position| position.entries()) {
        let (Some(letter), Some(logprob)) = (token.and_then(Letter::from_token), logprob) else {
            continue;
        };
        if best.map_or(logprob > f64::NEG_INFINITY, |(_, top)| logprob > top) {
            best = Some((letter, logprob));
        }
    }
    best.map(|(letter, _)| letter)
}

/// Find the first isolated A-D letter in `text`, ignoring case.
pub fn extract_from_text(text: &str) -> Option<Letter> {
    let upper = text.to_uppercase();
    answer_pattern()
        .captures(&upper)
        .and_then(|caps| caps.get(1))
        .and_then(|m| Letter::from_token(m.as_str()))
}

/// A single way of reading an answer letter out of a response.
pub trait AnswerStrategy: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Return the selected letter, or `None` if this strategy finds nothing.
    fn attempt(&self, response: &ModelResponse) -> Option<Letter>;
}

/// Scores by token logprobs. Finds nothing if the response carries none.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogprobStrategy;

impl AnswerStrategy for LogprobStrategy {
    fn name(&self) -> &'static str {
        "logprobs"
    }

    fn attempt(&self, response: &ModelResponse) -> Option<Letter> {
        response.logprobs().and_then(extract_from_logprobs)
    }
}

/// Scores by searching the completion text.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextStrategy;

impl AnswerStrategy for TextStrategy {
    fn name(&self) -> &'static str {
        "text"
    }

    fn attempt(&self, response: &ModelResponse) -> Option<Letter> {
        response.text().and_then(extract_from_text)
    }
}

/// Ordered list of strategies; the first one to find a letter wins.
pub struct ExtractorChain {
    strategies: Vec<Box<dyn AnswerStrategy>>,
}

impl ExtractorChain {
    pub fn new(strategies: Vec<Box<dyn AnswerStrategy>>) -> Self {
        Self { strategies }
    }

    /// Text-only chain, or logprobs-then-text when logprob scoring is requested.
    pub fn for_scoring(use_logprobs: bool) -> Self {
        let mut strategies: Vec<Box<dyn AnswerStrategy>> = Vec::with_capacity(2);
        if use_logprobs {
            strategies.push(Box::new(LogprobStrategy));
        }
        strategies.push(Box::new(TextStrategy));
        Self::new(strategies)
    }

    /// Append a strategy to the end of the chain.
    pub fn with_strategy(mut self, strategy: Box<dyn AnswerStrategy>) -> Self {
        self.strategies.push(strategy);
        self
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    pub fn extract(&self, response: &ModelResponse) -> Option<Letter> {
        for strategy in &self.strategies {
            if let Some(letter) = strategy.attempt(response) {
                tracing::debug!(strategy = strategy.name(), letter = %letter, "Extracted answer");
                return Some(letter);
            }
        }
        None
    }
}

impl std::fmt::Debug for ExtractorChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractorChain")
            .field("strategies", &self.strategy_names())
            .finish()
    }
}
