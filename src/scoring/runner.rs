//! Sequential scoring loop shared by both benchmarks.
//!
//! Items are evaluated one at a time in order. The first evaluation error
//! aborts the run; failed calls are never scored as incorrect.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::EndpointError;

/// Attempted and successful item counts for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTally {
    pub attempted: usize,
    pub correct: usize,
}

impl ScoreTally {
    pub fn record(&mut self, passed: bool) {
        self.attempted += 1;
        if passed {
            self.correct += 1;
        }
    }

    /// `100 * correct / attempted`, or `0.0` when nothing was attempted.
    pub fn percentage(&self) -> f64 {
        if self.attempted == 0 {
            return 0.0;
        }
        self.correct as f64 / self.attempted as f64 * 100.0
    }
}

/// Outcome of evaluating one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub passed: bool,
    /// Human-readable detail for the progress line.
    pub detail: String,
}

impl Verdict {
    pub fn pass(detail: impl Into<String>) -> Self {
        Self {
            passed: true,
            detail: detail.into(),
        }
    }

    pub fn fail(detail: impl Into<String>) -> Self {
        Self {
            passed: false,
            detail: detail.into(),
        }
    }

    pub fn mark(&self) -> &'static str {
        if self.passed {
            "✅"
        } else {
            "❌"
        }
    }
}

/// Performs the request and scoring for a single benchmark item.
#[async_trait]
pub trait ItemEvaluator: Send + Sync {
    type Item: Sync;

    /// Label for the progress line of the item at zero-based `position`.
    fn label(&self, position: usize, total: usize) -> String {
        format!("Item {}/{}", position + 1, total)
    }

    /// Progress line printed after the item is scored.
    fn progress_line(&self, label: &str, verdict: &Verdict) -> String {
        format!("{} {}: {}", verdict.mark(), label, verdict.detail)
    }

    async fn evaluate(&self, item: &Self::Item) -> Result<Verdict, EndpointError>;
}

/// Drives an [`ItemEvaluator`] over an item list.
#[derive(Debug, Clone)]
pub struct ScoringLoop {
    limit: usize,
    emit_progress: bool,
}

impl ScoringLoop {
    /// Evaluate at most `limit` items; zero means all of them.
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            emit_progress: true,
        }
    }

    /// Suppress the per-item progress lines on stdout.
    pub fn quiet(mut self) -> Self {
        self.emit_progress = false;
        self
    }

    /// Number of items a run over `available` items will attempt.
    pub fn planned(&self, available: usize) -> usize {
        if self.limit == 0 {
            available
        } else {
            self.limit.min(available)
        }
    }

    /// Evaluate items in order and return the tally.
    ///
    /// # Errors
    ///
    /// Returns the first evaluation error; remaining items are not attempted.
    pub async fn run<E: ItemEvaluator>(
        &self,
        evaluator: &E,
        items: &[E::Item],
    ) -> Result<ScoreTally, EndpointError> {
        let total = self.planned(items.len());
        let mut tally = ScoreTally::default();

        for (position, item) in items.iter().take(total).enumerate() {
            let label = evaluator.label(position, total);
            let verdict = evaluator.evaluate(item).await.inspect_err(|e| {
                tracing::warn!(item = %label, error = %e, "Evaluation failed, aborting run");
            })?;

            tally.record(verdict.passed);
            tracing::debug!(
                item = %label,
                passed = verdict.passed,
                correct = tally.correct,
                attempted = tally.attempted,
                "Scored item"
            );

            if self.emit_progress {
                println!("{}", evaluator.progress_line(&label, &verdict));
            }
        }

        Ok(tally)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Passes items equal to `true`, fails at `fail_at`.
    struct Scripted {
        calls: AtomicUsize,
        fail_at: Option<usize>,
    }

    impl Scripted {
        fn new(fail_at: Option<usize>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_at,
            }
        }
    }

    #[async_trait]
    impl ItemEvaluator for Scripted {
        type Item = bool;

        async fn evaluate(&self, item: &bool) -> Result<Verdict, EndpointError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_at == Some(call) {
                return Err(EndpointError::RequestFailed("connection refused".to_string()));
            }
            Ok(if *item {
                Verdict::pass("Correct")
            } else {
                Verdict::fail("Wrong")
            })
        }
    }

    #[test]
    fn test_percentage_with_no_attempts_is_zero() {
        assert_eq!(ScoreTally::default().percentage(), 0.0);
    }

    #[test]
    fn test_tally_record() {
        let mut tally = ScoreTally::default();
        tally.record(true);
        tally.record(false);
        assert_eq!(tally, ScoreTally { attempted: 2, correct: 1 });
        assert_eq!(tally.percentage(), 50.0);
    }

    #[tokio::test]
    async fn test_three_of_five() {
        let items = [true, false, true, true, false];
        let evaluator = Scripted::new(None);
        let tally = ScoringLoop::new(0).quiet().run(&evaluator, &items).await.unwrap();

        assert_eq!(tally.attempted, 5);
        assert_eq!(tally.correct, 3);
        assert_eq!(format!("{:.2}", tally.percentage()), "60.00");
    }

    #[tokio::test]
    async fn test_empty_items_report_zero() {
        let evaluator = Scripted::new(None);
        let tally = ScoringLoop::new(0).quiet().run(&evaluator, &[]).await.unwrap();
        assert_eq!(tally.attempted, 0);
        assert_eq!(tally.percentage(), 0.0);
    }

    #[tokio::test]
    async fn test_limit_caps_items() {
        let items = [true, true, false, false];
        let evaluator = Scripted::new(None);
        let tally = ScoringLoop::new(2).quiet().run(&evaluator, &items).await.unwrap();

        assert_eq!(tally, ScoreTally { attempted: 2, correct: 2 });
        assert_eq!(evaluator.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_planned_counts() {
        let loop_ = ScoringLoop::new(10);
        assert_eq!(loop_.planned(3), 3);
        assert_eq!(ScoringLoop::new(0).planned(3), 3);
    }

    #[tokio::test]
    async fn test_error_aborts_run() {
        let items = [true, true, true, true];
        let evaluator = Scripted::new(Some(1));
        let err = ScoringLoop::new(0)
            .quiet()
            .run(&evaluator, &items)
            .await
            .unwrap_err();

        assert!(err.is_transport());
        assert_eq!(evaluator.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_default_label() {
        let evaluator = Scripted::new(None);
        assert_eq!(evaluator.label(0, 4), "Item 1/4");
        assert_eq!(
            evaluator.progress_line("Item 1/4", &Verdict::pass("Correct")),
            "✅ Item 1/4: Correct"
        );
        assert_eq!(
            evaluator.progress_line("Item 2/4", &Verdict::fail("Wrong")),
            "❌ Item 2/4: Wrong"
        );
    }
}
