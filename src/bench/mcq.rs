//! Multiple-choice accuracy benchmark.

use async_trait::async_trait;
use std::sync::Arc;

use crate::dataset::QuestionItem;
use crate::endpoint::{ChatEndpoint, ChatRequest};
use crate::error::EndpointError;
use crate::scoring::{render_few_shot, ExtractorChain, ItemEvaluator, Verdict};

/// System message sent with every question.
pub const MCQ_SYSTEM_PROMPT: &str = "Answer with a single letter (A, B, C, or D).";

/// Settings for one multiple-choice run.
#[derive(Debug, Clone)]
pub struct McqSettings {
    pub model: String,
    pub temperature: f64,
    /// Number of dev-split exemplars to prepend.
    pub shots: usize,
    /// Request logprobs and score by them before falling back to text.
    pub use_logprobs: bool,
}

/// Asks each question and compares the extracted letter with the answer.
pub struct McqEvaluator {
    endpoint: Arc<dyn ChatEndpoint>,
    settings: McqSettings,
    exemplars: Vec<QuestionItem>,
    extractor: ExtractorChain,
}

impl McqEvaluator {
    pub fn new(
        endpoint: Arc<dyn ChatEndpoint>,
        settings: McqSettings,
        exemplars: Vec<QuestionItem>,
    ) -> Self {
        let extractor = ExtractorChain::for_scoring(settings.use_logprobs);
        Self {
            endpoint,
            settings,
            exemplars,
            extractor,
        }
    }

    pub fn prompt_for(&self, item: &QuestionItem) -> String {
        render_few_shot(&self.exemplars, item, self.settings.shots)
    }

    fn request_for(&self, item: &QuestionItem) -> ChatRequest {
        let request = ChatRequest::new(
            self.settings.model.clone(),
            MCQ_SYSTEM_PROMPT,
            self.prompt_for(item),
            self.settings.temperature,
        );
        if self.settings.use_logprobs {
            request.with_logprobs()
        } else {
            request
        }
    }
}

#[async_trait]
impl ItemEvaluator for McqEvaluator {
    type Item = QuestionItem;

    fn label(&self, position: usize, _total: usize) -> String {
        format!("Q{}", position + 1)
    }

    async fn evaluate(&self, item: &QuestionItem) -> Result<Verdict, EndpointError> {
        let completion = self.endpoint.complete(&self.request_for(item)).await?;
        let response = completion.into_text_response(self.settings.use_logprobs)?;

        let expected = item.correct_letter();
        let predicted = self.extractor.extract(&response);

        if predicted == Some(expected) {
            return Ok(Verdict::pass("Correct"));
        }

        let got = predicted.map_or_else(|| "none".to_string(), |letter| letter.to_string());
        Ok(Verdict::fail(format!(
            "Wanted {}, got {} (Raw: {})",
            expected,
            got,
            response.text().unwrap_or_default()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::ChatCompletion;
    use serde_json::json;
    use std::sync::Mutex;

    /// Replies with canned bodies and records every request.
    struct Recorder {
        replies: Mutex<Vec<serde_json::Value>>,
        requests: Mutex<Vec<serde_json::Value>>,
    }

    impl Recorder {
        fn new(replies: Vec<serde_json::Value>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.into_iter().rev().collect()),
                requests: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl ChatEndpoint for Recorder {
        async fn complete(&self, request: &ChatRequest) -> Result<ChatCompletion, EndpointError> {
            self.requests
                .lock()
                .unwrap()
                .push(serde_json::to_value(request).unwrap());
            let reply = self.replies.lock().unwrap().pop().expect("scripted reply");
            ChatCompletion::from_value(reply)
        }
    }

    fn item(question: &str, answer: usize) -> QuestionItem {
        QuestionItem::new(
            question,
            ["w".into(), "x".into(), "y".into(), "z".into()],
            answer,
        )
        .unwrap()
    }

    fn settings(shots: usize, use_logprobs: bool) -> McqSettings {
        McqSettings {
            model: "test-model".to_string(),
            temperature: 0.0,
            shots,
            use_logprobs,
        }
    }

    fn text_reply(content: &str) -> serde_json::Value {
        json!({"choices": [{"message": {"role": "assistant", "content": content}}]})
    }

    #[tokio::test]
    async fn test_correct_text_answer() {
        let endpoint = Recorder::new(vec![text_reply("The answer is C.")]);
        let evaluator = McqEvaluator::new(endpoint.clone(), settings(0, false), vec![]);

        let verdict = evaluator.evaluate(&item("q", 2)).await.unwrap();
        assert_eq!(verdict, Verdict::pass("Correct"));

        let requests = endpoint.requests.lock().unwrap();
        assert_eq!(requests[0]["model"], "test-model");
        assert_eq!(requests[0]["messages"][0]["content"], MCQ_SYSTEM_PROMPT);
        assert!(requests[0].get("logprobs").is_none());
    }

    #[tokio::test]
    async fn test_miss_reports_raw_text() {
        let endpoint = Recorder::new(vec![text_reply("ABSTAIN")]);
        let evaluator = McqEvaluator::new(endpoint, settings(0, false), vec![]);

        let verdict = evaluator.evaluate(&item("q", 1)).await.unwrap();
        assert!(!verdict.passed);
        assert_eq!(verdict.detail, "Wanted B, got none (Raw: ABSTAIN)");
    }

    #[tokio::test]
    async fn test_logprobs_requested_and_used() {
        let reply = json!({"choices": [{
            "message": {"content": "A"},
            "logprobs": {"content": [{"token": "A", "logprob": -1.4, "top_logprobs": [
                {"token": "D", "logprob": -0.2}, {"token": "A", "logprob": -1.4}
            ]}]}
        }]});
        let endpoint = Recorder::new(vec![reply]);
        let evaluator = McqEvaluator::new(endpoint.clone(), settings(0, true), vec![]);

        let verdict = evaluator.evaluate(&item("q", 3)).await.unwrap();
        assert!(verdict.passed);
        assert_eq!(
            endpoint.requests.lock().unwrap()[0]["logprobs"],
            json!({"top_logprobs": 4})
        );
    }

    #[tokio::test]
    async fn test_few_shot_prompt_sent() {
        let endpoint = Recorder::new(vec![text_reply("A")]);
        let exemplars = vec![item("dev one", 1), item("dev two", 2)];
        let evaluator = McqEvaluator::new(endpoint.clone(), settings(1, false), exemplars);

        evaluator.evaluate(&item("target", 0)).await.unwrap();
        let requests = endpoint.requests.lock().unwrap();
        let prompt = requests[0]["messages"][1]["content"].as_str().unwrap();
        assert!(prompt.starts_with("Question: dev one\n"));
        assert!(prompt.contains("Answer:\nB\n\nQuestion: target\n"));
        assert!(!prompt.contains("dev two"));
    }

    #[tokio::test]
    async fn test_missing_content_is_fatal() {
        let endpoint = Recorder::new(vec![json!({"choices": [{"message": {"content": null}}]})]);
        let evaluator = McqEvaluator::new(endpoint, settings(0, false), vec![]);

        let err = evaluator.evaluate(&item("q", 0)).await.unwrap_err();
        assert!(matches!(err, EndpointError::UnexpectedShape(_)));
    }

    #[test]
    fn test_label() {
        let endpoint = Recorder::new(vec![]);
        let evaluator = McqEvaluator::new(endpoint, settings(0, false), vec![]);
        assert_eq!(evaluator.label(2, 5), "Q3");
    }
}
