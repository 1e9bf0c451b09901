//! Tool-call correctness benchmark.

use async_trait::async_trait;
use std::sync::Arc;

use crate::dataset::{ToolSpec, ToolTask};
use crate::endpoint::{ChatEndpoint, ChatRequest};
use crate::error::EndpointError;
use crate::scoring::{validate, ItemEvaluator, Verdict};

/// System message sent with every tool task.
pub const TOOL_SYSTEM_PROMPT: &str =
    "You are a function calling assistant. Call the right tool with JSON arguments.";

/// Characters of the task prompt shown on a progress line.
const PROMPT_PREVIEW_CHARS: usize = 60;

/// Settings for one tool-call run.
#[derive(Debug, Clone)]
pub struct ToolSettings {
    pub model: String,
    pub temperature: f64,
}

/// Sends each task with the full tool table and validates the first call.
pub struct ToolCallEvaluator {
    endpoint: Arc<dyn ChatEndpoint>,
    settings: ToolSettings,
    tools: &'static [ToolSpec],
}

impl ToolCallEvaluator {
    pub fn new(
        endpoint: Arc<dyn ChatEndpoint>,
        settings: ToolSettings,
        tools: &'static [ToolSpec],
    ) -> Self {
        Self {
            endpoint,
            settings,
            tools,
        }
    }
}

fn preview(prompt: &str) -> String {
    let head: String = prompt.chars().take(PROMPT_PREVIEW_CHARS).collect();
    format!("{}...", head)
}

#[async_trait]
impl ItemEvaluator for ToolCallEvaluator {
    type Item = ToolTask;

    fn label(&self, position: usize, total: usize) -> String {
        format!("Task {}/{}", position + 1, total)
    }

    fn progress_line(&self, label: &str, verdict: &Verdict) -> String {
        format!("{}: {} ({})", label, verdict.mark(), verdict.detail)
    }

    async fn evaluate(&self, task: &ToolTask) -> Result<Verdict, EndpointError> {
        let request = ChatRequest::new(
            self.settings.model.clone(),
            TOOL_SYSTEM_PROMPT,
            task.prompt.clone(),
            self.settings.temperature,
        )
        .with_tools(self.tools);

        let response = self.endpoint.complete(&request).await?.into_tool_response();
        let passed = validate(&response, &task.expected_tool, &task.required_args);
        if !passed {
            tracing::debug!(
                expected = %task.expected_tool,
                calls = ?response.tool_calls(),
                "Tool call did not match"
            );
        }

        Ok(Verdict {
            passed,
            detail: preview(&task.prompt),
        })
    }
}
