//! Wire types for the OpenAI-compatible chat-completions API.
//!
//! Requests are built from [`ChatRequest`]; responses deserialize into
//! [`ChatCompletion`] and are narrowed to a [`ModelResponse`] for the scoring
//! path that asked for them.

use serde::{Deserialize, Serialize};

use crate::dataset::ToolSpec;
use crate::error::EndpointError;

/// Number of alternative tokens requested per position when scoring by logprobs.
pub const TOP_LOGPROBS: u8 = 4;

/// A message in a conversation with the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message sender (e.g., "system", "user").
    pub role: String,
    /// Content of the message.
    pub content: String,
}

impl Message {
    /// Create a new system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Logprob options sent with a request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LogprobOptions {
    pub top_logprobs: u8,
}

/// A tool offered to the model, in the `{"type":"function","function":{...}}` envelope.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub function: ToolSpec,
}

impl From<&ToolSpec> for ToolDefinition {
    fn from(spec: &ToolSpec) -> Self {
        Self {
            kind: "function",
            function: spec.clone(),
        }
    }
}

/// Request body for `POST <base>/chat/completions`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolDefinition>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logprobs: Option<LogprobOptions>,
}

impl ChatRequest {
    /// Build a system + user request.
    pub fn new(
        model: impl Into<String>,
        system: impl Into<String>,
        prompt: impl Into<String>,
        temperature: f64,
    ) -> Self {
        Self {
            model: model.into(),
            messages: vec![Message::system(system), Message::user(prompt)],
            temperature,
            tools: None,
            logprobs: None,
        }
    }

    /// Offer the given tools to the model.
    pub fn with_tools<'a>(mut self, tools: impl IntoIterator<Item = &'a ToolSpec>) -> Self {
        self.tools = Some(tools.into_iter().map(ToolDefinition::from).collect());
        self
    }

    /// Ask for per-token logprobs with the top alternatives.
    pub fn with_logprobs(mut self) -> Self {
        self.logprobs = Some(LogprobOptions {
            top_logprobs: TOP_LOGPROBS,
        });
        self
    }
}

/// Top-level response body. `choices` is required.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletion {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatChoice {
    #[serde(default)]
    pub message: Option<ResponseMessage>,
    #[serde(default)]
    pub logprobs: Option<ChoiceLogprobs>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub tool_calls: Option<Vec<ResponseToolCall>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseToolCall {
    #[serde(default)]
    pub function: Option<ResponseFunction>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseFunction {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub arguments: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChoiceLogprobs {
    #[serde(default)]
    pub content: Option<Vec<TokenLogprob>>,
}

/// Logprob annotation for one generated position.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TokenLogprob {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub logprob: Option<f64>,
    #[serde(default)]
    pub top_logprobs: Option<Vec<AlternativeLogprob>>,
}

/// One ranked alternative at a position.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AlternativeLogprob {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub logprob: Option<f64>,
}

impl TokenLogprob {
    pub fn new(token: &str, logprob: f64, alternatives: &[(&str, f64)]) -> Self {
        Self {
            token: Some(token.to_string()),
            logprob: Some(logprob),
            top_logprobs: Some(
                alternatives
                    .iter()
                    .map(|(token, logprob)| AlternativeLogprob {
                        token: Some(token.to_string()),
                        logprob: Some(*logprob),
                    })
                    .collect(),
            ),
        }
    }

    /// Primary entry followed by its alternatives, in response order.
    pub fn entries(&self) -> impl Iterator<Item = (Option<&str>, Option<f64>)> + '_ {
        std::iter::once((self.token.as_deref(), self.logprob)).chain(
            self.top_logprobs
                .iter()
                .flatten()
                .map(|alt| (alt.token.as_deref(), alt.logprob)),
        )
    }
}

/// A structured function call made by the model.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolInvocation {
    pub name: String,
    /// The `arguments` field as sent. Well-formed calls carry a JSON-encoded
    /// object in a string; any other value is kept so validation can reject it.
    pub arguments: serde_json::Value,
}

impl ToolInvocation {
    pub fn new(name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: serde_json::Value::String(arguments.into()),
        }
    }
}

/// The part of a completion a scoring path looks at.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelResponse {
    /// Free-text completion.
    Text(String),
    /// Free-text completion with per-position logprobs.
    TextWithLogprobs {
        text: String,
        logprobs: Vec<TokenLogprob>,
    },
    /// Structured tool calls, in the order the model emitted them.
    ToolCalls(Vec<ToolInvocation>),
}

impl ModelResponse {
    /// Completion text, if this is a text response.
    pub fn text(&self) -> Option<&str> {
        match self {
            ModelResponse::Text(text) | ModelResponse::TextWithLogprobs { text, .. } => Some(text),
            ModelResponse::ToolCalls(_) => None,
        }
    }

    pub fn logprobs(&self) -> Option<&[TokenLogprob]> {
        match self {
            ModelResponse::TextWithLogprobs { logprobs, .. } => Some(logprobs),
            _ => None,
        }
    }

    /// Tool invocations; empty for text responses.
    pub fn tool_calls(&self) -> &[ToolInvocation] {
        match self {
            ModelResponse::ToolCalls(calls) => calls,
            _ => &[],
        }
    }
}

impl ChatCompletion {
    /// Parse a response body, rejecting anything that is not an object with `choices`.
    pub fn from_value(value: serde_json::Value) -> Result<Self, EndpointError> {
        if !value.as_object().is_some_and(|obj| obj.contains_key("choices")) {
            return Err(EndpointError::UnexpectedShape(value.to_string()));
        }
        serde_json::from_value(value).map_err(|e| EndpointError::UnexpectedShape(e.to_string()))
    }

    /// Narrow to the text of the first choice, keeping logprobs when requested.
    ///
    /// # Errors
    ///
    /// Returns `EndpointError::UnexpectedShape` if there is no first choice, or
    /// if it carries no message content and no logprobs to score from. With
    /// `keep_logprobs`, null content alongside logprobs reads as empty text.
    pub fn into_text_response(self, keep_logprobs: bool) -> Result<ModelResponse, EndpointError> {
        let choice = self.choices.into_iter().next().ok_or_else(|| {
            EndpointError::UnexpectedShape("response has no choices".to_string())
        })?;

        let content = choice.message.and_then(|m| m.content);
        match (content, choice.logprobs) {
            (text, Some(logprobs)) if keep_logprobs => Ok(ModelResponse::TextWithLogprobs {
                text: text.unwrap_or_default(),
                logprobs: logprobs.content.unwrap_or_default(),
            }),
            (Some(text), _) => Ok(ModelResponse::Text(text)),
            (None, _) => Err(EndpointError::UnexpectedShape(
                "first choice has no message content".to_string(),
            )),
        }
    }

    /// Narrow to the tool calls of the first choice.
    ///
    /// Missing choices, messages or call lists all yield an empty call list. A
    /// call with absent, null or empty arguments is given `"{}"`.
    pub fn into_tool_response(self) -> ModelResponse {
        let calls = self
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.tool_calls)
            .unwrap_or_default()
            .into_iter()
            .map(|call| {
                let function = call.function.unwrap_or(ResponseFunction {
                    name: None,
                    arguments: None,
                });
                let arguments = match function.arguments {
                    None | Some(serde_json::Value::Null) => serde_json::Value::from("{}"),
                    Some(serde_json::Value::String(args)) if args.is_empty() => {
                        serde_json::Value::from("{}")
                    }
                    Some(args) => args,
                };
                ToolInvocation {
                    name: function.name.unwrap_or_default(),
                    arguments,
                }
            })
            .collect();
        ModelResponse::ToolCalls(calls)
    }
}
