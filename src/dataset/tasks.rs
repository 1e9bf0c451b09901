//! Tool schemas and tool-call tasks.
//!
//! The tool table is shared by every tool request in a run. Tasks come either
//! from the built-in list or from a JSONL file with one
//! `{"prompt", "expected_tool", "required_args"}` object per line.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::OnceLock;

use crate::error::DatasetError;

/// A function the model may call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    /// JSON-Schema object describing the arguments.
    pub parameters: Value,
}

impl ToolSpec {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }

    /// Names listed under `parameters.required`.
    #[cfg(test)]
    fn required_params(&self) -> Vec<&str> {
        self.parameters
            .get("required")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// True if `name` is a declared property.
    #[cfg(test)]
    fn declares(&self, name: &str) -> bool {
        self.parameters
            .get("properties")
            .and_then(Value::as_object)
            .is_some_and(|props| props.contains_key(name))
    }
}

/// A prompt and the tool call it should produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolTask {
    pub prompt: String,
    pub expected_tool: String,
    #[serde(default)]
    pub required_args: Vec<String>,
}

impl ToolTask {
    pub fn new(
        prompt: impl Into<String>,
        expected_tool: impl Into<String>,
        required_args: &[&str],
    ) -> Self {
        Self {
            prompt: prompt.into(),
            expected_tool: expected_tool.into(),
            required_args: required_args.iter().map(|s| s.to_string()).collect(),
        }
    }
}

static TOOL_SPECS: OnceLock<Vec<ToolSpec>> = OnceLock::new();

/// The tool table offered on every tool request.
pub fn tool_specs() -> &'static [ToolSpec] {
    TOOL_SPECS.get_or_init(|| {
        vec![
            ToolSpec::new(
                "get_weather",
                "Get current weather",
                json!({
                    "type": "object",
                    "properties": {
                        "location": {"type": "string"},
                        "unit": {"type": "string", "enum": ["celsius", "fahrenheit"]},
                    },
                    "required": ["location"],
                }),
            ),
            ToolSpec::new(
                "send_email",
                "Send an email to a user",
                json!({
                    "type": "object",
                    "properties": {
                        "recipient": {"type": "string"},
                        "body": {"type": "string"},
                    },
                    "required": ["recipient", "body"],
                }),
            ),
            ToolSpec::new(
                "search_docs",
                "Search internal documentation",
                json!({
                    "type": "object",
                    "properties": {"query": {"type": "string"}},
                    "required": ["query"],
                }),
            ),
            ToolSpec::new(
                "book_flight",
                "Book a flight for a traveler",
                json!({
                    "type": "object",
                    "properties": {
                        "origin": {"type": "string"},
                        "destination": {"type": "string"},
                        "date": {"type": "string"},
                    },
                    "required": ["origin", "destination", "date"],
                }),
            ),
            ToolSpec::new(
                "schedule_meeting",
                "Schedule a meeting with participants",
                json!({
                    "type": "object",
                    "properties": {
                        "participants": {"type": "array", "items": {"type": "string"}},
                        "time": {"type": "string"},
                    },
                    "required": ["participants", "time"],
                }),
            ),
            ToolSpec::new(
                "get_stock_price",
                "Get the latest stock price",
                json!({
                    "type": "object",
                    "properties": {"symbol": {"type": "string"}},
                    "required": ["symbol"],
                }),
            ),
            ToolSpec::new(
                "translate_text",
                "Translate text into a target language",
                json!({
                    "type": "object",
                    "properties": {
                        "text": {"type": "string"},
                        "target_language": {"type": "string"},
                    },
                    "required": ["text", "target_language"],
                }),
            ),
        ]
    })
}

/// Look up a tool by name in the shared table.
#[cfg(test)]
fn find_tool(name: &str) -> Option<&'static ToolSpec> {
    tool_specs().iter().find(|spec| spec.name == name)
}

const WEATHER_CITIES: &[&str] = &[
    "Tokyo", "New York", "Paris", "London", "Berlin", "Sydney", "Toronto", "San Francisco",
    "Mumbai", "Singapore", "Seoul", "Mexico City", "Cairo", "Rome", "Madrid", "Buenos Aires",
    "Johannesburg", "Chicago", "Los Angeles", "Dubai", "Istanbul", "Bangkok", "Moscow",
    "Sao Paulo", "Lagos",
];

const EMAIL_PROMPTS: &[&str] = &[
    "Send an email to boss@company.com saying the quarterly report is done.",
    "Email alice@example.com to confirm the 3pm meeting.",
    "Email bob@example.com that the deployment succeeded.",
    "Send an email to hr@company.com requesting vacation from July 1-5.",
    "Email team@company.com with the summary: 'Sprint demo at 4pm'.",
    "Email support@example.com about a password reset issue.",
    "Send an email to sales@example.com asking for the updated pricing sheet.",
    "Email ceo@company.com to reschedule today's 2pm meeting to 5pm.",
    "Email finance@example.com to approve the invoice #1234.",
    "Send an email to ops@example.com that the server maintenance is complete.",
    "Email legal@example.com to review the new NDA template.",
    "Email hiring@example.com to proceed with the candidate offer.",
    "Email marketing@example.com to publish the blog post tomorrow.",
    "Email devrel@example.com asking for API rate limit increase.",
    "Email logistics@example.com to confirm the shipment tracking number.",
    "Email qa@example.com to rerun the regression suite on build 1.2.3.",
    "Email design@example.com for the updated logo assets.",
    "Email security@example.com to report a phishing attempt.",
    "Email billing@example.com to update the payment method.",
    "Email training@example.com to enroll in the new compliance course.",
    "Email it@example.com to request a new laptop.",
    "Email procurement@example.com to reorder office supplies.",
    "Email partners@example.com to confirm the partnership meeting next week.",
    "Email events@example.com to RSVP for the company offsite.",
    "Email hr@example.com to request an employment verification letter.",
    "Email payroll@example.com about a missing reimbursement.",
    "Email admin@example.com to book a conference room for tomorrow.",
    "Email onboarding@example.com to set up a new hire's accounts.",
    "Email travel@example.com to change the flight to Monday.",
];

/// Remaining built-in tasks as (prompt, tool, required args).
const OTHER_TASKS: &[(&str, &str, &[&str])] = &[
    ("Search the docs for guidance on rotating API keys.", "search_docs", &["query"]),
    ("Find documentation about our S3 backup policy.", "search_docs", &["query"]),
    (
        "Book a flight from SFO to JFK on March 14 for the CTO.",
        "book_flight",
        &["origin", "destination", "date"],
    ),
    (
        "Book a flight from Toronto to London on May 2 for Sara.",
        "book_flight",
        &["origin", "destination", "date"],
    ),
    (
        "Schedule a meeting with alice@example.com and bob@example.com tomorrow at 3pm.",
        "schedule_meeting",
        &["participants", "time"],
    ),
    (
        "Set up a meeting with product@company.com next Monday at 10am.",
        "schedule_meeting",
        &["participants", "time"],
    ),
    ("What's the latest price for AAPL?", "get_stock_price", &["symbol"]),
    ("Get me the current stock price for MSFT.", "get_stock_price", &["symbol"]),
    (
        "Translate 'Hello, how are you?' into Spanish.",
        "translate_text",
        &["text", "target_language"],
    ),
    (
        "Translate 'Quarterly revenue beat expectations' to French.",
        "translate_text",
        &["text", "target_language"],
    ),
];

/// Built-in task list, in run order.
pub fn default_tasks() -> Vec<ToolTask> {
    let weather = WEATHER_CITIES.iter().map(|city| {
        ToolTask::new(
            format!("What is the weather in {}? Return in celsius.", city),
            "get_weather",
            &["location"],
        )
    });
    let email = EMAIL_PROMPTS
        .iter()
        .map(|prompt| ToolTask::new(*prompt, "send_email", &["recipient", "body"]));

    let others = OTHER_TASKS
        .iter()
        .map(|(prompt, tool, args)| ToolTask::new(*prompt, *tool, args));

    weather.chain(email).chain(others).collect()
}

/// Parse JSONL task lines. Blank lines are skipped.
pub fn parse_tasks<R: BufRead>(reader: R) -> Result<Vec<ToolTask>, DatasetError> {
    let mut tasks = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let task: ToolTask =
            serde_json::from_str(&line).map_err(|e| DatasetError::InvalidTaskLine {
                line: index + 1,
                reason: e.to_string(),
            })?;
        tasks.push(task);
    }
    Ok(tasks)
}

/// Load tasks from a JSONL file, or the built-in list when no path is given.
pub fn load_tasks(path: Option<&Path>) -> Result<Vec<ToolTask>, DatasetError> {
    let Some(path) = path else {
        return Ok(default_tasks());
    };
    let file = File::open(path)?;
    let tasks = parse_tasks(BufReader::new(file))?;
    tracing::info!(path = %path.display(), count = tasks.len(), "Loaded tasks");
    Ok(tasks)
}
