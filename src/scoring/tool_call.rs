//! Tool-call correctness checks.

use serde_json::Value;

use crate::endpoint::ModelResponse;

/// Check that the first tool call names `expected_tool` and carries every
/// required argument.
///
/// Only the first invocation is inspected. Argument values are not checked,
/// only key presence. An empty call list fails validation, and so does an
/// argument payload that is not a string holding a JSON object.
pub fn validate<S: AsRef<str>>(
    response: &ModelResponse,
    expected_tool: &str,
    required_args: &[S],
) -> bool {
    let Some(call) = response.tool_calls().first() else {
        return false;
    };

    let Value::String(encoded) = &call.arguments else {
        tracing::debug!(
            tool = %call.name,
            kind = json_kind(&call.arguments),
            "Tool arguments are not a JSON-encoded string"
        );
        return false;
    };

    let args = match serde_json::from_str::<Value>(encoded) {
        Ok(Value::Object(args)) => args,
        Ok(other) => {
            tracing::debug!(
                tool = %call.name,
                kind = json_kind(&other),
                "Tool arguments are not an object"
            );
            return false;
        }
        Err(e) => {
            tracing::debug!(tool = %call.name, error = %e, "Tool arguments are not valid JSON");
            return false;
        }
    };

    if call.name != expected_tool {
        return false;
    }

    required_args
        .iter()
        .all(|name| args.contains_key(name.as_ref()))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::ToolInvocation;
    use serde_json::json;

    fn calls(calls: &[(&str, &str)]) -> ModelResponse {
        ModelResponse::ToolCalls(
            calls
                .iter()
                .map(|(name, args)| ToolInvocation::new(*name, *args))
                .collect(),
        )
    }

    #[test]
    fn test_matching_call_passes() {
        let response = calls(&[("get_weather", r#"{"location":"Tokyo"}"#)]);
        assert!(validate(&response, "get_weather", &["location"]));
    }

    #[test]
    fn test_missing_required_arg_fails() {
        let response = calls(&[("get_weather", r#"{"location":"Tokyo"}"#)]);
        assert!(!validate(&response, "get_weather", &["location", "unit"]));
    }

    #[test]
    fn test_wrong_tool_name_fails() {
        let response = calls(&[("send_email", r#"{"location":"Tokyo"}"#)]);
        assert!(!validate(&response, "get_weather", &["location"]));
    }

    #[test]
    fn test_empty_call_list_fails() {
        assert!(!validate(&calls(&[]), "get_weather", &["location"]));
        assert!(!validate(&ModelResponse::Text("sunny".into()), "get_weather", &["location"]));
    }

    #[test]
    fn test_malformed_arguments_fail_without_panicking() {
        let response = calls(&[("get_weather", r#"{"location": "Tokyo""#)]);
        assert!(!validate(&response, "get_weather", &["location"]));

        let response = calls(&[("get_weather", r#"["location"]"#)]);
        assert!(!validate(&response, "get_weather", &["location"]));
    }

    #[test]
    fn test_unencoded_arguments_fail() {
        for arguments in [json!({"location": "Tokyo"}), json!(42), json!(["location"])] {
            let response = ModelResponse::ToolCalls(vec![ToolInvocation {
                name: "get_weather".to_string(),
                arguments,
            }]);
            assert!(!validate(&response, "get_weather", &["location"]));
        }
    }

    #[test]
    fn test_only_first_call_is_considered() {
        let response = calls(&[
            ("search_docs", r#"{"query":"keys"}"#),
            ("get_weather", r#"{"location":"Tokyo"}"#),
        ]);
        assert!(!validate(&response, "get_weather", &["location"]));
    }

    #[test]
    fn test_values_are_not_checked() {
        let response = calls(&[("get_weather", r#"{"location":null}"#)]);
        assert!(validate(&response, "get_weather", &["location"]));
    }

    #[test]
    fn test_no_required_args_only_checks_name() {
        let response = calls(&[("get_weather", "{}")]);
        let none: [&str; 0] = [];
        assert!(validate(&response, "get_weather", &none));
    }
}
