use serde::Serialize;
use serde_json::{json, Value};
use std::io::Read;
use std::path::Path;

pub type CmdResult<T> = helperkit::Result<(T, i32)>;

pub mod api;
pub mod array;
pub mod config;
pub mod date;
pub mod error;
pub mod file;
pub mod math;
pub mod string;
pub mod validate;

/// Envelope payload shared by the helper commands: the dotted command name
/// and whatever the helper returned.
#[derive(Debug, Serialize)]
pub struct HelperOutput {
    pub command: String,
    pub result: Value,
}

/// Wrap a helper's return value for the JSON envelope.
pub(crate) fn helper_output(command: &str, result: impl Serialize) -> CmdResult<HelperOutput> {
    let result = serde_json::to_value(result).map_err(|e| {
        helperkit::Error::internal_json(e.to_string(), Some(format!("serialize {}", command)))
    })?;

    Ok((
        HelperOutput {
            command: command.to_string(),
            result,
        },
        0,
    ))
}

/// Parse a string value into appropriate JSON type.
/// Order: JSON literal → bool → number → string
pub(crate) fn parse_value(s: &str) -> Value {
    // Try JSON first (handles arrays, objects, quoted strings)
    if let Ok(v) = serde_json::from_str(s) {
        return v;
    }
    if s == "true" {
        return json!(true);
    }
    if s == "false" {
        return json!(false);
    }
    if let Ok(n) = s.parse::<i64>() {
        return json!(n);
    }
    if let Ok(n) = s.parse::<f64>() {
        return json!(n);
    }
    json!(s)
}

/// Read JSON input from string, file (@path), or stdin (-).
fn read_input_to_string(input: &str) -> helperkit::Result<String> {
    use std::io::IsTerminal;

    if input.trim() == "-" {
        let mut buf = String::new();
        let mut stdin = std::io::stdin();
        if stdin.is_terminal() {
            return Err(helperkit::Error::validation_invalid_argument(
                "input",
                "Cannot read JSON from stdin when stdin is a TTY",
                None,
                None,
            ));
        }
        stdin.read_to_string(&mut buf).map_err(|e| {
            helperkit::Error::internal_io(e.to_string(), Some("read stdin".to_string()))
        })?;
        return Ok(buf);
    }

    if let Some(path) = input.strip_prefix('@') {
        if path.trim().is_empty() {
            return Err(helperkit::Error::validation_invalid_argument(
                "input",
                "Invalid JSON input '@' (missing file path)",
                None,
                None,
            ));
        }
        return std::fs::read_to_string(Path::new(path)).map_err(|e| {
            helperkit::Error::internal_io(e.to_string(), Some(format!("read {}", path)))
        });
    }

    Ok(input.to_string())
}

pub(crate) fn read_json_input(input: &str) -> helperkit::Result<Value> {
    let raw = read_input_to_string(input)?;
    serde_json::from_str(&raw).map_err(|e| {
        helperkit::Error::validation_invalid_json(e, Some("parse JSON input".to_string()))
    })
}

/// Read JSON input that must be an array.
pub(crate) fn read_json_list(input: &str) -> helperkit::Result<Vec<Value>> {
    match read_json_input(input)? {
        Value::Array(items) => Ok(items),
        other => Err(helperkit::Error::validation_invalid_argument(
            "input",
            format!("Expected a JSON array, got {}", json_type(&other)),
            None,
            None,
        )),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $module:ident) => {
        helperkit::output::map_cmd_result_to_json($module::run($args))
    };
}

pub(crate) fn run_json(command: crate::Commands) -> (helperkit::Result<Value>, i32) {
    match command {
        crate::Commands::Str(args) => dispatch!(args, string),
        crate::Commands::Validate(args) => dispatch!(args, validate),
        crate::Commands::Math(args) => dispatch!(args, math),
        crate::Commands::Array(args) => dispatch!(args, array),
        crate::Commands::Date(args) => dispatch!(args, date),
        crate::Commands::File(args) => dispatch!(args, file),
        crate::Commands::Api(args) => dispatch!(args, api),
        crate::Commands::Config(args) => dispatch!(args, config),
        crate::Commands::Error(args) => dispatch!(args, error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_value_prefers_json() {
        assert_eq!(parse_value("[1,2]"), json!([1, 2]));
        assert_eq!(parse_value("true"), json!(true));
        assert_eq!(parse_value("42"), json!(42));
        assert_eq!(parse_value("1.5"), json!(1.5));
        assert_eq!(parse_value("plain text"), json!("plain text"));
    }

    #[test]
    fn json_input_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();

        let items = read_json_list(&format!("@{}", path.display())).unwrap();
        assert_eq!(items.len(), 3);
    }

    #[test]
    fn json_list_rejects_objects() {
        let err = read_json_list(r#"{"a": 1}"#).unwrap_err();
        assert_eq!(err.code, helperkit::ErrorCode::ValidationInvalidArgument);
    }

    #[test]
    fn invalid_json_input() {
        let err = read_json_input("{oops").unwrap_err();
        assert_eq!(err.code, helperkit::ErrorCode::ValidationInvalidJson);
    }
}
