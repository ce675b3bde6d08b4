use super::{codes, ErrorCode, Hint};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorHelpSummary {
    pub code: String,
    pub summary: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorHelp {
    pub code: String,
    pub summary: String,
    pub details_schema: serde_json::Value,
    pub hints: Vec<Hint>,
}

pub fn list() -> Vec<ErrorHelpSummary> {
    codes::all_codes()
        .iter()
        .copied()
        .map(|code| {
            let help = explain(code);
            ErrorHelpSummary {
                code: help.code,
                summary: help.summary,
            }
        })
        .collect()
}

fn help(
    code: ErrorCode,
    summary: &str,
    details_schema: serde_json::Value,
    hint: &str,
) -> ErrorHelp {
    ErrorHelp {
        code: code.as_str().to_string(),
        summary: summary.to_string(),
        details_schema,
        hints: vec![Hint {
            message: hint.to_string(),
        }],
    }
}

pub fn explain(code: ErrorCode) -> ErrorHelp {
    match code {
        ErrorCode::ConfigInvalidJson => help(
            code,
            "Configuration JSON is invalid",
            serde_json::json!({"path":"string","error":"string"}),
            "Fix JSON syntax in helperkit.json or run `helperkit config reset`",
        ),
        ErrorCode::ConfigInvalidValue => help(
            code,
            "Configuration value is invalid",
            serde_json::json!({"key":"string","value":"string?","problem":"string"}),
            "Correct the config value to match expected type/format",
        ),
        ErrorCode::ValidationMissingArgument => help(
            code,
            "Missing required CLI argument",
            serde_json::json!({"args":"string[]"}),
            "Rerun the command with the required argument(s)",
        ),
        ErrorCode::ValidationInvalidArgument => help(
            code,
            "Invalid argument",
            serde_json::json!({"field":"string","problem":"string","id":"string?","tried":"string[]?"}),
            "Verify the argument value and try again",
        ),
        ErrorCode::ValidationInvalidJson => help(
            code,
            "Invalid JSON input",
            serde_json::json!({"error":"string","context":"string?"}),
            "Validate the JSON you passed to the command",
        ),
        ErrorCode::ValidationUnknownErrorCode => help(
            code,
            "Unknown error code",
            serde_json::json!({"code":"string"}),
            "Run `helperkit error list` to list available codes",
        ),
        ErrorCode::ArithmeticDivisionByZero => help(
            code,
            "Divisor is zero after coercion",
            serde_json::json!({"dividend":"string","divisor":"string"}),
            "Pass a non-zero divisor",
        ),
        ErrorCode::ArithmeticUnknownOperator => help(
            code,
            "Operator is not one of the supported operations",
            serde_json::json!({"operator":"string","allowed":"string[]"}),
            "Use one of: sum, subtract, multiply, divide",
        ),
        ErrorCode::HttpRequestFailed => help(
            code,
            "HTTP request could not be completed",
            serde_json::json!({"method":"string","url":"string","error":"string"}),
            "Check the URL, network connectivity and timeout",
        ),
        ErrorCode::HttpStatusError => help(
            code,
            "Server answered with a 4xx/5xx status",
            serde_json::json!({"method":"string","url":"string","status":"number","body":"string"}),
            "Inspect error.details.body for the server's explanation",
        ),
        ErrorCode::InternalIoError => help(
            code,
            "I/O error",
            serde_json::json!({"error":"string","context":"string?"}),
            "Check file permissions and paths",
        ),
        ErrorCode::InternalJsonError => help(
            code,
            "JSON serialization error",
            serde_json::json!({"error":"string","context":"string?"}),
            "Retry; if it persists, report a bug",
        ),
        ErrorCode::InternalUnexpected => help(
            code,
            "Unexpected internal error",
            serde_json::json!({"error":"string"}),
            "Retry; if it persists, report a bug",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_covers_all_codes() {
        assert_eq!(list().len(), codes::all_codes().len());
    }

    #[test]
    fn explain_uses_dotted_code() {
        let help = explain(ErrorCode::ArithmeticDivisionByZero);
        assert_eq!(help.code, "arithmetic.division_by_zero");
        assert_eq!(help.hints.len(), 1);
    }
}
