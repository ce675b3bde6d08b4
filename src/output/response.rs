//! JSON envelope written to stdout and the exit code that goes with it.

use std::io::{self, Write};

use serde::Serialize;
use serde_json::Value;

use crate::error::Hint;
use crate::{Error, ErrorCode, Result};

/// `{ success, data }` on success, `{ success, error }` on failure.
#[derive(Debug, Serialize)]
pub struct CliResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CliError>,
}

#[derive(Debug, Serialize)]
pub struct CliError {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hints: Vec<Hint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retryable: Option<bool>,
}

impl From<&Error> for CliError {
    fn from(err: &Error) -> Self {
        Self {
            code: err.code.as_str(),
            message: err.message.clone(),
            details: err.details.clone(),
            hints: err.hints.clone(),
            retryable: err.retryable,
        }
    }
}

impl<T: Serialize> CliResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn from_error(err: &Error) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(err.into()),
        }
    }

    pub fn from_result(result: std::result::Result<T, Error>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(err) => Self::from_error(&err),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            Error::internal_json(e.to_string(), Some("serialize response".to_string()))
        })
    }
}

/// Print the envelope for a command result. A closed stdout pipe is not an
/// error.
pub fn print_json_result(result: Result<Value>) -> Result<()> {
    let payload = CliResponse::from_result(result).to_json()?;

    match writeln!(io::stdout().lock(), "{}", payload) {
        Err(e) if e.kind() != io::ErrorKind::BrokenPipe => Err(Error::internal_io(
            e.to_string(),
            Some("write stdout".to_string()),
        )),
        _ => Ok(()),
    }
}

/// Serialize a command's output and pick its exit code.
pub fn map_cmd_result_to_json<T: Serialize>(result: Result<(T, i32)>) -> (Result<Value>, i32) {
    let (data, exit_code) = match result {
        Ok(ok) => ok,
        Err(err) => {
            let exit_code = exit_code_for_error(err.code);
            return (Err(err), exit_code);
        }
    };

    match serde_json::to_value(data) {
        Ok(value) => (Ok(value), exit_code),
        Err(e) => {
            let err = Error::internal_json(e.to_string(), Some("serialize output".to_string()));
            let exit_code = exit_code_for_error(err.code);
            (Err(err), exit_code)
        }
    }
}

/// 2 for bad input, config and arithmetic failures, 20 for HTTP failures,
/// 1 for internal errors.
pub fn exit_code_for_error(code: ErrorCode) -> i32 {
    match code {
        ErrorCode::ConfigInvalidJson
        | ErrorCode::ConfigInvalidValue
        | ErrorCode::ValidationMissingArgument
        | ErrorCode::ValidationInvalidArgument
        | ErrorCode::ValidationInvalidJson
        | ErrorCode::ValidationUnknownErrorCode
        | ErrorCode::ArithmeticDivisionByZero
        | ErrorCode::ArithmeticUnknownOperator => 2,

        ErrorCode::HttpRequestFailed | ErrorCode::HttpStatusError => 20,

        ErrorCode::InternalIoError
        | ErrorCode::InternalJsonError
        | ErrorCode::InternalUnexpected => 1,
    }
}
