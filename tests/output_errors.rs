use helperkit::error::HttpStatusDetails;
use helperkit::output::{map_cmd_result_to_json, CliResponse};
use helperkit::{arithmetic, Error};

#[test]
fn division_by_zero_serializes_code_and_operands() {
    let err = arithmetic::calculate(10, 0, "divide").unwrap_err();

    let json = CliResponse::<()>::from_error(&err).to_json().unwrap();

    assert!(json.contains("\"success\": false"));
    assert!(json.contains("\"code\": \"arithmetic.division_by_zero\""));
    assert!(json.contains("Division by zero is not allowed."));
    assert!(json.contains("\"dividend\": \"10\""));
}

#[test]
fn unknown_operator_lists_allowed_operations() {
    let err = arithmetic::calculate(1, 2, "modulo").unwrap_err();

    let json = CliResponse::<()>::from_error(&err).to_json().unwrap();

    assert!(json.contains("\"code\": \"arithmetic.unknown_operator\""));
    assert!(json.contains("Invalid operation: modulo. Allowed operations: sum, subtract, multiply, divide"));
}

#[test]
fn arithmetic_errors_map_to_exit_code_2() {
    let err = arithmetic::calculate(10, 0, "divide").unwrap_err();

    let (_value, exit_code) = map_cmd_result_to_json::<serde_json::Value>(Err(err));

    assert_eq!(exit_code, 2);
}

#[test]
fn http_status_error_serializes_body_and_maps_to_exit_code_20() {
    let err = Error::http_status_error(HttpStatusDetails {
        method: "GET".to_string(),
        url: "https://api.example.com/users".to_string(),
        status: 503,
        body: "upstream unavailable".to_string(),
    });

    let json = CliResponse::<()>::from_error(&err).to_json().unwrap();
    assert!(json.contains("\"code\": \"http.status_error\""));
    assert!(json.contains("upstream unavailable"));
    assert!(json.contains("\"retryable\": true"));

    let (_value, exit_code) = map_cmd_result_to_json::<serde_json::Value>(Err(err));
    assert_eq!(exit_code, 20);
}

#[test]
fn client_status_error_is_not_retryable() {
    let err = Error::http_status_error(HttpStatusDetails {
        method: "POST".to_string(),
        url: "https://api.example.com/users".to_string(),
        status: 422,
        body: String::new(),
    });

    assert_eq!(err.retryable, Some(false));
}

#[test]
fn internal_errors_map_to_exit_code_1() {
    let err = Error::internal_io("disk full", Some("write".to_string()));

    let (_value, exit_code) = map_cmd_result_to_json::<serde_json::Value>(Err(err));

    assert_eq!(exit_code, 1);
}

#[test]
fn success_envelope_carries_data() {
    let (value, exit_code) = map_cmd_result_to_json(Ok((serde_json::json!({"slug": "hello-world"}), 0)));

    let json = CliResponse::success(value.unwrap()).to_json().unwrap();
    assert_eq!(exit_code, 0);
    assert!(json.contains("\"success\": true"));
    assert!(json.contains("\"slug\": \"hello-world\""));
    assert!(!json.contains("\"error\""));
}

#[test]
fn hints_are_omitted_when_empty() {
    let err = Error::validation_invalid_argument("size", "Chunk size must be greater than zero", None, None);

    let json = CliResponse::<()>::from_error(&err).to_json().unwrap();

    assert!(!json.contains("\"hints\""));
    assert!(json.contains("\"field\": \"size\""));
}
