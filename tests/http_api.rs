use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::{self, JoinHandle};

use serde_json::json;

use helperkit::http::{hit_api, ApiRequest, ApiResponse, HttpMethod};
use helperkit::ErrorCode;

/// Answer exactly one request on a loopback port. The join handle yields the
/// raw request text.
fn serve_once(status: &'static str, content_type: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap();

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let request = read_request(&stream);
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            content_type,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).unwrap();
        request
    });

    (format!("http://{}", address), handle)
}

fn read_request(stream: &TcpStream) -> String {
    let mut reader = BufReader::new(stream.try_clone().unwrap());
    let mut head = String::new();
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).unwrap();
        if line == "\r\n" || line.is_empty() {
            break;
        }
        head.push_str(&line);
    }

    let length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    let mut body = vec![0; length];
    reader.read_exact(&mut body).unwrap();
    format!("{}\r\n{}", head, String::from_utf8_lossy(&body))
}

#[test]
fn get_sends_query_and_default_headers_and_decodes_json() {
    let (base, server) = serve_once("200 OK", "application/json", r#"{"results":[1,2]}"#);

    let request = ApiRequest::new(HttpMethod::Get, format!("{}/search", base))
        .param("q", "rust")
        .body(json!({"ignored": true}));
    let response = hit_api(&request).unwrap();

    assert_eq!(response, ApiResponse::Json(json!({"results": [1, 2]})));

    let raw = server.join().unwrap();
    let lowered = raw.to_ascii_lowercase();
    assert!(raw.starts_with("GET /search?q=rust HTTP/1.1"));
    assert!(lowered.contains("accept: application/json"));
    assert!(lowered.contains("content-type: application/json"));
    assert!(!raw.contains("ignored"));
}

#[test]
fn post_sends_json_body_and_custom_headers() {
    let (base, server) = serve_once("201 Created", "application/json", r#"{"id":7}"#);

    let request = ApiRequest::new(HttpMethod::Post, format!("{}/users", base))
        .header("X-Request-Id", "abc123")
        .body(json!({"name": "Ann"}));
    let response = hit_api(&request).unwrap();

    assert_eq!(response, ApiResponse::Json(json!({"id": 7})));

    let raw = server.join().unwrap();
    assert!(raw.starts_with("POST /users HTTP/1.1"));
    assert!(raw.to_ascii_lowercase().contains("x-request-id: abc123"));
    assert!(raw.ends_with(r#"{"name":"Ann"}"#));
}

#[test]
fn non_json_body_is_returned_as_text() {
    let (base, server) = serve_once("200 OK", "text/plain", "pong");

    let response = hit_api(&ApiRequest::new(HttpMethod::Get, format!("{}/ping", base))).unwrap();

    assert_eq!(response, ApiResponse::Text("pong".to_string()));
    server.join().unwrap();
}

#[test]
fn error_status_becomes_status_error() {
    let (base, server) = serve_once("404 Not Found", "application/json", r#"{"message":"missing"}"#);

    let err = hit_api(&ApiRequest::new(HttpMethod::Delete, format!("{}/users/9", base))).unwrap_err();

    assert_eq!(err.code, ErrorCode::HttpStatusError);
    assert_eq!(err.details["status"], json!(404));
    assert_eq!(err.details["method"], json!("DELETE"));
    assert_eq!(err.details["body"], json!(r#"{"message":"missing"}"#));
    assert_eq!(err.retryable, Some(false));
    server.join().unwrap();
}

#[test]
fn refused_connection_is_request_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    let err = hit_api(&ApiRequest::new(HttpMethod::Get, format!("http://{}/", address))).unwrap_err();

    assert_eq!(err.code, ErrorCode::HttpRequestFailed);
    assert!(err.message.starts_with("API request failed:"));
}
