//! JSON-first HTTP request wrapper.
//!
//! Every request carries `Accept` and `Content-Type: application/json`
//! unless the caller overrides them. Bodies are only sent for POST, PUT and
//! PATCH. Responses decode as JSON when they parse, otherwise as text.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use reqwest::blocking::Client;
use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, HttpStatusDetails, Result};

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const JSON_MEDIA_TYPE: &str = "application/json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 5] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Patch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }

    pub fn carries_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }

    fn to_reqwest(self) -> reqwest::Method {
        match self {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
            HttpMethod::Patch => reqwest::Method::PATCH,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let upper = s.trim().to_ascii_uppercase();
        HttpMethod::ALL
            .into_iter()
            .find(|m| m.as_str() == upper)
            .ok_or_else(|| {
                let allowed: Vec<String> =
                    HttpMethod::ALL.iter().map(|m| m.as_str().to_string()).collect();
                Error::validation_invalid_argument(
                    "method",
                    format!(
                        "Invalid HTTP method: {}. Allowed methods: {}",
                        upper,
                        allowed.join(", ")
                    ),
                    Some(s.to_string()),
                    Some(allowed),
                )
            })
    }
}

#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub endpoint: String,
    pub params: Vec<(String, String)>,
    pub body: Option<Value>,
    pub headers: Vec<(String, String)>,
    pub timeout: Duration,
}

impl ApiRequest {
    pub fn new(method: HttpMethod, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            params: Vec::new(),
            body: None,
            headers: Vec::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Default JSON headers overlaid with the caller's. Names compare
    /// case-insensitively; a later header replaces an earlier one in place.
    pub fn merged_headers(&self) -> Vec<(String, String)> {
        let mut merged: Vec<(String, String)> = vec![
            ("Accept".to_string(), JSON_MEDIA_TYPE.to_string()),
            ("Content-Type".to_string(), JSON_MEDIA_TYPE.to_string()),
        ];

        for (name, value) in &self.headers {
            match merged
                .iter_mut()
                .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            {
                Some(slot) => slot.1 = value.clone(),
                None => merged.push((name.clone(), value.clone())),
            }
        }

        merged
    }

    /// The body that will actually be sent: none for GET/DELETE, and none
    /// when the body is null or an empty object/array.
    pub fn effective_body(&self) -> Option<&Value> {
        if !self.method.carries_body() {
            return None;
        }
        self.body.as_ref().filter(|body| !is_empty_body(body))
    }
}

fn is_empty_body(body: &Value) -> bool {
    match body {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ApiResponse {
    Json(Value),
    Text(String),
}

/// JSON when the body parses, otherwise the raw text.
pub fn decode_body(body: String) -> ApiResponse {
    match serde_json::from_str::<Value>(&body) {
        Ok(value) => ApiResponse::Json(value),
        Err(_) => ApiResponse::Text(body),
    }
}

/// Send `request` and decode the response. Transport failures map to
/// `http.request_failed`; 4xx/5xx responses map to `http.status_error` with
/// the response body attached.
pub fn hit_api(request: &ApiRequest) -> Result<ApiResponse> {
    let method = request.method.as_str();
    let endpoint = request.endpoint.as_str();
    let request_failed = |e: reqwest::Error| Error::http_request_failed(method, endpoint, e);

    let client = Client::builder()
        .timeout(request.timeout)
        .build()
        .map_err(request_failed)?;

    let mut builder = client.request(request.method.to_reqwest(), endpoint);
    for (name, value) in request.merged_headers() {
        builder = builder.header(name, value);
    }
    if !request.params.is_empty() {
        builder = builder.query(&request.params);
    }
    if let Some(body) = request.effective_body() {
        builder = builder.json(body);
    }

    log_status!("api", "{} {}", method, endpoint);

    let response = builder.send().map_err(request_failed)?;
    let status = response.status();
    let body = response.text().map_err(request_failed)?;

    if status.is_client_error() || status.is_server_error() {
        return Err(Error::http_status_error(HttpStatusDetails {
            method: method.to_string(),
            url: endpoint.to_string(),
            status: status.as_u16(),
            body,
        }));
    }

    Ok(decode_body(body))
}
