use std::time::Duration;

use clap::Args;

use helperkit::defaults;
use helperkit::http::{self, ApiRequest, ApiResponse, HttpMethod};
use helperkit::Error;

use super::{read_json_input, CmdResult};

#[derive(Args)]
pub struct ApiArgs {
    /// GET, POST, PUT, DELETE or PATCH (any case)
    method: String,

    /// Full URL
    endpoint: String,

    /// Query parameter as key=value (repeatable)
    #[arg(long = "param", value_name = "KEY=VALUE")]
    params: Vec<String>,

    /// Header as "Name: value" (repeatable, overrides configured headers)
    #[arg(long = "header", value_name = "HEADER")]
    headers: Vec<String>,

    /// JSON body (literal, @file, or - for stdin); sent for POST, PUT and PATCH
    #[arg(long)]
    body: Option<String>,

    /// Timeout in seconds (default from config)
    #[arg(long)]
    timeout: Option<u64>,
}

/// Parses a header string like "Authorization: Bearer token" into (name, value).
fn parse_header(header: &str) -> helperkit::Result<(&str, &str)> {
    header
        .split_once(':')
        .map(|(name, value)| (name.trim(), value.trim()))
        .filter(|(name, _)| !name.is_empty())
        .ok_or_else(|| {
            Error::validation_invalid_argument(
                "header",
                format!("Invalid header format: {}", header),
                None,
                None,
            )
        })
}

fn parse_param(param: &str) -> helperkit::Result<(&str, &str)> {
    param.split_once('=').ok_or_else(|| {
        Error::validation_invalid_argument(
            "param",
            format!("Expected key=value, got '{}'", param),
            None,
            None,
        )
    })
}

pub fn run(args: ApiArgs) -> CmdResult<ApiResponse> {
    let method: HttpMethod = args.method.parse()?;
    let config = defaults::load_defaults().http;

    let timeout = args.timeout.unwrap_or(config.timeout_secs);
    let mut request = ApiRequest::new(method, args.endpoint).timeout(Duration::from_secs(timeout));

    for header in &config.headers {
        request = request.header(header.name.clone(), header.value.clone());
    }
    for header in &args.headers {
        let (name, value) = parse_header(header)?;
        request = request.header(name, value);
    }
    for param in &args.params {
        let (key, value) = parse_param(param)?;
        request = request.param(key, value);
    }
    if let Some(body) = args.body.as_deref() {
        request = request.body(read_json_input(body)?);
    }

    Ok((http::hit_api(&request)?, 0))
}
