use crate::config::Config;
use isahc::config::RedirectPolicy;
use isahc::error::ErrorKind;
use isahc::http::header::CONTENT_TYPE;
use isahc::http::{Response, StatusCode};
use isahc::prelude::*;
use isahc::{HttpClient, Request};
use serde_json::Value;
use std::io;
use std::sync::OnceLock;
use std::time::Duration;

const USER_AGENT: &str = "intel_sync";
const JSON_CONTENT_TYPE: &str = "application/json";

static CLIENT: OnceLock<HttpClient> = OnceLock::new();

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid url {url}: {msg}")]
    InvalidUrl { url: String, msg: String },
    #[error("the request timed out")]
    Timeout,
    #[error("failed to connect to the server: {msg}")]
    Connection { msg: String },
    #[error("HTTP error {status}")]
    Http { status: u16 },
    #[error("expected a JSON response, got {content_type:?}")]
    NotJson { content_type: Option<String> },
    #[error("response body is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("failed to read the response: {0}")]
    Io(#[from] io::Error),
    #[error("request failed: {msg}")]
    Request { msg: String },
}

impl From<isahc::Error> for TransportError {
    fn from(error: isahc::Error) -> Self {
        let msg = format!("{error}");

        match error.kind() {
            ErrorKind::Timeout => TransportError::Timeout,
            ErrorKind::ConnectionFailed | ErrorKind::NameResolution => {
                TransportError::Connection { msg }
            }
            _ => TransportError::Request { msg },
        }
    }
}

pub fn client() -> Result<&'static HttpClient, TransportError> {
    if let Some(client) = CLIENT.get() {
        return Ok(client);
    }

    let client = build_client()?;

    Ok(CLIENT.get_or_init(|| client))
}

fn build_client() -> Result<HttpClient, isahc::Error> {
    HttpClient::builder()
        .redirect_policy(RedirectPolicy::Limit(10))
        .timeout(request_timeout_seconds())
        .build()
}

fn request_timeout_seconds() -> Duration {
    let secs = Config::request_timeout_in_seconds();

    Duration::from_secs(secs)
}

/// Fetches `url` and returns its body as JSON. Anything other than a 200
/// response with a JSON content type is an error.
pub fn get_json(url: &str) -> Result<Value, TransportError> {
    let request = Request::get(url)
        .header("User-Agent", USER_AGENT)
        .header("Accept", JSON_CONTENT_TYPE)
        .body(())
        .map_err(|error| TransportError::InvalidUrl {
            url: url.to_string(),
            msg: format!("{error}"),
        })?;

    let mut response = client()?.send(request)?;

    if response.status() != StatusCode::OK {
        return Err(TransportError::Http {
            status: response.status().as_u16(),
        });
    }

    let content_type = content_type(&response);

    if !is_json(content_type.as_deref()) {
        return Err(TransportError::NotJson { content_type });
    }

    let body = read_body(&mut response)?;

    Ok(serde_json::from_slice(&body)?)
}

/// Posts `value` as a JSON body. Returns the response status and its body,
/// which is `Value::Null` when the server did not answer with JSON.
pub fn post_json(url: &str, value: &Value) -> Result<(u16, Value), TransportError> {
    let body = serde_json::to_vec(value)?;

    let request = Request::post(url)
        .header("User-Agent", USER_AGENT)
        .header("Content-Type", JSON_CONTENT_TYPE)
        .body(body)
        .map_err(|error| TransportError::InvalidUrl {
            url: url.to_string(),
            msg: format!("{error}"),
        })?;

    let mut response = client()?.send(request)?;
    let status = response.status().as_u16();
    let body = read_body(&mut response)?;

    let value = serde_json::from_slice(&body).unwrap_or(Value::Null);

    Ok((status, value))
}

fn read_body<T: io::Read>(response: &mut Response<T>) -> Result<Vec<u8>, TransportError> {
    let mut writer: Vec<u8> = vec![];

    io::copy(response.body_mut(), &mut writer)?;

    Ok(writer)
}

fn content_type<T>(response: &Response<T>) -> Option<String> {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

fn is_json(content_type: Option<&str>) -> bool {
    content_type
        .and_then(|value| value.split(';').next())
        .map(|essence| essence.trim().eq_ignore_ascii_case(JSON_CONTENT_TYPE))
        .unwrap_or(false)
}
