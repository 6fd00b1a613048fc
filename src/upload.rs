use crate::http_client::{self, TransportError};
use log::info;
use serde_json::Value;
use std::fs;
use std::io;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("{path} is not a JSON file")]
    NotJsonFile { path: String },
    #[error("failed to read {path}: {source}")]
    Io { path: String, source: io::Error },
    #[error("{path} does not contain valid JSON: {source}")]
    InvalidJson {
        path: String,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("the server rejected the upload with status {status}: {body}")]
    Rejected { status: u16, body: Value },
}

/// Uploads the contents of a `.json` file to `url`.
pub fn upload_file(url: &str, path: &Path) -> Result<Value, UploadError> {
    let display = path.display().to_string();

    let is_json_file = path
        .extension()
        .map(|extension| extension.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if !is_json_file {
        return Err(UploadError::NotJsonFile { path: display });
    }

    let data = fs::read(path).map_err(|source| UploadError::Io {
        path: display.clone(),
        source,
    })?;

    let value: Value = serde_json::from_slice(&data).map_err(|source| UploadError::InvalidJson {
        path: display.clone(),
        source,
    })?;

    info!("Uploading file {}", display);

    upload_value(url, &value)
}

pub fn upload_value(url: &str, value: &Value) -> Result<Value, UploadError> {
    let (status, body) = http_client::post_json(url, value)?;

    if !(200..300).contains(&status) {
        return Err(UploadError::Rejected { status, body });
    }

    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::UploadError;
    use serde_json::json;
    use std::io::Write;
    use std::path::Path;

    const PATH: &str = "/api/v2/add/data";

    #[test]
    fn upload_file_posts_file_contents() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", PATH)
            .match_body(mockito::Matcher::Json(json!({"count": 0, "items": []})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message": "JSON data saved successfully"}"#)
            .create();

        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"count": 0, "items": []}}"#).unwrap();

        let url = format!("{}{}", server.url(), PATH);
        let response = super::upload_file(&url, file.path()).unwrap();

        mock.assert();
        assert_eq!(response, json!({"message": "JSON data saved successfully"}));
    }

    #[test]
    fn upload_file_rejects_other_extensions() {
        let result = super::upload_file("http://localhost:5001", Path::new("data.txt"));

        assert!(matches!(result, Err(UploadError::NotJsonFile { .. })));
    }

    #[test]
    fn upload_file_rejects_invalid_json() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "not json").unwrap();

        let result = super::upload_file("http://localhost:5001", file.path());

        assert!(matches!(result, Err(UploadError::InvalidJson { .. })));
    }

    #[test]
    fn upload_file_fails_for_missing_file() {
        let result = super::upload_file("http://localhost:5001", Path::new("/nonexistent/data.json"));

        assert!(matches!(result, Err(UploadError::Io { .. })));
    }

    #[test]
    fn upload_value_fails_on_rejected_upload() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", PATH)
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": "Invalid data format"}"#)
            .create();

        let url = format!("{}{}", server.url(), PATH);
        let result = super::upload_value(&url, &json!({"key": "value"}));

        match result {
            Err(UploadError::Rejected { status, body }) => {
                assert_eq!(status, 400);
                assert_eq!(body, json!({"error": "Invalid data format"}));
            }
            other => panic!("Unexpected result {other:?}"),
        }
    }
}
