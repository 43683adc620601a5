//! Transport seam between the typed client and the network.

use std::future::Future;

use reqwest::header::{ACCEPT, CONTENT_DISPOSITION, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use spm_model::{Result, SpmError};
use tracing::{debug, warn};

use crate::config::ClientConfig;

/// User agent string for API requests.
const USER_AGENT_VALUE: &str = concat!("smartpaymap-client/", env!("CARGO_PKG_VERSION"));

/// A file sent as one part of a multipart form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    /// Form field name.
    pub field: String,
    pub filename: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl FilePart {
    /// A CSV file under the `file` form field.
    pub fn csv(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            field: "file".to_string(),
            filename: filename.into(),
            mime: "text/csv".to_string(),
            bytes,
        }
    }
}

/// A binary response body together with its `Content-Disposition` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileResponse {
    pub content_disposition: Option<String>,
    pub bytes: Vec<u8>,
}

/// Issues requests against the backend and returns decoded JSON bodies.
///
/// Implementations resolve `path` against their own base URL and convert
/// transport failures and non-2xx statuses into [`SpmError`].
pub trait Transport: Send + Sync {
    fn get_json(&self, path: &str) -> impl Future<Output = Result<Value>> + Send;

    fn post_json(&self, path: &str, body: Value) -> impl Future<Output = Result<Value>> + Send;

    fn post_multipart(
        &self,
        path: &str,
        file: FilePart,
    ) -> impl Future<Output = Result<Value>> + Send;

    /// Posts JSON and returns the raw body, for endpoints that answer with a file.
    fn post_json_for_file(
        &self,
        path: &str,
        body: Value,
    ) -> impl Future<Output = Result<FileResponse>> + Send;
}

/// `reqwest`-backed transport constructed once from a [`ClientConfig`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Creates a transport with the configured base URL, timeout and headers.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| SpmError::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Checks the status and decodes the body; an empty body decodes to `null`.
    async fn handle_json(path: &str, response: reqwest::Response) -> Result<Value> {
        let response = Self::check_status(path, response).await?;
        let text = response.text().await.map_err(network_error)?;
        debug!(path, bytes = text.len(), "response received");
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text)
            .map_err(|e| SpmError::shape(path, format!("response is not valid JSON: {e}")))
    }

    async fn check_status(path: &str, response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = error_message(status.as_u16(), &body);
        warn!(path, status = status.as_u16(), %message, "request failed");
        Err(SpmError::Http {
            status: status.as_u16(),
            message,
        })
    }
}

impl Transport for HttpTransport {
    async fn get_json(&self, path: &str) -> Result<Value> {
        debug!(method = "GET", path, "sending request");
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(network_error)?;
        Self::handle_json(path, response).await
    }

    async fn post_json(&self, path: &str, body: Value) -> Result<Value> {
        debug!(method = "POST", path, "sending request");
        let response = self
            .client
            .post(self.url(path))
            .json(&body)
            .send()
            .await
            .map_err(network_error)?;
        Self::handle_json(path, response).await
    }

    async fn post_multipart(&self, path: &str, file: FilePart) -> Result<Value> {
        debug!(
            method = "POST",
            path,
            filename = %file.filename,
            bytes = file.bytes.len(),
            "sending multipart request"
        );
        let FilePart {
            field,
            filename,
            mime,
            bytes,
        } = file;
        let part = Part::bytes(bytes)
            .file_name(filename)
            .mime_str(&mime)
            .map_err(|e| SpmError::validation(format!("invalid content type '{mime}': {e}")))?;
        let form = Form::new().part(field, part);
        let response = self
            .client
            .post(self.url(path))
            .multipart(form)
            .send()
            .await
            .map_err(network_error)?;
        Self::handle_json(path, response).await
    }

    async fn post_json_for_file(&self, path: &str, body: Value) -> Result<FileResponse> {
        debug!(method = "POST", path, "sending request");
        let response = self
            .client
            .post(self.url(path))
            .json(&body)
            .send()
            .await
            .map_err(network_error)?;
        let response = Self::check_status(path, response).await?;
        let content_disposition = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await.map_err(network_error)?;
        debug!(path, bytes = bytes.len(), "file received");
        Ok(FileResponse {
            content_disposition,
            bytes: bytes.to_vec(),
        })
    }
}

fn network_error(err: reqwest::Error) -> SpmError {
    if err.is_timeout() {
        SpmError::Network(format!("request timed out: {err}"))
    } else if err.is_connect() {
        SpmError::Network("could not connect to the server - please check your connection".to_string())
    } else {
        SpmError::Network(err.to_string())
    }
}

/// Extracts a human-readable message from an error body.
///
/// Looks at `detail`, `message` and `error` in that order. A FastAPI
/// validation `detail` list is flattened into its `msg` entries.
pub(crate) fn error_message(status: u16, body: &str) -> String {
    let fallback = || format!("HTTP error! status: {status}");
    let Ok(Value::Object(object)) = serde_json::from_str::<Value>(body) else {
        return fallback();
    };
    for key in ["detail", "message", "error"] {
        match object.get(key) {
            Some(Value::String(text)) if !text.is_empty() => return text.clone(),
            Some(Value::Array(items)) => {
                let messages: Vec<&str> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(Value::as_str))
                    .collect();
                if !messages.is_empty() {
                    return messages.join("; ");
                }
            }
            _ => {}
        }
    }
    fallback()
}
