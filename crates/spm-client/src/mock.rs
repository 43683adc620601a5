//! In-memory [`Transport`] that replays queued responses and records requests.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use serde_json::Value;
use spm_model::{Result, SpmError};

use crate::transport::{FilePart, FileResponse, Transport};

/// A queued reply.
#[derive(Debug)]
pub enum MockResponse {
    Json(Value),
    File(FileResponse),
    Error(SpmError),
}

/// A request observed by [`MockTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
    pub file: Option<FilePart>,
}

/// Replays responses in FIFO order. An empty queue yields a network error.
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<MockResponse>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, response: MockResponse) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(response);
    }

    pub fn push_json(&self, body: Value) {
        self.push(MockResponse::Json(body));
    }

    pub fn push_file(&self, content_disposition: Option<&str>, bytes: Vec<u8>) {
        self.push(MockResponse::File(FileResponse {
            content_disposition: content_disposition.map(str::to_string),
            bytes,
        }));
    }

    pub fn push_error(&self, error: SpmError) {
        self.push(MockResponse::Error(error));
    }

    /// All requests seen so far, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests().pop()
    }

    pub fn request_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn record(&self, request: RecordedRequest) -> Option<MockResponse> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
    }

    fn reply_json(&self, request: RecordedRequest) -> Result<Value> {
        let path = request.path.clone();
        match self.record(request) {
            Some(MockResponse::Json(body)) => Ok(body),
            Some(MockResponse::Error(error)) => Err(error),
            Some(MockResponse::File(_)) => Err(SpmError::shape(path, "expected JSON, got a file")),
            None => Err(SpmError::Network(format!("no mock response queued for {path}"))),
        }
    }
}

impl Transport for MockTransport {
    async fn get_json(&self, path: &str) -> Result<Value> {
        self.reply_json(RecordedRequest {
            method: "GET",
            path: path.to_string(),
            body: None,
            file: None,
        })
    }

    async fn post_json(&self, path: &str, body: Value) -> Result<Value> {
        self.reply_json(RecordedRequest {
            method: "POST",
            path: path.to_string(),
            body: Some(body),
            file: None,
        })
    }

    async fn post_multipart(&self, path: &str, file: FilePart) -> Result<Value> {
        self.reply_json(RecordedRequest {
            method: "POST",
            path: path.to_string(),
            body: None,
            file: Some(file),
        })
    }

    async fn post_json_for_file(&self, path: &str, body: Value) -> Result<FileResponse> {
        let response = self.record(RecordedRequest {
            method: "POST",
            path: path.to_string(),
            body: Some(body),
            file: None,
        });
        match response {
            Some(MockResponse::File(file)) => Ok(file),
            Some(MockResponse::Error(error)) => Err(error),
            Some(MockResponse::Json(_)) => Err(SpmError::shape(path, "expected a file, got JSON")),
            None => Err(SpmError::Network(format!("no mock response queued for {path}"))),
        }
    }
}
