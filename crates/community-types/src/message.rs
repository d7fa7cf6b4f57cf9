//! Interop message protocol
//!
//! Requests arriving on the interop endpoint are wrapped into an
//! [`HttpMessageRequest`] and handed to a business service, which answers
//! with an [`HttpMessageResponse`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Header name to every value it was sent with, in arrival order.
pub type Headers = HashMap<String, Vec<String>>;

/// How a message body is carried in its `body` string
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyEncoding {
    /// The body is the payload text itself
    #[default]
    Utf8,
    /// The payload was not valid UTF-8 and is carried as standard base64
    Base64,
}

/// Inbound HTTP request, as seen by the business service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpMessageRequest {
    pub id: Uuid,
    pub method: String,
    pub url: String,
    pub headers: Headers,
    pub body: String,
    #[serde(default)]
    pub body_encoding: BodyEncoding,
}

impl HttpMessageRequest {
    pub fn new(
        method: impl Into<String>,
        url: impl Into<String>,
        headers: Headers,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            method: method.into(),
            url: url.into(),
            headers,
            body: body.into(),
            body_encoding: BodyEncoding::Utf8,
        }
    }

    pub fn with_body_encoding(mut self, encoding: BodyEncoding) -> Self {
        self.body_encoding = encoding;
        self
    }
}

impl std::fmt::Display for HttpMessageRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} ({} headers, {} bytes) [{}]",
            self.method,
            self.url,
            self.headers.len(),
            self.body.len(),
            self.id
        )
    }
}

/// Response produced by a business operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpMessageResponse {
    pub status: u16,
    pub headers: Headers,
    pub body: String,
    #[serde(default)]
    pub body_encoding: BodyEncoding,
}

impl HttpMessageResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Headers::new(),
            body: body.into(),
            body_encoding: BodyEncoding::Utf8,
        }
    }

    /// Append a header value, keeping any already present under the name.
    pub fn append_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.entry(name.into()).or_default().push(value.into());
    }
}
