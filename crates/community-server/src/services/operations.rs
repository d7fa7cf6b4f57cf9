//! Business operations the interop service can target

use async_trait::async_trait;
use community_core::ports::BusinessOperation;
use community_core::{CommunityError, HttpMessageRequest, HttpMessageResponse, Result};
use tracing::debug;

use crate::services::wire::{collect_headers, decode_body, encode_body};

/// Headers that describe the inbound hop and must not be replayed.
/// `accept-encoding` is included because the client does not decompress.
const HOP_HEADERS: [&str; 6] = [
    "host",
    "connection",
    "content-length",
    "transfer-encoding",
    "keep-alive",
    "accept-encoding",
];

/// Answers every request with the request itself, JSON encoded.
pub struct EchoOperation;

#[async_trait]
impl BusinessOperation for EchoOperation {
    async fn on_message(&self, request: HttpMessageRequest) -> Result<HttpMessageResponse> {
        let body = serde_json::to_string(&request)?;
        let mut response = HttpMessageResponse::new(200, body);
        response.append_header("content-type", "application/json");
        Ok(response)
    }
}

/// Replays the request against a downstream HTTP service.
pub struct HttpForwardOperation {
    client: reqwest::Client,
    base_url: String,
}

impl HttpForwardOperation {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn target_url(&self, url: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), url)
    }
}

#[async_trait]
impl BusinessOperation for HttpForwardOperation {
    async fn on_message(&self, request: HttpMessageRequest) -> Result<HttpMessageResponse> {
        let method = reqwest::Method::from_bytes(request.method.as_bytes())
            .map_err(|e| CommunityError::Interop(format!("invalid method: {}", e)))?;
        let url = self.target_url(&request.url);
        debug!("Forwarding {} {} to {}", request.method, request.url, url);

        let mut builder = self.client.request(method, &url);
        for (name, values) in &request.headers {
            if HOP_HEADERS.contains(&name.to_ascii_lowercase().as_str()) {
                continue;
            }
            for value in values {
                builder = builder.header(name.as_str(), value.as_str());
            }
        }

        let body = decode_body(&request.body, request.body_encoding)?;
        let response = builder
            .body(body)
            .send()
            .await
            .map_err(|e| CommunityError::Interop(format!("forward to {} failed: {}", url, e)))?;

        let status = response.status().as_u16();
        let headers = collect_headers(
            response
                .headers()
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_bytes())),
        );
        let bytes = response
            .bytes()
            .await
            .map_err(|e| CommunityError::Interop(format!("reading response from {}: {}", url, e)))?;
        let (body, body_encoding) = encode_body(&bytes);

        Ok(HttpMessageResponse {
            status,
            headers,
            body,
            body_encoding,
        })
    }
}
