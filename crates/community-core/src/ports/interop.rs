//! Interop port

use crate::Result;
use async_trait::async_trait;
use community_types::{HttpMessageRequest, HttpMessageResponse};

/// A named downstream operation that business services send requests to
#[async_trait]
pub trait BusinessOperation: Send + Sync {
    async fn on_message(&self, request: HttpMessageRequest) -> Result<HttpMessageResponse>;
}
