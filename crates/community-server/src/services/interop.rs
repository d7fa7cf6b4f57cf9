//! Interop services
//!
//! A [`Director`] keeps the registry of named business operations. A
//! [`BusinessService`] receives inbound requests and sends them, synchronously
//! from the caller's point of view, to one of those operations.

use community_core::ports::BusinessOperation;
use community_core::{CommunityError, HttpMessageRequest, HttpMessageResponse, Result};
use dashmap::DashMap;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Default)]
pub struct Director {
    operations: DashMap<String, Arc<dyn BusinessOperation>>,
}

impl Director {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an operation, replacing any previous one with the same name.
    pub fn register_operation(&self, name: impl Into<String>, operation: Arc<dyn BusinessOperation>) {
        let name = name.into();
        debug!("Registering business operation '{}'", name);
        self.operations.insert(name, operation);
    }

    pub fn operation(&self, name: &str) -> Option<Arc<dyn BusinessOperation>> {
        self.operations.get(name).map(|entry| entry.value().clone())
    }

    pub fn create_business_service(self: &Arc<Self>, target: impl Into<String>) -> BusinessService {
        BusinessService {
            director: Arc::clone(self),
            target: target.into(),
        }
    }
}

pub struct BusinessService {
    director: Arc<Director>,
    target: String,
}

impl BusinessService {
    pub fn target(&self) -> &str {
        &self.target
    }

    pub async fn on_process_input(&self, request: HttpMessageRequest) -> Result<HttpMessageResponse> {
        info!("Request: {}", request);
        self.send_request_sync(&self.target, request).await
    }

    pub async fn send_request_sync(
        &self,
        target: &str,
        request: HttpMessageRequest,
    ) -> Result<HttpMessageResponse> {
        // Clone the Arc out so no map guard is held across the await
        let operation = self.director.operation(target).ok_or_else(|| {
            CommunityError::Interop(format!("no business operation registered as '{}'", target))
        })?;

        let response = operation.on_message(request).await?;
        debug!("Operation '{}' answered with status {}", target, response.status);
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use community_core::Headers;

    struct FixedOperation(u16);

    #[async_trait]
    impl BusinessOperation for FixedOperation {
        async fn on_message(&self, request: HttpMessageRequest) -> Result<HttpMessageResponse> {
            Ok(HttpMessageResponse::new(self.0, request.method))
        }
    }

    fn request() -> HttpMessageRequest {
        HttpMessageRequest::new("PUT", "/interop", Headers::new(), "payload")
    }

    #[tokio::test]
    async fn test_dispatch_to_target() {
        let director = Arc::new(Director::new());
        director.register_operation("BO", Arc::new(FixedOperation(201)));

        let service = director.create_business_service("BO");
        let response = service.on_process_input(request()).await.unwrap();
        assert_eq!(response.status, 201);
        assert_eq!(response.body, "PUT");
    }

    #[tokio::test]
    async fn test_unknown_target() {
        let director = Arc::new(Director::new());
        let service = director.create_business_service("BO");

        let err = service.on_process_input(request()).await.unwrap_err();
        assert!(matches!(err, CommunityError::Interop(_)));
    }

    #[tokio::test]
    async fn test_register_replaces() {
        let director = Arc::new(Director::new());
        director.register_operation("BO", Arc::new(FixedOperation(200)));
        director.register_operation("BO", Arc::new(FixedOperation(202)));

        let service = director.create_business_service("BO");
        let response = service.send_request_sync("BO", request()).await.unwrap();
        assert_eq!(response.status, 202);
    }
}
