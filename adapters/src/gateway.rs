//! The gateway every other component issues requests through.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::{
    errors::GatewayError,
    fallback::{NoFallback, ResponseFallback},
    http::ReqwestTransport,
    models::{ApiRequest, ApiResponse, Method, RequestBody},
    Transport,
};

#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    fallback: Arc<dyn ResponseFallback>,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            fallback: Arc::new(NoFallback),
        }
    }

    /// Connects to the REST service at `base_url` with a fresh cookie store.
    pub fn connect(base_url: &str) -> Result<Self, GatewayError> {
        Ok(Self::new(Arc::new(ReqwestTransport::new(base_url)?)))
    }

    pub fn with_fallback(mut self, fallback: Arc<dyn ResponseFallback>) -> Self {
        self.fallback = fallback;
        self
    }

    #[instrument(level = "debug", skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn request(&self, request: ApiRequest) -> Result<ApiResponse, GatewayError> {
        match self.transport.send(request.clone()).await {
            Ok(response) => Ok(self.fallback.on_success(&request, response)),
            Err(err) => {
                debug!("request rejected: {err}");
                self.fallback.on_failure(&request, err)
            }
        }
    }

    pub async fn get(&self, path: &str) -> Result<ApiResponse, GatewayError> {
        self.request(ApiRequest::new(Method::Get, path)).await
    }

    pub async fn get_with(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<ApiResponse, GatewayError> {
        self.request(ApiRequest::new(Method::Get, path).with_query(query.iter().copied()))
            .await
    }

    pub async fn post(&self, path: &str, body: RequestBody) -> Result<ApiResponse, GatewayError> {
        self.request(ApiRequest::new(Method::Post, path).with_body(body))
            .await
    }

    pub async fn post_with(
        &self,
        path: &str,
        body: RequestBody,
        query: &[(&str, &str)],
    ) -> Result<ApiResponse, GatewayError> {
        self.request(
            ApiRequest::new(Method::Post, path)
                .with_body(body)
                .with_query(query.iter().copied()),
        )
        .await
    }

    pub async fn put(&self, path: &str, body: RequestBody) -> Result<ApiResponse, GatewayError> {
        self.request(ApiRequest::new(Method::Put, path).with_body(body))
            .await
    }

    pub async fn delete(&self, path: &str) -> Result<ApiResponse, GatewayError> {
        self.request(ApiRequest::new(Method::Delete, path)).await
    }
}
