//! The four call functions and the client that carries their configuration.
//!
//! # Design
//! `HttpClient` holds only a `RestConfig` and a shared `Transport`; it has no
//! mutable state between calls. Each call is split into a `build_*` method
//! that produces an `HttpRequest` and `execute`, which performs exactly one
//! round-trip and wraps the result. Nothing is retried.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::config::RestConfig;
use crate::error::RestError;
use crate::http::{HttpMethod, HttpRequest, ResponseHead};
use crate::response::RestResponse;
use crate::transport::{Transport, UreqTransport};
use crate::url::ensure_scheme;

/// Stateless client issuing one request per call.
#[derive(Clone)]
pub struct HttpClient {
    config: RestConfig,
    transport: Arc<dyn Transport>,
}

impl HttpClient {
    pub fn new() -> Self {
        Self::with_config(RestConfig::default())
    }

    pub fn with_config(config: RestConfig) -> Self {
        Self::with_transport(config, Arc::new(UreqTransport::new()))
    }

    pub fn with_transport(config: RestConfig, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &RestConfig {
        &self.config
    }

    pub fn build_get(&self, url: &str) -> HttpRequest {
        self.build_bodyless(HttpMethod::Get, url)
    }

    pub fn build_post<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> Result<HttpRequest, RestError> {
        self.build_json(HttpMethod::Post, url, body)
    }

    pub fn build_put<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> Result<HttpRequest, RestError> {
        self.build_json(HttpMethod::Put, url, body)
    }

    pub fn build_delete(&self, url: &str) -> HttpRequest {
        self.build_bodyless(HttpMethod::Delete, url)
    }

    fn build_bodyless(&self, method: HttpMethod, url: &str) -> HttpRequest {
        HttpRequest {
            method,
            url: self.target(url),
            headers: Vec::new(),
            body: None,
        }
    }

    fn build_json<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        url: &str,
        body: &B,
    ) -> Result<HttpRequest, RestError> {
        let body = serde_json::to_string(body).map_err(RestError::Serialization)?;
        Ok(HttpRequest {
            method,
            url: self.target(url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    fn target(&self, url: &str) -> String {
        if self.config.prefix_scheme {
            ensure_scheme(url).into_owned()
        } else {
            url.to_string()
        }
    }

    /// Send `request` and wrap the reply, decoding JSON bodies as `T`.
    pub fn execute<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<RestResponse<T>, RestError> {
        tracing::debug!(method = %request.method, url = %request.url, "sending request");
        let raw = self.transport.execute(&request)?;
        tracing::debug!(
            method = %request.method,
            status = raw.head.status,
            "received response"
        );

        if self.config.check_status {
            check_status(request.method, &raw.head)?;
        }

        if self.config.precache {
            RestResponse::precached(raw)
        } else {
            Ok(RestResponse::deferred(raw))
        }
    }

    pub fn get(&self, url: &str) -> Result<RestResponse<Value>, RestError> {
        self.execute(self.build_get(url))
    }

    pub fn post<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> Result<RestResponse<Value>, RestError> {
        self.execute(self.build_post(url, body)?)
    }

    pub fn put<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> Result<RestResponse<Value>, RestError> {
        self.execute(self.build_put(url, body)?)
    }

    pub fn delete(&self, url: &str) -> Result<RestResponse<Value>, RestError> {
        self.execute(self.build_delete(url))
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Reject anything outside the 2xx range.
fn check_status(method: HttpMethod, head: &ResponseHead) -> Result<(), RestError> {
    if (200..300).contains(&head.status) {
        return Ok(());
    }
    tracing::warn!(%method, status = head.status, "request failed status check");
    Err(RestError::Status {
        method,
        status: head.status,
    })
}
