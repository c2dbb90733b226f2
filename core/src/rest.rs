//! `Rest`: the call functions bound to a base URL.
//!
//! # Design
//! `Rest` owns a base URL and an `HttpClient` and nothing else. Paths are
//! joined with `compose_url`, so stray slashes on either side are harmless.
//! The `*_as` methods take an `Endpoint` from a compile-time map and return a
//! response typed to that endpoint; at runtime they do exactly what the
//! untyped methods do.

use serde::Serialize;
use serde_json::Value;

use crate::client::HttpClient;
use crate::config::RestConfig;
use crate::endpoint::{Delete, Endpoint, Get, Post, Put};
use crate::error::RestError;
use crate::response::RestResponse;
use crate::url::compose_url;

#[derive(Debug, Clone)]
pub struct Rest {
    base_url: String,
    client: HttpClient,
}

impl Rest {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, HttpClient::new())
    }

    pub fn with_config(base_url: impl Into<String>, config: RestConfig) -> Self {
        Self::with_client(base_url, HttpClient::with_config(config))
    }

    pub fn with_client(base_url: impl Into<String>, client: HttpClient) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn config(&self) -> &RestConfig {
        self.client.config()
    }

    /// Full URL for `path` under the base URL.
    pub fn url(&self, path: &str) -> String {
        compose_url(&self.base_url, path)
    }

    pub fn get(&self, path: &str) -> Result<RestResponse<Value>, RestError> {
        self.client.get(&self.url(path))
    }

    pub fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<RestResponse<Value>, RestError> {
        self.client.post(&self.url(path), body)
    }

    pub fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<RestResponse<Value>, RestError> {
        self.client.put(&self.url(path), body)
    }

    pub fn delete(&self, path: &str) -> Result<RestResponse<Value>, RestError> {
        self.client.delete(&self.url(path))
    }

    pub fn get_as<E: Endpoint<Get>>(&self) -> Result<RestResponse<E::Response>, RestError> {
        let request = self.client.build_get(&self.url(E::PATH));
        self.client.execute(request)
    }

    pub fn post_as<E: Endpoint<Post>>(&self, body: &E::Request) -> Result<RestResponse<E::Response>, RestError> {
        let request = self.client.build_post(&self.url(E::PATH), body)?;
        self.client.execute(request)
    }

    pub fn put_as<E: Endpoint<Put>>(&self, body: &E::Request) -> Result<RestResponse<E::Response>, RestError> {
        let request = self.client.build_put(&self.url(E::PATH), body)?;
        self.client.execute(request)
    }

    pub fn delete_as<E: Endpoint<Delete>>(&self) -> Result<RestResponse<E::Response>, RestError> {
        let request = self.client.build_delete(&self.url(E::PATH));
        self.client.execute(request)
    }
}
