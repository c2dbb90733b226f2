//! Minimal typed REST client.
//!
//! # Overview
//! Four call functions (`get`, `post`, `put`, `del`) each issue exactly one
//! request and return a `RestResponse` normalized to `{status, ok, text, json}`.
//! `Rest` binds them to a base URL, and an `Endpoint` map gives per-path
//! request/response types at compile time.
//!
//! # Design
//! - `HttpClient` is stateless: it holds a `RestConfig` and a shared
//!   `Transport`, so one instance can serve any number of independent calls.
//! - Requests are built as plain `HttpRequest` data (`build_*`) before the
//!   transport executes them; the default transport is a blocking ureq agent.
//! - Optional behaviours (precaching, status checks, `http://` prefixing) are
//!   explicit `RestConfig` fields, all off by default.
//! - There is no retry, timeout, cancellation or authentication layer.

pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod response;
pub mod rest;
pub mod transport;
pub mod url;

use serde::Serialize;
use serde_json::Value;

pub use client::HttpClient;
pub use config::RestConfig;
pub use endpoint::{Endpoint, Verb};
pub use error::RestError;
pub use http::{HttpMethod, HttpRequest, RawResponse, ResponseHead};
pub use response::RestResponse;
pub use rest::Rest;
pub use transport::{Transport, UreqTransport};
pub use url::{compose_url, ensure_scheme, remove_double_slashes};

/// `GET url` with the default configuration.
pub fn get(url: &str) -> Result<RestResponse<Value>, RestError> {
    HttpClient::new().get(url)
}

/// `POST url` with `body` as JSON, using the default configuration.
pub fn post<B: Serialize + ?Sized>(url: &str, body: &B) -> Result<RestResponse<Value>, RestError> {
    HttpClient::new().post(url, body)
}

/// `PUT url` with `body` as JSON, using the default configuration.
pub fn put<B: Serialize + ?Sized>(url: &str, body: &B) -> Result<RestResponse<Value>, RestError> {
    HttpClient::new().put(url, body)
}

/// `DELETE url` with the default configuration.
pub fn del(url: &str) -> Result<RestResponse<Value>, RestError> {
    HttpClient::new().delete(url)
}
