//! Error types for the REST client.
//!
//! # Design
//! Transport failures are carried as the underlying `ureq::Error`, unchanged.
//! A non-success status only becomes an error when `check_status` is on, and
//! then it names just the method and the code; the body stays unread.

use thiserror::Error;

use crate::http::HttpMethod;

/// Errors returned by `HttpClient`, `Rest`, and `RestResponse` accessors.
#[derive(Debug, Error)]
pub enum RestError {
    /// The request never produced a response (DNS, connect, protocol).
    #[error("transport error: {0}")]
    Transport(#[from] ureq::Error),

    /// The server answered outside `200..300` and status checking is enabled.
    #[error("{method} request failed with status {status}")]
    Status { method: HttpMethod, status: u16 },

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The response body is not valid JSON for the requested type.
    #[error("invalid JSON body: {0}")]
    Json(#[source] serde_json::Error),

    /// Reading the response body stream failed.
    #[error("failed to read response body: {0}")]
    BodyRead(#[from] std::io::Error),

    /// A previous read of the body failed, so there is nothing left to read.
    #[error("response body was already consumed")]
    BodyConsumed,

    #[error("invalid value {value:?} for {key}")]
    InvalidConfig { key: String, value: String },
}
