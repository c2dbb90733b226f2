//! The network seam between `HttpClient` and the outside world.
//!
//! `HttpClient` never talks to a socket directly; it hands a fully built
//! `HttpRequest` to a `Transport` and gets back the head plus an unread body.
//! `UreqTransport` is the default. Tests plug in recording fakes.

use ureq::Agent;

use crate::error::RestError;
use crate::http::{HttpMethod, HttpRequest, RawResponse, ResponseHead};

/// Executes exactly one HTTP round-trip per call.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &HttpRequest) -> Result<RawResponse, RestError>;
}

/// Blocking transport backed by a `ureq::Agent`.
///
/// Status codes are never turned into errors here: 4xx/5xx come back as data
/// so `HttpClient` can decide what a failure is.
#[derive(Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }

    /// Use a caller-configured agent. Its `http_status_as_error` setting is
    /// respected as-is.
    pub fn with_agent(agent: Agent) -> Self {
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<RawResponse, RestError> {
        let url = request.url.as_str();
        let headers = &request.headers;

        let response = match (request.method, request.body.as_deref()) {
            (HttpMethod::Get, _) => with_headers(self.agent.get(url), headers).call(),
            (HttpMethod::Delete, _) => with_headers(self.agent.delete(url), headers).call(),
            (HttpMethod::Post, Some(body)) => {
                with_headers(self.agent.post(url), headers).send(body.as_bytes())
            }
            (HttpMethod::Post, None) => with_headers(self.agent.post(url), headers).send_empty(),
            (HttpMethod::Put, Some(body)) => {
                with_headers(self.agent.put(url), headers).send(body.as_bytes())
            }
            (HttpMethod::Put, None) => with_headers(self.agent.put(url), headers).send_empty(),
        }?;

        let head = ResponseHead {
            status: response.status().as_u16(),
            headers: response
                .headers()
                .iter()
                .filter_map(|(name, value)| {
                    value
                        .to_str()
                        .ok()
                        .map(|value| (name.as_str().to_string(), value.to_string()))
                })
                .collect(),
        };
        let body = response.into_body().into_reader();

        Ok(RawResponse {
            head,
            body: Box::new(body),
        })
    }
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}
