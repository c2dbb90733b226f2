//! The uniform response wrapper returned by every call.
//!
//! # Design
//! A `RestResponse` is either precached (body read and decoded before the
//! wrapper is handed out) or deferred (body left unread until `text()` or
//! `json()` is first called). Deferred bodies are buffered on first read, so
//! calling both accessors on one response is fine. A failed first read
//! leaves nothing behind and later accessors report `BodyConsumed`.
//!
//! JSON decoding is plain `serde_json`: an empty body is a `RestError::Json`,
//! not `null`. Check `status` first when a reply may be bodiless (204).
//!
//! Responses are `Send`, so a call can run on a worker thread and hand its
//! response back unread.

use std::fmt;
use std::io::Read;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::RestError;
use crate::http::{RawResponse, ResponseHead};

/// Normalized view of an HTTP response.
pub struct RestResponse<T = Value> {
    /// Numeric status code.
    pub status: u16,
    /// `true` exactly when `status == 200`. Other 2xx codes are not `ok`.
    pub ok: bool,
    /// Status line and headers as received from the transport.
    pub response: ResponseHead,
    body: Payload<T>,
}

enum Payload<T> {
    Precached { text: String, json: T },
    Deferred(BodyState),
}

enum BodyState {
    Unread(Box<dyn Read + Send>),
    Buffered(Vec<u8>),
    Consumed,
}

impl<T: DeserializeOwned> RestResponse<T> {
    /// Read and decode the whole body now.
    pub(crate) fn precached(raw: RawResponse) -> Result<Self, RestError> {
        let RawResponse { head, mut body } = raw;
        let mut bytes = Vec::new();
        body.read_to_end(&mut bytes)?;
        tracing::trace!(status = head.status, len = bytes.len(), "precached response body");

        let json = decode_json(&bytes)?;
        // Decoding succeeded, so the bytes are valid UTF-8 and `text` is exact.
        let text = String::from_utf8_lossy(&bytes).into_owned();
        Ok(Self::from_parts(head, Payload::Precached { text, json }))
    }

    /// Keep the body unread until an accessor asks for it.
    pub(crate) fn deferred(raw: RawResponse) -> Self {
        Self::from_parts(raw.head, Payload::Deferred(BodyState::Unread(raw.body)))
    }

    fn from_parts(head: ResponseHead, body: Payload<T>) -> Self {
        Self {
            status: head.status,
            ok: head.status == 200,
            response: head,
            body,
        }
    }

    pub fn is_precached(&self) -> bool {
        matches!(self.body, Payload::Precached { .. })
    }

    pub fn precached_text(&self) -> Option<&str> {
        match &self.body {
            Payload::Precached { text, .. } => Some(text),
            Payload::Deferred(_) => None,
        }
    }

    pub fn precached_json(&self) -> Option<&T> {
        match &self.body {
            Payload::Precached { json, .. } => Some(json),
            Payload::Deferred(_) => None,
        }
    }

    /// The body as text. Invalid UTF-8 is replaced, never rejected.
    pub fn text(&mut self) -> Result<String, RestError> {
        match &mut self.body {
            Payload::Precached { text, .. } => Ok(text.clone()),
            Payload::Deferred(state) => Ok(String::from_utf8_lossy(state.bytes()?).into_owned()),
        }
    }

    /// Consume the wrapper and decode the body as `T`.
    pub fn into_json(self) -> Result<T, RestError> {
        match self.body {
            Payload::Precached { json, .. } => Ok(json),
            Payload::Deferred(mut state) => decode_json(state.bytes()?),
        }
    }

    /// The body decoded as a fresh `T`. `T` need not be `Clone`; a precached
    /// response decodes again from its stored text.
    pub fn json(&mut self) -> Result<T, RestError> {
        match &mut self.body {
            Payload::Precached { text, .. } => decode_json(text.as_bytes()),
            Payload::Deferred(state) => decode_json(state.bytes()?),
        }
    }
}

impl BodyState {
    fn bytes(&mut self) -> Result<&[u8], RestError> {
        // Stays `Consumed` if the read below fails.
        *self = match std::mem::replace(self, BodyState::Consumed) {
            BodyState::Unread(mut reader) => {
                let mut buf = Vec::new();
                reader.read_to_end(&mut buf)?;
                tracing::trace!(len = buf.len(), "buffered deferred response body");
                BodyState::Buffered(buf)
            }
            other => other,
        };
        match self {
            BodyState::Buffered(buf) => Ok(buf.as_slice()),
            _ => Err(RestError::BodyConsumed),
        }
    }
}

fn decode_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, RestError> {
    serde_json::from_slice(bytes).map_err(RestError::Json)
}

impl<T> fmt::Debug for RestResponse<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = match &self.body {
            Payload::Precached { text, .. } => format!("Precached({} bytes)", text.len()),
            Payload::Deferred(BodyState::Unread(_)) => "Deferred(unread)".to_string(),
            Payload::Deferred(BodyState::Buffered(buf)) => {
                format!("Deferred({} bytes)", buf.len())
            }
            Payload::Deferred(BodyState::Consumed) => "Deferred(consumed)".to_string(),
        };
        f.debug_struct("RestResponse")
            .field("status", &self.status)
            .field("ok", &self.ok)
            .field("response", &self.response)
            .field("body", &body)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::io::{self, Cursor};

    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    fn raw(status: u16, body: &str) -> RawResponse {
        RawResponse {
            head: ResponseHead {
                status,
                headers: vec![("content-type".to_string(), "application/json".to_string())],
            },
            body: Box::new(Cursor::new(body.as_bytes().to_vec())),
        }
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"))
        }
    }

    #[derive(Debug, Clone, PartialEq, Deserialize)]
    struct User {
        id: u64,
    }

    #[test]
    fn ok_is_true_only_for_exactly_200() {
        for (status, ok) in [(200, true), (201, false), (204, false), (299, false), (404, false)] {
            let response: RestResponse = RestResponse::deferred(raw(status, ""));
            assert_eq!(response.ok, ok, "status {status}");
            assert_eq!(response.status, status);
        }
    }

    #[test]
    fn precached_values_match_body() {
        let response: RestResponse<User> = RestResponse::precached(raw(200, r#"{"id":1}"#)).unwrap();
        assert!(response.is_precached());
        assert_eq!(response.precached_text(), Some(r#"{"id":1}"#));
        assert_eq!(response.precached_json(), Some(&User { id: 1 }));
    }

    #[test]
    fn precache_fails_fast_on_bad_json() {
        let err = RestResponse::<Value>::precached(raw(200, "not json")).unwrap_err();
        assert!(matches!(err, RestError::Json(_)));
    }

    #[test]
    fn deferred_accessors_resolve_to_same_values() {
        let mut response: RestResponse<User> = RestResponse::deferred(raw(200, r#"{"id":1}"#));
        assert!(!response.is_precached());
        assert_eq!(response.precached_text(), None);
        assert_eq!(response.text().unwrap(), r#"{"id":1}"#);
        assert_eq!(response.json().unwrap(), User { id: 1 });
        assert_eq!(response.json().unwrap(), User { id: 1 });
    }

    #[test]
    fn deferred_json_then_text_reads_body_once() {
        let mut response: RestResponse = RestResponse::deferred(raw(200, r#"{"a":[1,2]}"#));
        assert_eq!(response.json().unwrap(), json!({"a": [1, 2]}));
        assert_eq!(response.text().unwrap(), r#"{"a":[1,2]}"#);
    }

    #[test]
    fn empty_body_is_not_json() {
        let mut response: RestResponse = RestResponse::deferred(raw(204, ""));
        assert!(matches!(response.json().unwrap_err(), RestError::Json(_)));
        assert_eq!(response.text().unwrap(), "");

        let mut response: RestResponse<()> = RestResponse::deferred(raw(200, "  "));
        assert!(matches!(response.json().unwrap_err(), RestError::Json(_)));

        let err = RestResponse::<Option<User>>::precached(raw(204, "")).unwrap_err();
        assert!(matches!(err, RestError::Json(_)));
    }

    #[test]
    fn literal_null_body_still_decodes() {
        let mut response: RestResponse = RestResponse::deferred(raw(200, "null"));
        assert_eq!(response.json().unwrap(), Value::Null);
    }

    /// Deliberately not `Clone`.
    #[derive(Debug, PartialEq, Deserialize)]
    struct Token {
        value: String,
    }

    #[test]
    fn json_works_without_clone_in_both_modes() {
        let body = r#"{"value":"abc"}"#;
        let expected = Token {
            value: "abc".to_string(),
        };

        let mut deferred: RestResponse<Token> = RestResponse::deferred(raw(200, body));
        assert_eq!(deferred.json().unwrap(), expected);

        let mut precached: RestResponse<Token> = RestResponse::precached(raw(200, body)).unwrap();
        assert_eq!(precached.json().unwrap(), expected);
        assert_eq!(precached.json().unwrap(), expected);
        assert_eq!(precached.precached_json(), Some(&expected));
    }

    #[test]
    fn unread_response_crosses_threads() {
        fn assert_send<S: Send>() {}
        assert_send::<RestResponse<User>>();

        let response: RestResponse<User> = RestResponse::deferred(raw(200, r#"{"id":3}"#));
        let mut response = std::thread::spawn(move || response).join().unwrap();
        assert_eq!(response.json().unwrap(), User { id: 3 });
    }

    #[test]
    fn into_json_moves_the_value_out() {
        let response: RestResponse<User> = RestResponse::deferred(raw(200, r#"{"id":7}"#));
        assert_eq!(response.into_json().unwrap(), User { id: 7 });
    }

    #[test]
    fn failed_read_leaves_body_consumed() {
        let mut response: RestResponse = RestResponse::deferred(RawResponse {
            head: ResponseHead {
                status: 200,
                headers: Vec::new(),
            },
            body: Box::new(FailingReader),
        });
        assert!(matches!(response.text().unwrap_err(), RestError::BodyRead(_)));
        assert!(matches!(response.json().unwrap_err(), RestError::BodyConsumed));
    }

    #[test]
    fn text_replaces_invalid_utf8() {
        let mut response: RestResponse = RestResponse::deferred(RawResponse {
            head: ResponseHead {
                status: 200,
                headers: Vec::new(),
            },
            body: Box::new(Cursor::new(vec![b'h', b'i', 0xff])),
        });
        assert_eq!(response.text().unwrap(), "hi\u{fffd}");
    }

    #[test]
    fn debug_does_not_read_the_body() {
        let response: RestResponse = RestResponse::deferred(raw(200, "{}"));
        let rendered = format!("{response:?}");
        assert!(rendered.contains("Deferred(unread)"));
    }
}
