//! Behaviour switches for `HttpClient` and `Rest`.
//!
//! Every optional behaviour is declared here on construction; nothing is
//! toggled implicitly. All switches default to off.

use serde::{Deserialize, Serialize};

use crate::error::RestError;

pub const ENV_PRECACHE: &str = "REST_PRECACHE";
pub const ENV_CHECK_STATUS: &str = "REST_CHECK_STATUS";
pub const ENV_PREFIX_SCHEME: &str = "REST_PREFIX_SCHEME";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestConfig {
    /// Read and decode the body before returning the response wrapper.
    ///
    /// A body that is not valid JSON fails the whole call with
    /// `RestError::Json`, even on 4xx/5xx replies, so the status is lost.
    /// Pair with `check_status` to get `RestError::Status` for those instead.
    pub precache: bool,
    /// Fail with `RestError::Status` when the status is outside `200..300`.
    pub check_status: bool,
    /// Prefix `http://` onto URLs that do not start with `http`.
    pub prefix_scheme: bool,
}

impl RestConfig {
    pub fn with_precache(mut self, precache: bool) -> Self {
        self.precache = precache;
        self
    }

    pub fn with_check_status(mut self, check_status: bool) -> Self {
        self.check_status = check_status;
        self
    }

    pub fn with_prefix_scheme(mut self, prefix_scheme: bool) -> Self {
        self.prefix_scheme = prefix_scheme;
        self
    }

    /// Load from `REST_PRECACHE`, `REST_CHECK_STATUS` and `REST_PREFIX_SCHEME`.
    pub fn from_env() -> Result<Self, RestError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Missing keys keep the default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, RestError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(value) = lookup(ENV_PRECACHE) {
            config.precache = parse_flag(ENV_PRECACHE, &value)?;
        }
        if let Some(value) = lookup(ENV_CHECK_STATUS) {
            config.check_status = parse_flag(ENV_CHECK_STATUS, &value)?;
        }
        if let Some(value) = lookup(ENV_PREFIX_SCHEME) {
            config.prefix_scheme = parse_flag(ENV_PREFIX_SCHEME, &value)?;
        }
        Ok(config)
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, RestError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(RestError::InvalidConfig {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
