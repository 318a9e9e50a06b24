//! Per-call request configuration and its merge rules.
//!
//! # Design
//! `RequestOptions` is the typed form of the options a caller hands to
//! `ApiClient::request`. The client starts from `RequestOptions::defaults()`
//! and lays the caller's options over it with `merged_over`:
//! - headers merge by name (ASCII case-insensitive), caller value wins;
//! - every other field is replaced wholesale when the caller sets it.
//!
//! The body is a tagged `RequestBody` rather than an untyped value, so the
//! decision between "send as-is" and "serialize to JSON" is made by the
//! caller's choice of variant.

use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::http::{Credentials, HttpMethod};

pub const CONTENT_TYPE: &str = "Content-Type";
pub const APPLICATION_JSON: &str = "application/json";

/// Request payload.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Pre-serialized text, transmitted verbatim.
    Text(String),
    /// Structured value, serialized to JSON text before transmission.
    Json(Value),
}

impl RequestBody {
    /// Convert any serializable value into a `Json` body.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, ApiError> {
        serde_json::to_value(value)
            .map(RequestBody::Json)
            .map_err(|e| ApiError::Serialization(e.to_string()))
    }

    /// The text that goes on the wire.
    pub fn into_text(self) -> Result<String, ApiError> {
        match self {
            RequestBody::Text(text) => Ok(text),
            RequestBody::Json(value) => {
                serde_json::to_string(&value).map_err(|e| ApiError::Serialization(e.to_string()))
            }
        }
    }
}

impl From<Value> for RequestBody {
    fn from(value: Value) -> Self {
        RequestBody::Json(value)
    }
}

impl From<String> for RequestBody {
    fn from(text: String) -> Self {
        RequestBody::Text(text)
    }
}

impl From<&str> for RequestBody {
    fn from(text: &str) -> Self {
        RequestBody::Text(text.to_string())
    }
}

/// Options for a single request. Unset fields fall back to the defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub method: Option<HttpMethod>,
    pub headers: Vec<(String, String)>,
    pub body: Option<RequestBody>,
    pub credentials: Option<Credentials>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// The options every request starts from: a JSON content type and
    /// nothing else.
    pub fn defaults() -> Self {
        Self {
            headers: vec![(CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string())],
            ..Self::default()
        }
    }

    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = Some(method);
        self
    }

    /// Add a header. A later header with the same name replaces an earlier
    /// one.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        set_header(&mut self.headers, name.into(), value.into());
        self
    }

    pub fn body(mut self, body: impl Into<RequestBody>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set a `Json` body from any serializable value.
    pub fn json<T: Serialize + ?Sized>(mut self, value: &T) -> Result<Self, ApiError> {
        self.body = Some(RequestBody::json(value)?);
        Ok(self)
    }

    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Lay `self` over `defaults`. Caller headers override default headers
    /// of the same name; any other field set by the caller replaces the
    /// default.
    pub fn merged_over(self, defaults: RequestOptions) -> RequestOptions {
        let mut headers = defaults.headers;
        for (name, value) in self.headers {
            set_header(&mut headers, name, value);
        }
        RequestOptions {
            method: self.method.or(defaults.method),
            headers,
            body: self.body.or(defaults.body),
            credentials: self.credentials.or(defaults.credentials),
        }
    }
}

/// Replace the first header named `name` in place, or append it.
fn set_header(headers: &mut Vec<(String, String)>, name: String, value: String) {
    match headers.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(&name)) {
        Some(slot) => *slot = (name, value),
        None => headers.push((name, value)),
    }
}
