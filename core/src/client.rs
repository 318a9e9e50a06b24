//! The request client: one endpoint in, one parsed JSON value out.
//!
//! # Design
//! `ApiClient` holds only an immutable base path and a shared `Transport`, so
//! clones are cheap and concurrent calls share nothing mutable. A call is
//! split into three steps:
//! - `build_request` joins base path and endpoint, merges options over the
//!   JSON defaults and serializes the body;
//! - the transport executes the request (the only suspension point);
//! - `parse_response` parses the body as JSON and turns non-2xx statuses into
//!   `ApiError::Status`.
//!
//! `request` runs all three and logs one `error` event on any failure before
//! returning it. Hosts that do their own I/O call the two pure steps
//! directly.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::options::{RequestBody, RequestOptions};
use crate::transport::Transport;

/// Prefix prepended to every endpoint.
pub const API_BASE_PATH: &str = "/api";

/// Message used when a failed response carries no `detail`.
pub const FALLBACK_ERROR_MESSAGE: &str = "Something went wrong";

/// Stateless JSON client for the API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_path: String,
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    /// Client rooted at `API_BASE_PATH`.
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self::with_base_path(API_BASE_PATH, transport)
    }

    pub fn with_base_path(base_path: &str, transport: impl Transport + 'static) -> Self {
        Self {
            base_path: base_path.to_string(),
            transport: Arc::new(transport),
        }
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Build the request for `endpoint` without sending it.
    ///
    /// The path is `base_path + endpoint` with no separator handling. A
    /// missing method means GET.
    pub fn build_request(
        &self,
        endpoint: &str,
        options: Option<RequestOptions>,
    ) -> Result<HttpRequest, ApiError> {
        let options = options
            .unwrap_or_default()
            .merged_over(RequestOptions::defaults());
        let body = options.body.map(RequestBody::into_text).transpose()?;

        Ok(HttpRequest {
            method: options.method.unwrap_or_default(),
            path: format!("{}{endpoint}", self.base_path),
            headers: options.headers,
            body,
            credentials: options.credentials,
        })
    }

    /// Parse a response body as JSON, then check the status.
    ///
    /// The body is parsed whatever the status, so a non-JSON error page
    /// surfaces as `Deserialization` rather than `Status`.
    pub fn parse_response(&self, response: HttpResponse) -> Result<Value, ApiError> {
        let data: Value = serde_json::from_str(&response.body)
            .map_err(|e| ApiError::Deserialization(e.to_string()))?;
        if !response.is_success() {
            return Err(ApiError::Status {
                status: response.status,
                message: detail_message(&data),
            });
        }
        Ok(data)
    }

    /// Send one request to `endpoint` and return the parsed JSON body.
    pub async fn request(
        &self,
        endpoint: &str,
        options: Option<RequestOptions>,
    ) -> Result<Value, ApiError> {
        let result = self.round_trip(endpoint, options).await;
        if let Err(err) = &result {
            log_failure(endpoint, err);
        }
        result
    }

    /// Like `request`, then deserialize the body into `T`.
    pub async fn request_as<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: Option<RequestOptions>,
    ) -> Result<T, ApiError> {
        let result = self.round_trip(endpoint, options).await.and_then(|data| {
            serde_json::from_value(data).map_err(|e| ApiError::Deserialization(e.to_string()))
        });
        if let Err(err) = &result {
            log_failure(endpoint, err);
        }
        result
    }

    async fn round_trip(
        &self,
        endpoint: &str,
        options: Option<RequestOptions>,
    ) -> Result<Value, ApiError> {
        let request = self.build_request(endpoint, options)?;
        tracing::debug!(method = %request.method, path = %request.path, "sending API request");
        let response = self.transport.execute(request).await?;
        self.parse_response(response)
    }
}

fn log_failure(endpoint: &str, err: &ApiError) {
    tracing::error!(endpoint, error = %err, "API error");
}

/// The server's `detail`, or the fallback when it is falsy: absent, null,
/// `false`, zero or an empty string. Other non-string details (e.g.
/// validation error lists) are rendered as JSON.
fn detail_message(data: &Value) -> String {
    match data.get("detail") {
        None | Some(Value::Null) | Some(Value::Bool(false)) => FALLBACK_ERROR_MESSAGE.to_string(),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => FALLBACK_ERROR_MESSAGE.to_string(),
        Some(Value::String(detail)) if detail.is_empty() => FALLBACK_ERROR_MESSAGE.to_string(),
        Some(Value::String(detail)) => detail.clone(),
        Some(other) => other.to_string(),
    }
}
