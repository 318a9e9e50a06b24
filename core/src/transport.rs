//! The network boundary.
//!
//! `ApiClient` never talks to the network itself; it hands a finished
//! `HttpRequest` to a `Transport` and waits for the `HttpResponse`.
//! `ReqwestTransport` is the stock implementation. Tests and embedding hosts
//! supply their own.

use std::fmt;

use async_trait::async_trait;

use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Executes one HTTP round-trip.
///
/// Implementations must not retry, and must return any status code as data
/// rather than as an error.
#[async_trait]
pub trait Transport: fmt::Debug + Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// `Transport` backed by a `reqwest::Client`.
///
/// Request paths are appended to `origin`, the way a browser resolves a
/// relative URL against the page it was loaded from. No timeout is set beyond
/// reqwest's own behavior.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    origin: String,
    inner: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(origin: &str) -> Self {
        Self::with_client(origin, reqwest::Client::new())
    }

    pub fn with_client(origin: &str, client: reqwest::Client) -> Self {
        Self {
            origin: origin.trim_end_matches('/').to_string(),
            inner: client,
        }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.origin, path)
    }
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    // `credentials` is not consulted: a bare reqwest client has no cookie
    // jar or ambient auth to attach.
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self
            .inner
            .request(to_reqwest_method(request.method), self.url(&request.path));
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.text().await?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
