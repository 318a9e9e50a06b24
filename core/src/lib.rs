//! Async JSON client for the shifa.ai API.
//!
//! # Overview
//! `ApiClient::request` takes an endpoint and optional `RequestOptions`,
//! prefixes the endpoint with `/api`, sends JSON by default and returns the
//! parsed response body. Non-2xx responses become `ApiError::Status` carrying
//! the server's `detail` message.
//!
//! # Design
//! - `ApiClient` is stateless: an immutable base path plus a shared
//!   `Transport`.
//! - Request building and response parsing are pure and public, so a host can
//!   do the I/O itself; `ReqwestTransport` is the default network path.
//! - Failures are logged once through `tracing` and then returned unchanged.
//! - `ShifaApi` adds typed wrappers for the backend's routes.

pub mod api;
pub mod client;
pub mod error;
pub mod http;
pub mod options;
pub mod transport;
pub mod types;

#[cfg(test)]
mod testing;

pub use api::ShifaApi;
pub use client::{ApiClient, API_BASE_PATH, FALLBACK_ERROR_MESSAGE};
pub use error::{ApiError, TransportError};
pub use http::{Credentials, HttpMethod, HttpRequest, HttpResponse};
pub use options::{RequestBody, RequestOptions};
pub use transport::{ReqwestTransport, Transport};
pub use types::{ChatMessage, ChatReply, ChatRequest, CreateUser, CreatedUser, Deleted, Health, User};
