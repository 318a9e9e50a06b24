//! Typed wrappers for the shifa.ai routes.
//!
//! Each method is a thin call to `ApiClient::request_as` with the right
//! method, endpoint and body. Failures are logged by the client.

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::options::RequestOptions;
use crate::types::{ChatMessage, ChatReply, ChatRequest, CreateUser, CreatedUser, Deleted, Health, User};

#[derive(Debug, Clone)]
pub struct ShifaApi {
    client: ApiClient,
}

impl ShifaApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub async fn health(&self) -> Result<Health, ApiError> {
        self.client.request_as("/health", None).await
    }

    pub async fn create_user(&self, input: &CreateUser) -> Result<CreatedUser, ApiError> {
        let opts = RequestOptions::new().method(HttpMethod::Post).json(input)?;
        self.client.request_as("/users/create", Some(opts)).await
    }

    pub async fn send_chat(&self, input: &ChatRequest) -> Result<ChatReply, ApiError> {
        let opts = RequestOptions::new().method(HttpMethod::Post).json(input)?;
        self.client.request_as("/chat/send", Some(opts)).await
    }

    /// Messages for `user_id`, oldest first.
    pub async fn chat_history(&self, user_id: i64) -> Result<Vec<ChatMessage>, ApiError> {
        self.client
            .request_as(&format!("/chat/history/{user_id}"), None)
            .await
    }

    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        self.client.request_as("/admin/users", None).await
    }

    /// Delete a user together with their chat history.
    pub async fn delete_user(&self, user_id: i64) -> Result<Deleted, ApiError> {
        let opts = RequestOptions::new().method(HttpMethod::Delete);
        self.client
            .request_as(&format!("/admin/users/{user_id}"), Some(opts))
            .await
    }
}
