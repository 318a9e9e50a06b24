//! DTOs for the shifa.ai API.
//!
//! # Design
//! These mirror the mock-server's schema but are defined independently, so
//! the integration tests catch schema drift. Timestamps stay as the server's
//! ISO-8601 text.

use serde::{Deserialize, Serialize};

/// `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Health {
    pub status: String,
    pub app: String,
}

/// Request payload for `POST /users/create`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub gender: String,
    pub age: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreatedUser {
    pub user_id: i64,
}

/// Request payload for `POST /chat/send`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub user_id: i64,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatReply {
    pub reply: String,
    pub questions_used: u32,
    pub questions_left: u32,
}

/// One entry of a user's chat history. `role` is `user` or `assistant`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
    pub created_at: String,
}

/// A user as listed by the admin endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub gender: String,
    pub age: u32,
    pub question_count: u32,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deleted {
    pub status: String,
    pub message: String,
}
