//! In-memory stand-in for the shifa.ai backend.
//!
//! Serves the same JSON routes under `/api` and reports failures the same
//! way: a status code plus `{"detail": "..."}`. The AI model is replaced by a
//! fixed reply. Two extra routes exist for client tests: `/api/echo` reflects
//! the request, `/api/fail/{status}` answers with that status and `{}`.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

pub const APP_NAME: &str = "shifa.ai";
pub const MAX_QUESTIONS: u32 = 10;
pub const CANNED_REPLY: &str =
    "I can share general health information, but please consult a qualified healthcare professional for personal advice.";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub gender: String,
    pub age: u32,
    pub question_count: u32,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(skip)]
    pub user_id: i64,
    pub role: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub gender: String,
    pub age: u32,
}

#[derive(Deserialize)]
pub struct ChatRequest {
    pub user_id: i64,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct Store {
    next_id: i64,
    users: BTreeMap<i64, User>,
    messages: Vec<ChatMessage>,
}

pub type Db = Arc<RwLock<Store>>;

/// A handled failure, rendered as `{"detail": ...}`.
#[derive(Debug)]
pub struct DetailError {
    status: StatusCode,
    detail: String,
}

impl DetailError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }
}

impl IntoResponse for DetailError {
    fn into_response(self) -> Response {
        tracing::warn!(status = %self.status, detail = %self.detail, "request rejected");
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}

impl From<JsonRejection> for DetailError {
    fn from(rejection: JsonRejection) -> Self {
        DetailError::new(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text())
    }
}

impl From<PathRejection> for DetailError {
    fn from(rejection: PathRejection) -> Self {
        DetailError::new(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text())
    }
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/api/health", get(health))
        .route("/api/users/create", post(create_user))
        .route("/api/chat/send", post(send_chat))
        .route("/api/chat/history/{user_id}", get(chat_history))
        .route("/api/admin/users", get(list_users))
        .route("/api/admin/users/{user_id}", delete(delete_user))
        .route("/api/echo", post(echo))
        .route("/api/fail/{status}", get(fail))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "app": APP_NAME }))
}

async fn create_user(
    State(db): State<Db>,
    payload: Result<Json<CreateUser>, JsonRejection>,
) -> Result<Json<Value>, DetailError> {
    let Json(input) = payload?;
    let mut store = db.write().await;
    if store.users.values().any(|u| u.name == input.name) {
        return Err(DetailError::new(StatusCode::BAD_REQUEST, "User already exists"));
    }

    store.next_id += 1;
    let user = User {
        id: store.next_id,
        name: input.name,
        gender: input.gender,
        age: input.age,
        question_count: 0,
        created_at: Utc::now(),
    };
    let user_id = user.id;
    store.users.insert(user_id, user);
    Ok(Json(json!({ "user_id": user_id })))
}

async fn send_chat(
    State(db): State<Db>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<Value>, DetailError> {
    let Json(input) = payload?;
    let mut store = db.write().await;
    let question_count = store
        .users
        .get(&input.user_id)
        .map(|u| u.question_count)
        .ok_or_else(|| DetailError::new(StatusCode::NOT_FOUND, "User not found"))?;
    if question_count >= MAX_QUESTIONS {
        return Err(DetailError::new(StatusCode::FORBIDDEN, "Question limit reached"));
    }

    let now = Utc::now();
    store.messages.push(ChatMessage {
        user_id: input.user_id,
        role: "user".to_string(),
        content: input.message,
        created_at: now,
    });
    store.messages.push(ChatMessage {
        user_id: input.user_id,
        role: "assistant".to_string(),
        content: CANNED_REPLY.to_string(),
        created_at: now,
    });

    let used = question_count + 1;
    if let Some(user) = store.users.get_mut(&input.user_id) {
        user.question_count = used;
    }

    Ok(Json(json!({
        "reply": CANNED_REPLY,
        "questions_used": used,
        "questions_left": MAX_QUESTIONS - used,
    })))
}

async fn chat_history(
    State(db): State<Db>,
    user_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Vec<ChatMessage>>, DetailError> {
    let Path(user_id) = user_id?;
    let store = db.read().await;
    let history = store
        .messages
        .iter()
        .filter(|m| m.user_id == user_id)
        .cloned()
        .collect();
    Ok(Json(history))
}

async fn list_users(State(db): State<Db>) -> Json<Vec<User>> {
    let store = db.read().await;
    Json(store.users.values().cloned().collect())
}

async fn delete_user(
    State(db): State<Db>,
    user_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Value>, DetailError> {
    let Path(user_id) = user_id?;
    let mut store = db.write().await;
    if store.users.remove(&user_id).is_none() {
        return Err(DetailError::new(StatusCode::NOT_FOUND, "User not found"));
    }
    store.messages.retain(|m| m.user_id != user_id);
    Ok(Json(json!({
        "status": "success",
        "message": format!("User {user_id} deleted"),
    })))
}

async fn echo(headers: HeaderMap, body: String) -> Json<Value> {
    let headers: BTreeMap<String, String> = headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();
    Json(json!({ "headers": headers, "body": body }))
}

async fn fail(status: Result<Path<u16>, PathRejection>) -> Result<Response, DetailError> {
    let Path(status) = status?;
    let status = StatusCode::from_u16(status)
        .map_err(|_| DetailError::new(StatusCode::BAD_REQUEST, "Invalid status code"))?;
    Ok((status, Json(json!({}))).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_serializes_to_json() {
        let user = User {
            id: 1,
            name: "Ann".to_string(),
            gender: "female".to_string(),
            age: 31,
            question_count: 0,
            created_at: DateTime::<Utc>::from_timestamp(0, 0).unwrap(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["name"], "Ann");
        assert_eq!(json["question_count"], 0);
        assert_eq!(json["created_at"], "1970-01-01T00:00:00Z");
    }

    #[test]
    fn chat_message_hides_owner() {
        let msg = ChatMessage {
            user_id: 4,
            role: "user".to_string(),
            content: "hi".to_string(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert!(json.get("user_id").is_none());
        assert_eq!(json["role"], "user");
    }

    #[test]
    fn create_user_rejects_missing_age() {
        let result: Result<CreateUser, _> =
            serde_json::from_str(r#"{"name":"Ann","gender":"female"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn detail_error_keeps_status() {
        let resp = DetailError::new(StatusCode::FORBIDDEN, "Question limit reached").into_response();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }
}
