//! Stub HTTP server for exercising the REST client end-to-end.
//!
//! Routes:
//! - `GET/POST /users`, `GET/PUT/DELETE /users/{id}`: an in-memory user store
//!   seeded with `{"id":1}`.
//! - `ANY /echo`: reflects the method, content-type and raw body as JSON.
//! - `ANY /status/{code}`: answers with `code` and a plain-text body.
//! - `GET /text`: a fixed plain-text body.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

pub const TEXT_BODY: &str = "hello from the stub server";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Deserialize)]
pub struct NewUser {
    pub name: String,
}

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Echo {
    pub method: String,
    pub content_type: Option<String>,
    pub body: String,
}

#[derive(Clone)]
pub struct Db {
    users: Arc<RwLock<BTreeMap<u64, User>>>,
    next_id: Arc<AtomicU64>,
}

impl Db {
    fn seeded() -> Self {
        let mut users = BTreeMap::new();
        users.insert(1, User { id: 1, name: None });
        Self {
            users: Arc::new(RwLock::new(users)),
            next_id: Arc::new(AtomicU64::new(2)),
        }
    }
}

pub fn app() -> Router {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", get(get_user).put(update_user).delete(delete_user))
        .route("/echo", any(echo))
        .route("/status/{code}", any(status))
        .route("/text", get(text))
        .with_state(Db::seeded())
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_users(State(db): State<Db>) -> Json<Vec<User>> {
    let users = db.users.read().await;
    Json(users.values().cloned().collect())
}

async fn create_user(
    State(db): State<Db>,
    Json(input): Json<NewUser>,
) -> (StatusCode, Json<User>) {
    let id = db.next_id.fetch_add(1, Ordering::Relaxed);
    let user = User {
        id,
        name: Some(input.name),
    };
    db.users.write().await.insert(id, user.clone());
    tracing::debug!(id, "created user");
    (StatusCode::CREATED, Json(user))
}

async fn get_user(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<User>, StatusCode> {
    let users = db.users.read().await;
    users.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_user(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<NewUser>,
) -> Result<Json<User>, StatusCode> {
    let mut users = db.users.write().await;
    let user = users.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    user.name = Some(input.name);
    tracing::debug!(id, "updated user");
    Ok(Json(user.clone()))
}

async fn delete_user(State(db): State<Db>, Path(id): Path<u64>) -> Result<StatusCode, StatusCode> {
    let mut users = db.users.write().await;
    users
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn echo(method: Method, headers: HeaderMap, body: String) -> Json<Echo> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    Json(Echo {
        method: method.to_string(),
        content_type,
        body,
    })
}

async fn status(Path(code): Path<u16>) -> Response {
    match StatusCode::from_u16(code) {
        Ok(status) if (200..600).contains(&code) => (status, format!("status {code}")).into_response(),
        _ => StatusCode::BAD_REQUEST.into_response(),
    }
}

async fn text() -> &'static str {
    TEXT_BODY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_without_name_serializes_to_id_only() {
        let user = User { id: 1, name: None };
        assert_eq!(serde_json::to_string(&user).unwrap(), r#"{"id":1}"#);
    }

    #[test]
    fn user_with_name_serializes_both_fields() {
        let user = User {
            id: 3,
            name: Some("ada".to_string()),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["name"], "ada");
    }

    #[test]
    fn new_user_rejects_missing_name() {
        let result: Result<NewUser, _> = serde_json::from_str(r#"{}"#);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn seeded_db_holds_user_one() {
        let db = Db::seeded();
        let users = db.users.read().await;
        assert_eq!(users.get(&1), Some(&User { id: 1, name: None }));
        assert_eq!(db.next_id.load(Ordering::Relaxed), 2);
    }
}
