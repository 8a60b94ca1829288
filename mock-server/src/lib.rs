use std::collections::BTreeMap;

use axum::{
    body::Bytes,
    extract::Path,
    http::{header, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::net::TcpListener;

/// Id assigned to every created post, as JSONPlaceholder does.
pub const CREATED_POST_ID: u64 = 101;
pub const MAX_TODO_ID: u32 = 200;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub user_id: u32,
    pub id: u32,
    pub title: String,
    pub completed: bool,
}

impl Todo {
    pub fn fixture(id: u32) -> Self {
        Self {
            user_id: id.saturating_sub(1) / 20 + 1,
            id,
            title: format!("todo {id}"),
            completed: id % 2 == 0,
        }
    }
}

/// What `/echo` saw of the incoming request.
#[derive(Debug, Serialize, Deserialize)]
pub struct Echo {
    pub method: String,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

pub fn app() -> Router {
    Router::new()
        .route("/posts", post(create_post))
        .route("/posts/{id}", delete(delete_post))
        .route("/todos/{id}", get(get_todo))
        .route("/echo", any(echo))
        .route("/status/{code}", get(status))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn create_post(Json(mut input): Json<Map<String, Value>>) -> (StatusCode, Json<Value>) {
    input.insert("id".to_string(), json!(CREATED_POST_ID));
    (StatusCode::CREATED, Json(Value::Object(input)))
}

async fn delete_post(Path(_id): Path<u32>) -> Json<Value> {
    Json(json!({}))
}

// The body ends with a newline so clients see a line terminator to strip.
async fn get_todo(Path(id): Path<u32>) -> Response {
    if !(1..=MAX_TODO_ID).contains(&id) {
        return (StatusCode::NOT_FOUND, Json(json!({}))).into_response();
    }
    match serde_json::to_string(&Todo::fixture(id)) {
        Ok(json) => ([(header::CONTENT_TYPE, "application/json")], format!("{json}\n")).into_response(),
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

async fn echo(method: Method, headers: HeaderMap, body: Bytes) -> Response {
    let echo = Echo {
        method: method.to_string(),
        headers: headers
            .iter()
            .map(|(k, v)| (k.as_str().to_string(), String::from_utf8_lossy(v.as_bytes()).into_owned()))
            .collect(),
        body: String::from_utf8_lossy(&body).into_owned(),
    };
    tracing::debug!(method = %echo.method, bytes = body.len(), "echo");
    match serde_json::to_string_pretty(&echo) {
        Ok(json) => (
            [
                ("content-type", "application/json".to_string()),
                ("x-echo-method", echo.method),
            ],
            json,
        )
            .into_response(),
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

async fn status(Path(code): Path<u16>) -> Response {
    match StatusCode::from_u16(code) {
        Ok(status) if code >= 200 => (status, format!("status {code}\n")).into_response(),
        _ => StatusCode::BAD_REQUEST.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_serializes_with_camel_case_keys() {
        let json = serde_json::to_value(Todo::fixture(1)).unwrap();
        assert_eq!(json["userId"], 1);
        assert_eq!(json["id"], 1);
        assert_eq!(json["title"], "todo 1");
        assert_eq!(json["completed"], false);
    }

    #[test]
    fn todo_fixture_groups_twenty_per_user() {
        assert_eq!(Todo::fixture(20).user_id, 1);
        assert_eq!(Todo::fixture(21).user_id, 2);
        assert_eq!(Todo::fixture(MAX_TODO_ID).user_id, 10);
        assert!(Todo::fixture(2).completed);
    }

    #[test]
    fn todo_fixture_accepts_zero_id() {
        assert_eq!(Todo::fixture(0).user_id, 1);
    }

    #[test]
    fn echo_roundtrips_through_json() {
        let echo = Echo {
            method: "POST".to_string(),
            headers: BTreeMap::from([("content-length".to_string(), "5".to_string())]),
            body: "café".to_string(),
        };
        let json = serde_json::to_string_pretty(&echo).unwrap();
        let back: Echo = serde_json::from_str(&json).unwrap();
        assert_eq!(back.method, "POST");
        assert_eq!(back.headers["content-length"], "5");
        assert_eq!(back.body, "café");
    }
}
