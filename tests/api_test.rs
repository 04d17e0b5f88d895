//! Integration tests for API endpoints.
//!
//! The full router runs against an in-memory repository, so no database
//! connection is required.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

use users_api::api::{create_router, AppState};
use users_api::config::Config;
use users_api::domain::{NewUser, User, UserChanges, UserInput};
use users_api::errors::{AppError, AppResult};
use users_api::infra::UserRepository;
use users_api::services::{UserManager, UserService};

// =============================================================================
// In-memory repository
// =============================================================================

/// Vec-backed stand-in for the `users` table
#[derive(Default)]
struct InMemoryUsers {
    rows: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn create(&self, user: NewUser) -> AppResult<User> {
        let mut rows = self.rows.lock().unwrap();
        let id = rows.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        let row = User {
            id,
            name: user.name,
            email: user.email,
            // Strictly increasing so newest-first ordering is observable
            created_at: Utc::now() + Duration::milliseconds(id),
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        let mut users = self.rows.lock().unwrap().clone();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        Ok(self.rows.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn update(&self, id: i64, changes: UserChanges) -> AppResult<User> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(AppError::NotFound(id))?;
        if let Some(name) = changes.name {
            row.name = name;
        }
        if let Some(email) = changes.email {
            row.email = email;
        }
        Ok(row.clone())
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|u| u.id != id);
        Ok(rows.len() < before)
    }
}

/// Service whose list operation panics
struct PanickingService;

#[async_trait]
impl UserService for PanickingService {
    async fn create_user(&self, _input: UserInput) -> AppResult<User> {
        Err(AppError::internal("unused"))
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        panic!("list exploded")
    }

    async fn get_user(&self, _id: &str) -> AppResult<User> {
        Err(AppError::internal("unused"))
    }

    async fn update_user(&self, _id: &str, _input: UserInput) -> AppResult<User> {
        Err(AppError::internal("unused"))
    }

    async fn delete_user(&self, _id: &str) -> AppResult<i64> {
        Err(AppError::internal("unused"))
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn app_with(config: Config) -> Router {
    let repo = Arc::new(InMemoryUsers::default());
    create_router(AppState::new(Arc::new(UserManager::new(repo)), config))
}

fn app() -> Router {
    app_with(Config::default())
}

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn create(app: &Router, name: &str, email: &str) -> (StatusCode, Value) {
    send(
        app,
        json_request(Method::POST, "/users", json!({ "name": name, "email": email })),
    )
    .await
}

// =============================================================================
// Index & Health
// =============================================================================

#[tokio::test]
async fn test_index_at_root_and_prefix() {
    let app = app();

    for uri in ["/", "/api"] {
        let (status, body) = send(&app, empty_request(Method::GET, uri)).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Welcome to the API");
        assert_eq!(body["data"]["endpoints"]["users"], "/users");
    }
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send(&app(), empty_request(Method::GET, "/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Server is healthy");
    assert_eq!(body["data"]["status"], "ok");
    assert_eq!(body["data"]["environment"], "development");
    assert!(body["data"]["uptime"].is_number());
    assert!(body["data"]["timestamp"].is_string());
}

#[tokio::test]
async fn test_health_status() {
    let (status, body) = send(&app(), empty_request(Method::GET, "/api/health/status")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "System status retrieved successfully");
    let data = &body["data"];
    assert_eq!(data["status"], "ok");
    assert_eq!(data["platform"], std::env::consts::OS);
    assert_eq!(data["arch"], std::env::consts::ARCH);
    assert!(data["version"].is_string());
    assert!(data["memory"]["rss"].as_str().unwrap().ends_with(" MB"));
    assert!(data["memory"]["systemTotal"].as_str().unwrap().ends_with(" MB"));
}

// =============================================================================
// Users
// =============================================================================

#[tokio::test]
async fn test_create_normalizes_email() {
    let (status, body) = create(&app(), "Ann", "ANN@X.com").await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "User created successfully");
    assert_eq!(body["data"]["user"]["email"], "ann@x.com");
    assert_eq!(body["data"]["user"]["name"], "Ann");
}

#[tokio::test]
async fn test_create_duplicate_email_conflicts() {
    let app = app();
    create(&app, "Ann", "ANN@X.com").await;

    let (status, body) = create(&app, "Ann2", "ann@x.com").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
    assert_eq!(
        body["error"]["details"],
        "This email address is already taken"
    );
}

#[tokio::test]
async fn test_create_invalid_reports_each_rule() {
    let (status, body) = send(
        &app(),
        json_request(Method::POST, "/users", json!({ "name": "  ", "email": 7 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "Validation failed");
    assert_eq!(body["error"]["details"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_create_then_get_returns_same_record() {
    let app = app();
    let (_, created) = create(&app, "Ann", "ann@x.com").await;
    let id = created["data"]["user"]["id"].as_i64().unwrap();

    let (status, body) = send(&app, empty_request(Method::GET, &format!("/users/{}", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User fetched successfully");
    assert_eq!(body["data"]["user"], created["data"]["user"]);
}

#[tokio::test]
async fn test_list_newest_first_with_count() {
    let app = app();
    create(&app, "Ann", "ann@x.com").await;
    create(&app, "Bo", "bo@x.com").await;

    let (status, body) = send(&app, empty_request(Method::GET, "/api/users")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Users fetched successfully");
    assert_eq!(body["data"]["count"], 2);
    assert_eq!(body["data"]["users"][0]["name"], "Bo");
}

#[tokio::test]
async fn test_get_missing_user() {
    let (status, body) = send(&app(), empty_request(Method::GET, "/users/999999")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "User not found");
    assert_eq!(body["error"]["details"], "No user found with ID 999999");
}

#[tokio::test]
async fn test_non_numeric_id_is_bad_request() {
    let app = app();

    for method in [Method::GET, Method::DELETE] {
        let (status, body) = send(&app, empty_request(method, "/users/abc")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Invalid user ID");
    }

    let (status, _) = send(
        &app,
        json_request(Method::PUT, "/users/abc", json!({ "name": "Ann" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_invalid_email_reports_one_detail() {
    let app = app();
    create(&app, "Ann", "ann@x.com").await;

    let (status, body) = send(
        &app,
        json_request(Method::PUT, "/users/1", json!({ "email": "not-an-email" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["details"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_update_partial_fields() {
    let app = app();
    create(&app, "Ann", "ann@x.com").await;

    let (status, body) = send(
        &app,
        json_request(Method::PUT, "/users/1", json!({ "name": " Annie ", "email": "" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User updated successfully");
    assert_eq!(body["data"]["user"]["name"], "Annie");
    assert_eq!(body["data"]["user"]["email"], "ann@x.com");
}

#[tokio::test]
async fn test_update_without_body_keeps_user() {
    let app = app();
    create(&app, "Ann", "ann@x.com").await;

    let (status, body) = send(&app, empty_request(Method::PUT, "/users/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["name"], "Ann");
    assert_eq!(body["data"]["user"]["email"], "ann@x.com");

    let (status, body) = send(&app, empty_request(Method::POST, "/users")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "Validation failed");
    assert_eq!(body["error"]["details"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_update_to_taken_email_conflicts() {
    let app = app();
    create(&app, "Ann", "ann@x.com").await;
    create(&app, "Bo", "bo@x.com").await;

    let (status, body) = send(
        &app,
        json_request(Method::PUT, "/users/1", json!({ "email": "BO@x.com" })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["message"], "Email already exists");
}

#[tokio::test]
async fn test_delete_then_get_not_found() {
    let app = app();
    create(&app, "Ann", "ann@x.com").await;

    let (status, body) = send(&app, empty_request(Method::DELETE, "/users/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User deleted successfully");
    assert_eq!(body["data"]["deletedUserId"], 1);

    let (status, _) = send(&app, empty_request(Method::GET, "/users/1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, empty_request(Method::DELETE, "/users/1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Error paths
// =============================================================================

#[tokio::test]
async fn test_unknown_route() {
    let (status, body) = send(&app(), empty_request(Method::GET, "/nope")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["message"], "Route not found");
    assert_eq!(body["error"]["details"], "Cannot GET /nope");
}

#[tokio::test]
async fn test_unsupported_method_on_known_path() {
    let app = app();
    create(&app, "Ann", "ann@x.com").await;

    for (method, uri) in [
        (Method::PATCH, "/users/1"),
        (Method::POST, "/health"),
        (Method::DELETE, "/users"),
        (Method::PATCH, "/api/users/1"),
        (Method::PUT, "/"),
    ] {
        let (status, body) = send(&app, empty_request(method.clone(), uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{} {}", method, uri);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["message"], "Route not found");
        assert_eq!(
            body["error"]["details"],
            format!("Cannot {} {}", method, uri)
        );
    }
}

#[tokio::test]
async fn test_malformed_json() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/users")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();

    let (status, body) = send(&app(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "Invalid data format");
}

#[tokio::test]
async fn test_oversized_body() {
    let app = app_with(Config {
        max_body_bytes: 64,
        ..Config::default()
    });
    let long_name = "a".repeat(256);

    let (status, body) = create(&app, &long_name, "ann@x.com").await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_panic_becomes_internal_error() {
    let app = create_router(AppState::new(Arc::new(PanickingService), Config::default()));

    let (status, body) = send(&app, empty_request(Method::GET, "/users")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["message"], "list exploded");
}

#[tokio::test]
async fn test_cors_preflight_allows_any_origin() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/users")
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
}
