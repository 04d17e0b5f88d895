//! User handlers.

use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::extractors::AppJson;
use crate::api::middleware::route_not_found;
use crate::api::AppState;
use crate::domain::{User, UserInput};
use crate::errors::AppResult;
use crate::types::{ApiResponse, Created};

/// Single-user payload
#[derive(Debug, Serialize, ToSchema)]
pub struct UserData {
    pub user: User,
}

/// User list payload
#[derive(Debug, Serialize, ToSchema)]
pub struct UserListData {
    pub users: Vec<User>,
    pub count: usize,
}

/// Delete payload
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeletedUserData {
    pub deleted_user_id: i64,
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_users).post(create_user).fallback(route_not_found),
        )
        .route(
            "/:id",
            get(get_user)
                .put(update_user)
                .delete(delete_user)
                .fallback(route_not_found),
        )
}

/// List all users, newest first
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "All users", body = UserListData),
        (status = 500, description = "Record store failure")
    )
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<ApiResponse<UserListData>> {
    let users = state.user_service.list_users().await?;
    let count = users.len();
    Ok(ApiResponse::with_message(
        UserListData { users, count },
        "Users fetched successfully",
    ))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = UserData),
        (status = 400, description = "Invalid user ID"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<UserData>> {
    let user = state.user_service.get_user(&id).await?;
    Ok(ApiResponse::with_message(
        UserData { user },
        "User fetched successfully",
    ))
}

/// Create a user
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = UserInput,
    responses(
        (status = 201, description = "User created", body = UserData),
        (status = 400, description = "Validation failed or malformed body"),
        (status = 409, description = "Email already taken")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    AppJson(input): AppJson<UserInput>,
) -> AppResult<Created<UserData>> {
    let user = state.user_service.create_user(input).await?;
    Ok(Created(ApiResponse::with_message(
        UserData { user },
        "User created successfully",
    )))
}

/// Partially update a user
///
/// Absent, `null` and empty-string fields keep their stored values.
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    request_body = UserInput,
    responses(
        (status = 200, description = "User updated", body = UserData),
        (status = 400, description = "Invalid ID, validation failed or malformed body"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Email already taken by another user")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<UserInput>,
) -> AppResult<ApiResponse<UserData>> {
    let user = state.user_service.update_user(&id, input).await?;
    Ok(ApiResponse::with_message(
        UserData { user },
        "User updated successfully",
    ))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted", body = DeletedUserData),
        (status = 400, description = "Invalid user ID"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<DeletedUserData>> {
    let deleted_user_id = state.user_service.delete_user(&id).await?;
    Ok(ApiResponse::with_message(
        DeletedUserData { deleted_user_id },
        "User deleted successfully",
    ))
}
