//! OpenAPI documentation configuration.
//!
//! Served through Swagger UI. Paths are listed without the `/api` prefix;
//! every route answers under both.

use utoipa::OpenApi;

use crate::api::handlers::{health_handler, index_handler, user_handler};
use crate::domain::{User, UserInput};

/// OpenAPI documentation for the users API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Users API",
        description = "User records CRUD with health and status endpoints"
    ),
    servers(
        (url = "http://localhost:3001", description = "Local development server")
    ),
    paths(
        index_handler::index,
        health_handler::health_check,
        health_handler::system_status,
        user_handler::list_users,
        user_handler::get_user,
        user_handler::create_user,
        user_handler::update_user,
        user_handler::delete_user,
    ),
    components(
        schemas(
            User,
            UserInput,
            user_handler::UserData,
            user_handler::UserListData,
            user_handler::DeletedUserData,
            health_handler::HealthData,
            health_handler::StatusData,
            health_handler::MemoryData,
            index_handler::IndexData,
            index_handler::Endpoints,
        )
    ),
    tags(
        (name = "Index", description = "API entry point"),
        (name = "Health", description = "Liveness and system status"),
        (name = "Users", description = "User management operations")
    )
)]
pub struct ApiDoc;
