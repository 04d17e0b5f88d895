//! Health check handlers.
//!
//! Neither endpoint touches the record store.

use axum::{extract::State, routing::get, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::middleware::route_not_found;
use crate::api::AppState;
use crate::config::{API_VERSION, BYTES_PER_MB};
use crate::infra::{memory_snapshot, MemorySnapshot};
use crate::types::ApiResponse;

/// Liveness payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthData {
    #[schema(example = "ok")]
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    /// Seconds since startup
    pub uptime: f64,
    #[schema(example = "development")]
    pub environment: String,
}

/// Memory figures rendered as `"<n> MB"`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemoryData {
    #[schema(example = "42 MB")]
    pub rss: String,
    #[serde(rename = "virtual")]
    pub virtual_memory: String,
    pub system_total: String,
    pub system_used: String,
}

impl From<MemorySnapshot> for MemoryData {
    fn from(snapshot: MemorySnapshot) -> Self {
        Self {
            rss: format_mb(snapshot.rss),
            virtual_memory: format_mb(snapshot.virtual_memory),
            system_total: format_mb(snapshot.system_total),
            system_used: format_mb(snapshot.system_used),
        }
    }
}

/// Detailed status payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct StatusData {
    #[serde(flatten)]
    pub health: HealthData,
    #[schema(example = "0.1.0")]
    pub version: &'static str,
    pub memory: MemoryData,
    #[schema(example = "linux")]
    pub platform: &'static str,
    #[schema(example = "x86_64")]
    pub arch: &'static str,
}

/// Create health routes.
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(health_check).fallback(route_not_found))
        .route("/status", get(system_status).fallback(route_not_found))
}

/// Liveness check
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Server is healthy", body = HealthData)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> ApiResponse<HealthData> {
    ApiResponse::with_message(health_data(&state), "Server is healthy")
}

/// Detailed system status
#[utoipa::path(
    get,
    path = "/health/status",
    tag = "Health",
    responses(
        (status = 200, description = "System status", body = StatusData)
    )
)]
pub async fn system_status(State(state): State<AppState>) -> ApiResponse<StatusData> {
    let data = StatusData {
        health: health_data(&state),
        version: API_VERSION,
        memory: memory_snapshot().into(),
        platform: std::env::consts::OS,
        arch: std::env::consts::ARCH,
    };
    ApiResponse::with_message(data, "System status retrieved successfully")
}

fn health_data(state: &AppState) -> HealthData {
    HealthData {
        status: "ok",
        timestamp: Utc::now(),
        uptime: state.uptime_secs(),
        environment: state.config.environment.clone(),
    }
}

/// Whole megabytes, rounded to nearest.
fn format_mb(bytes: u64) -> String {
    format!("{} MB", (bytes as f64 / BYTES_PER_MB).round() as u64)
}
