//! Users API - CRUD over user records plus health endpoints.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: User entity, input shapes and validation rules
//! - **services**: Request orchestration
//! - **infra**: Database, repository and system readings
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Response envelopes
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Override bind address
//! cargo run -- serve --host 127.0.0.1 --port 8080
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::User;
pub use errors::{AppError, AppResult};
