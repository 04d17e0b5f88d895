//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain rules and the repository. Handlers depend on
//! the [`UserService`] trait so tests can swap the implementation.

mod user_service;

pub use user_service::{UserManager, UserService};
