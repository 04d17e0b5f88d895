//! Infrastructure layer - External systems integration
//!
//! - Database connection (the hosted record store)
//! - User repository over the `users` table
//! - Process memory readings

pub mod db;
pub mod repositories;
pub mod system;

pub use db::Database;
pub use repositories::{UserRepository, UserStore};
pub use system::{memory_snapshot, MemorySnapshot};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::MockUserRepository;
