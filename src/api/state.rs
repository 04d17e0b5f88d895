//! Application state shared by every handler.

use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::infra::{Database, UserStore};
use crate::services::{UserManager, UserService};

/// Application state (DI container).
#[derive(Clone)]
pub struct AppState {
    /// User service
    pub user_service: Arc<dyn UserService>,
    pub config: Arc<Config>,
    /// Process start, for the uptime figure
    pub started_at: Instant,
}

impl AppState {
    /// Wire the SeaORM-backed user service over an open database.
    pub fn from_database(database: &Database, config: Config) -> Self {
        let repo = Arc::new(UserStore::new(database.get_connection()));
        Self::new(Arc::new(UserManager::new(repo)), config)
    }

    /// Create application state with a manually injected service.
    pub fn new(user_service: Arc<dyn UserService>, config: Config) -> Self {
        Self {
            user_service,
            config: Arc::new(config),
            started_at: Instant::now(),
        }
    }

    /// Seconds since the state was built.
    pub fn uptime_secs(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }
}
