//! Database connection.
//!
//! The `users` table is owned by the hosted database; this module only opens
//! the pool and checks connectivity.

use std::sync::Arc;

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database as SeaDatabase, DatabaseConnection, DbErr, Statement,
};

use crate::config::Config;

/// Database wrapper for connection management.
///
/// The pool is shared through an `Arc`; `DatabaseConnection` itself is not
/// `Clone` when sea-orm's `mock` feature is enabled.
pub struct Database {
    connection: Arc<DatabaseConnection>,
}

impl Database {
    /// Open the connection pool.
    pub async fn connect(config: &Config) -> Result<Self, DbErr> {
        let mut options = ConnectOptions::new(config.database_url.clone());
        options.sqlx_logging(false);

        let connection = SeaDatabase::connect(options).await?;
        tracing::info!("Database connected");

        Ok(Self {
            connection: Arc::new(connection),
        })
    }

    /// Get a shared handle to the connection pool.
    pub fn get_connection(&self) -> Arc<DatabaseConnection> {
        Arc::clone(&self.connection)
    }

    /// Check database connectivity by executing a simple query.
    pub async fn ping(&self) -> Result<(), DbErr> {
        self.connection
            .execute(Statement::from_string(
                self.connection.get_database_backend(),
                "SELECT 1".to_string(),
            ))
            .await?;
        Ok(())
    }
}
