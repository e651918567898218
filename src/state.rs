use crate::{config::Config, database::DbPool};

/// Application state shared across all HTTP handlers
///
/// This struct contains shared resources that need to be accessed
/// by request handlers, such as the database pool and configuration.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing the database
    pub pool: DbPool,
    /// Loaded application configuration
    pub config: Config,
}

impl AppState {
    /// Create a new AppState instance
    pub fn new(pool: DbPool, config: Config) -> Self {
        Self { pool, config }
    }
}
