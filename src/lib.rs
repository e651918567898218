pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod queries;
pub mod services;
pub mod state;
pub mod validation;

pub use config::Config;
pub use database::{DbConn, DbPool};
pub use error::{Error, Result};
pub use state::AppState;

use axum::Router;
use tower_http::trace::TraceLayer;

/// Build the full application router with request tracing.
pub fn app(state: AppState) -> Router {
    handlers::router(state).layer(TraceLayer::new_for_http())
}

/// Load configuration from environment variables
pub fn load_config() -> Result<Config> {
    Ok(Config::load()?)
}
