use rolodex::{AppState, app, database, load_config};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("rolodex=info,tower_http=info")),
        )
        .init();

    let config = load_config()?;

    // Open the database and apply pending migrations before accepting traffic.
    let pool = database::init_pool(&config.database).await?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "starting server");

    let state = AppState::new(pool, config);
    axum::serve(listener, app(state)).await?;

    Ok(())
}
