//! Server entry point: configuration, database bootstrap, router wiring,
//! graceful shutdown.

use biztrack::{app, db, AppState, Config};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("biztrack=info".parse()?))
        .init();

    let config = Config::from_env()?;
    db::ensure_database_exists(&config.database_url).await?;
    let pool = db::connect(&config.database_url).await?;
    db::ensure_tables(&pool).await?;

    let state = AppState { pool: pool.clone() };
    let listener = TcpListener::bind(config.listen_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
