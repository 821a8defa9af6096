use chess_tally::{
    config::Config,
    db,
    matches::{InMemoryMatchRepository, MatchRepository, PostgresMatchRepository},
    ArchiveSynchronizer, AppState, ChessComClient,
};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chess_tally=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    info!("Starting chess match tracker");

    let match_repository: Arc<dyn MatchRepository> = match &config.database_url {
        Some(database_url) => {
            let pool = db::create_pool(database_url).await?;
            db::ensure_schema(&pool).await?;
            info!("Using PostgreSQL match store");
            Arc::new(PostgresMatchRepository::new(pool))
        }
        None => {
            warn!("DATABASE_URL not set, match records will only live in memory");
            Arc::new(InMemoryMatchRepository::new())
        }
    };

    let archive_source = Arc::new(ChessComClient::new(config.chesscom.clone())?);
    let synchronizer = Arc::new(ArchiveSynchronizer::new(
        archive_source,
        Arc::clone(&match_repository),
    ));

    let app_state = AppState::new(match_repository, synchronizer, config.sync_months);
    let app = chess_tally::create_routes(app_state);

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    info!("Server running on http://{}", config.bind_address());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "Failed to listen for shutdown signal");
    }
}
