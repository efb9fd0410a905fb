use anyhow::{Result, anyhow};
use api::{AppState, MIGRATOR, ServiceConfig, config::StorageBackend, create_router};
use common::database::{self, DatabaseConfig, init_pool, run_migrations};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging, RUST_LOG overrides the default level
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow!("Failed to set default subscriber: {}", e))?;

    info!("Starting job board API service");

    let config = ServiceConfig::from_env()?;

    let app_state = match config.storage {
        StorageBackend::Postgres => {
            // Initialize database connection pool
            let db_config = DatabaseConfig::from_env()?;
            let pool = init_pool(&db_config).await?;

            // Check database connectivity
            if database::health_check(&pool).await? {
                info!("Database connection successful");
            } else {
                anyhow::bail!("Failed to connect to database");
            }

            run_migrations(&pool, &MIGRATOR).await?;
            info!("Database migrations applied");

            AppState::with_postgres(pool, config)
        }
        StorageBackend::Memory => {
            info!("Using in-memory storage, data is lost on restart");
            AppState::in_memory(config)
        }
    };

    let address = app_state.config.bind_address();
    let app = create_router(app_state);

    let listener = TcpListener::bind(&address).await?;
    info!("API service listening on {}", address);

    axum::serve(listener, app).await?;

    Ok(())
}
