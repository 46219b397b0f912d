use clinicbook_db::{create_pool, schema::initialize_database, DEFAULT_MAX_CONNECTIONS};
use color_eyre::eyre::{Result, WrapErr};
use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let database_url = std::env::var("DATABASE_URL")
        .wrap_err("DATABASE_URL environment variable must be set")?;

    info!("Connecting to database...");
    let db_pool = create_pool(&database_url, DEFAULT_MAX_CONNECTIONS).await?;

    initialize_database(&db_pool).await?;

    Ok(())
}
