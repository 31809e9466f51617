use color_eyre::eyre::Result;
use dotenv::dotenv;
use where2tattoo_api::{config::ApiConfig, ApiState};
use where2tattoo_db::{create_pool, schema::initialize_database, store::PgStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;

    // Create database connection pool
    let db_pool = create_pool(&config.database_url, config.database_max_connections).await?;

    // Initialize database schema
    initialize_database(&db_pool).await?;

    // Start API server
    let state = ApiState::from_store(PgStore::new(db_pool), config.fail_mode);
    where2tattoo_api::start_server(config, state).await?;

    Ok(())
}
