pub mod models;
pub mod repositories;
pub mod schema;
pub mod store;

pub mod mock;

use eyre::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};

pub use store::PgStore;

pub type DbPool = Pool<Postgres>;

pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    Ok(pool)
}
