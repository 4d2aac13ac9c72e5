// src/store/db_connect.rs - Connection pool for the topic store

use anyhow::{Context, Result};
use bb8::Pool;
use bb8_postgres::PostgresConnectionManager;
use log::{debug, info};
use std::env;
use tokio_postgres::NoTls;

pub type PgPool = Pool<PostgresConnectionManager<NoTls>>;

const DEFAULT_MAX_POOL_SIZE: u32 = 8;

/// Build the pool from environment variables. `DATABASE_URL` wins; the
/// individual `POSTGRES_*` variables are the fallback.
pub async fn connect() -> Result<PgPool> {
    let config = if let Ok(url) = env::var("DATABASE_URL") {
        url.parse::<tokio_postgres::Config>()
            .context("Failed to parse DATABASE_URL")?
    } else {
        let mut config = tokio_postgres::Config::new();
        config
            .host(&env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string()))
            .port(
                env::var("POSTGRES_PORT")
                    .unwrap_or_else(|_| "5432".to_string())
                    .parse()
                    .context("POSTGRES_PORT must be a port number")?,
            )
            .user(&env::var("POSTGRES_USER").unwrap_or_else(|_| "postgres".to_string()))
            .dbname(&env::var("POSTGRES_DB").unwrap_or_else(|_| "topics".to_string()));
        if let Ok(password) = env::var("POSTGRES_PASSWORD") {
            config.password(&password);
        }
        config
    };

    let max_size = env::var("POSTGRES_POOL_SIZE")
        .unwrap_or_else(|_| DEFAULT_MAX_POOL_SIZE.to_string())
        .parse()
        .unwrap_or(DEFAULT_MAX_POOL_SIZE);

    debug!("Creating connection pool (max size: {})", max_size);

    let manager = PostgresConnectionManager::new(config, NoTls);
    let pool = Pool::builder()
        .max_size(max_size)
        .build(manager)
        .await
        .context("Failed to build connection pool")?;

    info!("Connection pool ready (max size: {})", max_size);
    Ok(pool)
}

/// (total, available, in use) for progress and summary reporting.
pub fn get_pool_status(pool: &PgPool) -> (u32, u32, u32) {
    let state = pool.state();
    (
        state.connections,
        state.idle_connections,
        state.connections - state.idle_connections,
    )
}
