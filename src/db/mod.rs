//! The local place database: connection pool, the four-stage match ladder,
//! the search log used for cache coherence, and the write-through of
//! remote-sourced locations.

pub mod error;
mod log;
mod row;
mod search;
mod writeback;
mod zone;

pub use error::Error;
pub use row::{AltNameRow, AtlasRow, SearchLogRow};
pub use search::MatchStage;

use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use std::time::Duration;

// -----------------------------------------------------------------------------
//
/// Connection settings for the place database.
#[derive(Clone, Debug)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: String,
    pub max_connections: u32,
    pub connect_timeout: Duration,
} // struct

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 3306,
            database: "skyviewcafe".to_string(),
            username: "skyviewcafe".to_string(),
            password: String::new(),
            max_connections: 10,
            connect_timeout: Duration::from_secs(15),
        } // struct
    } // fn
} // impl

// -----------------------------------------------------------------------------
//
/// Handle to the place database. Cheap to clone; all methods borrow a pooled
/// connection for the duration of one query.
#[derive(Clone, Debug)]
pub struct AtlasDb {
    pool: MySqlPool,
} // struct

impl AtlasDb {
    /// Opens the connection pool.
    ///
    /// # Errors
    ///
    /// Fails when the server is unreachable or the credentials are refused.
    pub async fn connect(config: &DbConfig) -> Result<Self, Error> {
        let options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .database(&config.database)
            .username(&config.username)
            .password(&config.password);

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.connect_timeout)
            .connect_with(options)
            .await?;

        tracing::info!(host = %config.host, database = %config.database, "database pool ready");

        Ok(Self { pool })
    } // fn

    /// Wraps an existing pool; used by the server's health check wiring.
    #[must_use]
    pub const fn from_pool(pool: MySqlPool) -> Self {
        Self { pool }
    } // fn

    pub(crate) const fn pool(&self) -> &MySqlPool {
        &self.pool
    } // fn

    /// Liveness probe.
    ///
    /// # Errors
    ///
    /// Fails when a trivial query cannot be executed.
    pub async fn ping(&self) -> Result<(), Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    } // fn
} // impl
