#![warn(missing_docs)]
// Note: this overwrites the link in the README to point to the rust docs of the plm-sqlite crate.
//! [plm_core]: https://docs.rs/plm_core/latest/plm_core/index.html
//! [plm_axum]: https://docs.rs/plm_axum/latest/plm_axum/index.html
//! [plm_sqlite]: https://docs.rs/plm_sqlite/latest/plm_sqlite/index.html
#![doc = include_str!("../README.md")]

use sqlx::sqlite;
use tokio::try_join;

pub mod config;
mod r#impl;
pub mod types;

use config::SqliteConfig;

/// SQLite database implementation of the PLM repositories.
///
/// This struct provides separate reader and writer connection pools to a SQLite database,
/// implementing all the repository traits defined in `plm-core`. Writes are serialized
/// through a single connection, which keeps each mutation and its audit entry in one
/// transaction without contention.
///
/// # Connection Management
///
/// - `reader`: A connection pool for read operations, allowing concurrent reads
/// - `writer`: A single-connection pool for write operations, ensuring serialized writes
///
/// # Example
///
/// ```no_run
/// # use plm_sqlite::{Db, config::SqliteConfig};
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = SqliteConfig::default();
/// let db = Db::open(&config).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Db {
    /// Connection pool for read operations
    pub reader: sqlx::Pool<sqlx::Sqlite>,
    /// Connection pool for write operations (limited to 1 connection)
    pub writer: sqlx::Pool<sqlx::Sqlite>,
}

impl Db {
    /// Open a connection to the specified SQLite database.
    ///
    /// Creates a new database if one doesn't exist (when `create_if_missing` is true)
    /// and applies all pending migrations.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if:
    /// - Database connection fails
    /// - Migrations fail to apply
    pub async fn open(config: &SqliteConfig) -> Result<Self, sqlx::Error> {
        let options = config.connect_options()?;

        // An in-memory database lives only as long as a connection to it, so
        // the writer connection is never recycled and also serves reads.
        let writer = sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options.clone());

        let (reader, writer) = if config.is_in_memory() {
            let writer = writer.await?;
            (writer.clone(), writer)
        } else {
            let reader = sqlite::SqlitePoolOptions::new().connect_with(options);
            try_join!(reader, writer)?
        };

        sqlx::migrate!("./schema").run(&writer).await?;

        tracing::debug!(path = %config.location(), "database ready");

        Ok(Self { reader, writer })
    }
}
