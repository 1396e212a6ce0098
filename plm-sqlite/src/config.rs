//! Where the PLM database lives and how connections to it are tuned.

use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqliteSynchronous};
use std::{path::PathBuf, str::FromStr, time::Duration};

const IN_MEMORY: &str = ":memory:";

/// Storage settings for [`Db::open`](crate::Db::open).
///
/// Without a `database_path` the catalog is kept in memory and disappears
/// with the process, which suits tests and demos.
///
/// ```
/// use plm_sqlite::config::SqliteConfig;
///
/// let scratch = SqliteConfig::default();
/// assert!(scratch.is_in_memory());
///
/// let durable = SqliteConfig {
///     database_path: Some("plm.db".into()),
///     ..Default::default()
/// };
/// assert_eq!(durable.location(), "plm.db");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SqliteConfig {
    /// The database file; in memory when absent
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Create the file on first open instead of failing
    #[serde(default = "default_create_if_missing")]
    pub create_if_missing: bool,

    /// How long a statement waits on a locked database, in milliseconds
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

fn default_create_if_missing() -> bool {
    true
}

fn default_busy_timeout_ms() -> u64 {
    5_000
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            create_if_missing: default_create_if_missing(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

impl SqliteConfig {
    /// Whether the catalog lives only as long as its connections.
    pub fn is_in_memory(&self) -> bool {
        self.database_path.is_none()
    }

    /// The database file as shown in logs, or `:memory:`.
    pub fn location(&self) -> String {
        self.database_path
            .as_ref()
            .map_or_else(|| IN_MEMORY.to_owned(), |p| p.to_string_lossy().into_owned())
    }

    /// Connection options: WAL journaling, enforced foreign keys and
    /// generous caches.
    pub fn connect_options(&self) -> Result<SqliteConnectOptions, sqlx::Error> {
        Ok(SqliteConnectOptions::from_str(&self.location())?
            .busy_timeout(Duration::from_millis(self.busy_timeout_ms))
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .pragma("cache_size", "1000000000")
            .pragma("journal_size_limit", "27103364")
            .pragma("mmap_size", "134217728")
            .pragma("temp_store", "memory")
            .create_if_missing(self.create_if_missing))
    }
}
