//! # Storage Handle
//!
//! Opens the SQLite file that holds the cart snapshot.
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  CartConfig::database_path()                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbConfig::new(path)            in tests: DbConfig::in_memory()        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new(config).await    WAL, busy timeout, kv_store migrated   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  db.key_values()  ──►  Arc<dyn PersistentKv> handed to CartStore       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Two `rocketshoes` processes may touch the same file. WAL lets one read
//! while the other writes; the busy timeout makes a second writer wait
//! instead of failing with `SQLITE_BUSY`.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::kv::KeyValueRepository;

const IN_MEMORY: &str = ":memory:";

// =============================================================================
// Configuration
// =============================================================================

/// How to open the key-value database.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("/var/lib/rocketshoes/cart.db")
///     .busy_timeout(Duration::from_secs(2))
///     .migrate(false);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// SQLite file, or `:memory:`.
    pub path: PathBuf,

    /// Pool size. The cart writes one row at a time, so this stays small.
    /// Default: 2
    pub max_connections: u32,

    /// How long a writer waits for another process's lock.
    /// Default: 5 seconds
    pub busy_timeout: Duration,

    /// How long to wait for a free pooled connection.
    /// Default: 10 seconds
    pub acquire_timeout: Duration,

    /// Apply embedded migrations on open.
    /// Default: true
    pub migrate: bool,
}

impl DbConfig {
    /// File-backed database at `path`, created on first open.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            path: path.into(),
            max_connections: 2,
            busy_timeout: Duration::from_secs(5),
            acquire_timeout: Duration::from_secs(10),
            migrate: true,
        }
    }

    /// Private in-memory database.
    ///
    /// Each pool connection to `:memory:` would see its own empty database,
    /// so the pool is pinned to one connection.
    pub fn in_memory() -> Self {
        DbConfig {
            max_connections: 1,
            ..DbConfig::new(IN_MEMORY)
        }
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    pub fn migrate(mut self, migrate: bool) -> Self {
        self.migrate = migrate;
        self
    }

    fn is_in_memory(&self) -> bool {
        self.path.as_os_str() == IN_MEMORY
    }

    fn connect_options(&self) -> DbResult<SqliteConnectOptions> {
        let options = if self.is_in_memory() {
            SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
        } else {
            SqliteConnectOptions::new()
                .filename(&self.path)
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
        };

        Ok(options
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(self.busy_timeout))
    }
}

// =============================================================================
// Database
// =============================================================================

/// Open key-value database.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens (and by default migrates) the database.
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(path = %config.path.display(), "Opening key-value database");

        let options = config.connect_options()?;
        debug!(busy_timeout = ?config.busy_timeout, "SQLite options ready");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect_with(options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        let db = Database { pool };
        if config.migrate {
            db.run_migrations().await?;
        }

        Ok(db)
    }

    /// Applies pending migrations. Safe to call repeatedly.
    pub async fn run_migrations(&self) -> DbResult<()> {
        migrations::run_migrations(&self.pool).await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Repository over the `kv_store` table.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let storage: Arc<dyn PersistentKv> = Arc::new(db.key_values());
    /// ```
    pub fn key_values(&self) -> KeyValueRepository {
        KeyValueRepository::new(self.pool.clone())
    }

    /// Closes every connection. Later queries fail with `ConnectionFailed`.
    pub async fn close(&self) {
        info!("Closing key-value database");
        self.pool.close().await;
    }

    /// True if a trivial query succeeds.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_database_is_migrated() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        assert!(db.health_check().await);
        let (total, applied) = migrations::migration_status(db.pool()).await.unwrap();
        assert_eq!(total, applied);
        assert!(total >= 1);
    }

    #[test]
    fn test_config_defaults_and_builders() {
        let config = DbConfig::new("/tmp/cart.db")
            .max_connections(3)
            .busy_timeout(Duration::from_millis(250))
            .migrate(false);

        assert_eq!(config.max_connections, 3);
        assert_eq!(config.busy_timeout, Duration::from_millis(250));
        assert!(!config.migrate);
        assert!(!config.is_in_memory());

        let memory = DbConfig::in_memory();
        assert!(memory.is_in_memory());
        assert_eq!(memory.max_connections, 1);
    }

    #[tokio::test]
    async fn test_file_database_survives_reopen() {
        let path = std::env::temp_dir().join(format!("rocketshoes-pool-{}.db", std::process::id()));

        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        db.key_values().set("k", "v").await.unwrap();
        db.close().await;

        let reopened = Database::new(DbConfig::new(&path)).await.unwrap();
        assert_eq!(
            reopened.key_values().get("k").await.unwrap().as_deref(),
            Some("v")
        );
        reopened.close().await;

        for suffix in ["", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{}{}", path.display(), suffix));
        }
    }

    #[tokio::test]
    async fn test_closed_database_fails_health_check() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.close().await;

        assert!(!db.health_check().await);
    }
}
