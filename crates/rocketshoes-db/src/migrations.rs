//! # Schema Migrations
//!
//! SQL files under `migrations/sqlite/` at the workspace root are compiled
//! into the binary and applied on open.
//!
//! ```text
//! migrations/sqlite/
//! └── 001_key_value_store.sql   kv_store(key PK, value, updated_at)
//! ```
//!
//! Applied versions are tracked in `_sqlx_migrations`. Never edit a shipped
//! file; add the next number instead.

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::DbResult;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Applies every migration not yet recorded.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    debug!(available = MIGRATOR.migrations.len(), "Applying migrations");
    MIGRATOR.run(pool).await?;
    info!("Schema up to date");
    Ok(())
}

/// `(embedded, applied)` migration counts.
pub async fn migration_status(pool: &SqlitePool) -> DbResult<(usize, usize)> {
    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations WHERE success = 1")
        .fetch_one(pool)
        .await?;

    Ok((MIGRATOR.migrations.len(), applied as usize))
}
