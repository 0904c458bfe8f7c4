//! # Key-Value Repository
//!
//! String key-value storage on top of the `kv_store` table.
//!
//! ## Role in the Cart
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  CartStore::open ───► get("@RocketShoes:cart") ───► Cart::from_snapshot │
//! │                                                                         │
//! │  successful mutation ───► set("@RocketShoes:cart", "[...]")            │
//! │                                                                         │
//! │  kv_store                                                               │
//! │  ┌──────────────────────┬───────────────────────────┬────────────────┐ │
//! │  │ key                  │ value                     │ updated_at     │ │
//! │  ├──────────────────────┼───────────────────────────┼────────────────┤ │
//! │  │ @RocketShoes:cart    │ [{"id":1,"amount":2,...}] │ 2026-10-19T... │ │
//! │  └──────────────────────┴───────────────────────────┴────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use rocketshoes_core::{CoreResult, PersistentKv};

/// Repository for key-value entries.
#[derive(Debug, Clone)]
pub struct KeyValueRepository {
    pool: SqlitePool,
}

impl KeyValueRepository {
    /// Creates a new KeyValueRepository.
    pub fn new(pool: SqlitePool) -> Self {
        KeyValueRepository { pool }
    }

    /// Reads the value stored under `key`, if any.
    pub async fn get(&self, key: &str) -> DbResult<Option<String>> {
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM kv_store WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(value)
    }

    /// Inserts or replaces the value stored under `key`.
    pub async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        let now = Utc::now();

        debug!(key = %key, bytes = value.len(), "Writing key-value entry");

        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Deletes an entry. Returns true if something was deleted.
    pub async fn delete(&self, key: &str) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM kv_store WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// When the entry was last written.
    pub async fn updated_at(&self, key: &str) -> DbResult<Option<DateTime<Utc>>> {
        let updated_at = sqlx::query_scalar::<_, DateTime<Utc>>(
            "SELECT updated_at FROM kv_store WHERE key = ?1",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated_at)
    }

    /// All keys, sorted.
    pub async fn keys(&self) -> DbResult<Vec<String>> {
        let keys = sqlx::query_scalar::<_, String>("SELECT key FROM kv_store ORDER BY key")
            .fetch_all(&self.pool)
            .await?;

        Ok(keys)
    }
}

#[async_trait]
impl PersistentKv for KeyValueRepository {
    async fn get(&self, key: &str) -> CoreResult<Option<String>> {
        Ok(KeyValueRepository::get(self, key).await?)
    }

    async fn set(&self, key: &str, value: &str) -> CoreResult<()> {
        Ok(KeyValueRepository::set(self, key, value).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
