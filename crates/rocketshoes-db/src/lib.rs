//! # rocketshoes-db: Local Storage for RocketShoes
//!
//! This crate persists the cart snapshot in SQLite via sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  CartStore (rocketshoes-cart)                                          │
//! │       │  Arc<dyn PersistentKv>                                          │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  rocketshoes-db (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────────┐  ┌────────────┐  │   │
//! │  │   │   Database    │    │ KeyValueRepository │  │ Migrations │  │   │
//! │  │   │   (pool.rs)   │◄───│ (repository/kv.rs) │  │ (embedded) │  │   │
//! │  │   └───────────────┘    └────────────────────┘  └────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  rocketshoes.db (local file, WAL mode)                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rocketshoes_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("rocketshoes.db")).await?;
//! let storage = db.key_values();
//! storage.set("@RocketShoes:cart", "[]").await?;
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::kv::KeyValueRepository;
