//! # Repository Module
//!
//! Database repository implementations for RocketShoes.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  CartStore                                                             │
//! │       │                                                                 │
//! │       │  storage.set(key, snapshot)      (PersistentKv trait)          │
//! │       ▼                                                                 │
//! │  KeyValueRepository                                                    │
//! │  ├── get(&self, key)                                                   │
//! │  ├── set(&self, key, value)                                            │
//! │  ├── delete(&self, key)                                                │
//! │  └── keys(&self)                                                       │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database (kv_store)                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod kv;
