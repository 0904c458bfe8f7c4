//! Startup errors of the CLI.
//!
//! Only wiring faults end up here. Cart operation failures go through the
//! notifier and never change the exit code.

use thiserror::Error;

use crate::config::ConfigError;
use rocketshoes_api::ApiError;
use rocketshoes_db::DbError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("HTTP client error: {0}")]
    Client(#[from] ApiError),

    #[error("Failed to render cart: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CliResult<T> = Result<T, CliError>;
