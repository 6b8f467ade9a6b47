use std::path::Path;

use sqlx::SqliteConnection;
use tracing::{info, instrument};

use crate::database::Storage;
use crate::error::AppError;

/// Drops and reloads the whole store from the SQL script at `script_path`.
/// The script runs in a single transaction, so a failing script leaves the
/// store as it was.
#[instrument(skip(storage))]
pub async fn reset_database(storage: &Storage, script_path: &Path) -> Result<(), AppError> {
    info!("Resetting database from script");

    let script = tokio::fs::read_to_string(script_path)
        .await
        .map_err(|e| AppError::Storage(format!("Database reset failed: {}", e)))?;

    let mut tx = storage
        .pool()
        .begin()
        .await
        .map_err(|e| AppError::Storage(format!("Database reset failed: {}", e)))?;

    let conn: &mut SqliteConnection = &mut tx;
    sqlx::Executor::execute(conn, sqlx::raw_sql(&script))
        .await
        .map_err(|e| AppError::Storage(format!("Database reset failed: {}", e)))?;

    tx.commit()
        .await
        .map_err(|e| AppError::Storage(format!("Database reset failed: {}", e)))?;

    info!("Database reset successfully");
    Ok(())
}
