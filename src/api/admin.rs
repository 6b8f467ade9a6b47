use rocket::State;
use rocket::serde::json::Json;

use crate::database::{Storage, reset_database};
use crate::env::AppConfig;
use crate::error::{AppError, ErrorResponse};

/// Wipes every table and reloads the bundled schema and seed data.
#[post("/reset-db")]
pub async fn api_reset_db(
    storage: &State<Storage>,
    config: &State<AppConfig>,
) -> Result<Json<ErrorResponse>, AppError> {
    reset_database(storage, &config.reset_script_path).await?;

    Ok(Json(ErrorResponse::new("Database reset successfully.")))
}

#[get("/health")]
pub fn health() -> &'static str {
    "OK"
}
