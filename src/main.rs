#[macro_use]
extern crate rocket;

mod api;
mod database;
mod db;
mod env;
mod error;
mod models;
mod telemetry;
#[cfg(test)]
mod test;

use std::sync::Mutex;

use api::{
    api_create_exercise, api_create_lesson, api_create_practice_room, api_create_song,
    api_create_user, api_create_user_progress, api_delete_exercise, api_delete_lesson,
    api_delete_practice_room, api_delete_song, api_delete_user, api_delete_user_progress,
    api_get_all_user_progress, api_get_exercise, api_get_exercises, api_get_exercises_by_lesson,
    api_get_lesson, api_get_lessons, api_get_practice_room, api_get_practice_rooms,
    api_get_practice_rooms_by_instrument, api_get_practice_rooms_by_user, api_get_song,
    api_get_songs, api_get_user, api_get_user_by_email, api_get_user_progress, api_get_users,
    api_reset_db, api_update_exercise, api_update_lesson, api_update_practice_room,
    api_update_song, api_update_user, api_update_user_progress, health,
};
use database::Storage;
use env::{AppConfig, load_environment};
use error::{AppError, default_catcher, not_found, unprocessable_entity};
use once_cell::sync::Lazy;
use rocket::fairing::AdHoc;
use rocket::{Build, Rocket};
use telemetry::{OtelGuard, TelemetryFairing, init_tracing, shutdown_telemetry};
use thiserror::Error;
use tracing::info;

pub static TELEMETRY_GUARD: Lazy<Mutex<Option<OtelGuard>>> = Lazy::new(|| Mutex::new(None));

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Anyhow(anyhow::Error),
    #[error("{0}")]
    Rocket(Box<rocket::Error>),
    #[error("{0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("Application error: {0}")]
    App(#[from] AppError),
}

impl From<anyhow::Error> for Error {
    fn from(value: anyhow::Error) -> Self {
        Error::Anyhow(value)
    }
}

impl From<rocket::Error> for Error {
    fn from(value: rocket::Error) -> Self {
        Error::Rocket(Box::new(value))
    }
}

#[rocket::main]
async fn main() -> Result<(), Error> {
    load_environment()?;

    let guard = init_tracing()?;
    if let Ok(mut slot) = TELEMETRY_GUARD.lock() {
        *slot = guard;
    }

    let config = AppConfig::from_env()?;

    let storage = Storage::connect(&config.database_url, config.max_connections).await?;
    storage.migrate().await?;

    let _ = init_rocket(storage, config).launch().await?;

    Ok(())
}

pub fn init_rocket(storage: Storage, config: AppConfig) -> Rocket<Build> {
    info!("Starting music learning API");

    rocket::build()
        .manage(storage)
        .manage(config)
        .mount(
            "/",
            routes![
                api_get_users,
                api_get_user_by_email,
                api_get_user,
                api_create_user,
                api_update_user,
                api_delete_user,
                api_get_lessons,
                api_get_lesson,
                api_create_lesson,
                api_update_lesson,
                api_delete_lesson,
                api_get_exercises,
                api_get_exercises_by_lesson,
                api_get_exercise,
                api_create_exercise,
                api_update_exercise,
                api_delete_exercise,
                api_get_songs,
                api_get_song,
                api_create_song,
                api_update_song,
                api_delete_song,
                api_get_practice_rooms,
                api_get_practice_rooms_by_user,
                api_get_practice_rooms_by_instrument,
                api_get_practice_room,
                api_create_practice_room,
                api_update_practice_room,
                api_delete_practice_room,
                api_get_all_user_progress,
                api_get_user_progress,
                api_create_user_progress,
                api_update_user_progress,
                api_delete_user_progress,
                api_reset_db,
                health,
            ],
        )
        .register("/", catchers![not_found, unprocessable_entity, default_catcher])
        .attach(TelemetryFairing)
        .attach(AdHoc::on_shutdown("Telemetry shutdown", |_| {
            Box::pin(async { shutdown_telemetry() })
        }))
}
