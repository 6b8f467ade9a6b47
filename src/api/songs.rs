use rocket::http::Status;
use rocket::response::status::Created;
use rocket::serde::json::Json;

use crate::database::UnitOfWork;
use crate::db::{create_song, delete_song, get_all_songs, get_song, update_song};
use crate::error::AppError;
use crate::models::{NewSong, Song};

#[get("/songs")]
pub async fn api_get_songs(mut uow: UnitOfWork) -> Result<Json<Vec<Song>>, AppError> {
    let songs = get_all_songs(&mut uow).await?;
    Ok(Json(songs))
}

#[get("/songs/<id>")]
pub async fn api_get_song(id: i64, mut uow: UnitOfWork) -> Result<Json<Song>, AppError> {
    let song = get_song(&mut uow, id).await?;
    Ok(Json(song))
}

#[post("/songs", data = "<song>")]
pub async fn api_create_song(
    song: Json<NewSong>,
    mut uow: UnitOfWork,
) -> Result<Created<Json<Song>>, AppError> {
    let created = create_song(&mut uow, &song).await?;
    uow.commit().await?;

    Ok(Created::new(format!("/songs/{}", created.id)).body(Json(created)))
}

#[put("/songs/<id>", data = "<song>")]
pub async fn api_update_song(
    id: i64,
    song: Json<NewSong>,
    mut uow: UnitOfWork,
) -> Result<Json<Song>, AppError> {
    let updated = update_song(&mut uow, id, &song).await?;
    uow.commit().await?;

    Ok(Json(updated))
}

#[delete("/songs/<id>")]
pub async fn api_delete_song(id: i64, mut uow: UnitOfWork) -> Result<Status, AppError> {
    delete_song(&mut uow, id).await?;
    uow.commit().await?;

    Ok(Status::NoContent)
}
