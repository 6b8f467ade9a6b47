use rocket::http::Status;
use rocket::response::status::Created;
use rocket::serde::json::Json;

use crate::database::UnitOfWork;
use crate::db::{
    create_practice_room, delete_practice_room, get_all_practice_rooms, get_practice_room,
    get_practice_rooms_by_host, get_practice_rooms_by_instrument, update_practice_room,
};
use crate::error::AppError;
use crate::models::{NewPracticeRoom, PracticeRoom};

#[get("/practice-rooms")]
pub async fn api_get_practice_rooms(
    mut uow: UnitOfWork,
) -> Result<Json<Vec<PracticeRoom>>, AppError> {
    let rooms = get_all_practice_rooms(&mut uow).await?;
    Ok(Json(rooms))
}

#[get("/practice-rooms/by-user/<user_id>")]
pub async fn api_get_practice_rooms_by_user(
    user_id: i64,
    mut uow: UnitOfWork,
) -> Result<Json<Vec<PracticeRoom>>, AppError> {
    let rooms = get_practice_rooms_by_host(&mut uow, user_id).await?;
    Ok(Json(rooms))
}

#[get("/practice-rooms/by-instrument/<instrument>")]
pub async fn api_get_practice_rooms_by_instrument(
    instrument: &str,
    mut uow: UnitOfWork,
) -> Result<Json<Vec<PracticeRoom>>, AppError> {
    let rooms = get_practice_rooms_by_instrument(&mut uow, instrument).await?;
    Ok(Json(rooms))
}

#[get("/practice-rooms/<id>")]
pub async fn api_get_practice_room(
    id: i64,
    mut uow: UnitOfWork,
) -> Result<Json<PracticeRoom>, AppError> {
    let room = get_practice_room(&mut uow, id).await?;
    Ok(Json(room))
}

#[post("/practice-rooms", data = "<room>")]
pub async fn api_create_practice_room(
    room: Json<NewPracticeRoom>,
    mut uow: UnitOfWork,
) -> Result<Created<Json<PracticeRoom>>, AppError> {
    let created = create_practice_room(&mut uow, &room).await?;
    uow.commit().await?;

    Ok(Created::new(format!("/practice-rooms/{}", created.id)).body(Json(created)))
}

#[put("/practice-rooms/<id>", data = "<room>")]
pub async fn api_update_practice_room(
    id: i64,
    room: Json<NewPracticeRoom>,
    mut uow: UnitOfWork,
) -> Result<Json<PracticeRoom>, AppError> {
    let updated = update_practice_room(&mut uow, id, &room).await?;
    uow.commit().await?;

    Ok(Json(updated))
}

#[delete("/practice-rooms/<id>")]
pub async fn api_delete_practice_room(id: i64, mut uow: UnitOfWork) -> Result<Status, AppError> {
    delete_practice_room(&mut uow, id).await?;
    uow.commit().await?;

    Ok(Status::NoContent)
}
