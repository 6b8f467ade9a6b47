use rocket::http::Status;
use rocket::response::status::Created;
use rocket::serde::json::Json;

use crate::database::UnitOfWork;
use crate::db::{create_lesson, delete_lesson, get_all_lessons, get_lesson, update_lesson};
use crate::error::AppError;
use crate::models::{Lesson, NewLesson};

#[get("/lessons")]
pub async fn api_get_lessons(mut uow: UnitOfWork) -> Result<Json<Vec<Lesson>>, AppError> {
    let lessons = get_all_lessons(&mut uow).await?;
    Ok(Json(lessons))
}

#[get("/lessons/<id>")]
pub async fn api_get_lesson(id: i64, mut uow: UnitOfWork) -> Result<Json<Lesson>, AppError> {
    let lesson = get_lesson(&mut uow, id).await?;
    Ok(Json(lesson))
}

#[post("/lessons", data = "<lesson>")]
pub async fn api_create_lesson(
    lesson: Json<NewLesson>,
    mut uow: UnitOfWork,
) -> Result<Created<Json<Lesson>>, AppError> {
    let created = create_lesson(&mut uow, &lesson).await?;
    uow.commit().await?;

    Ok(Created::new(format!("/lessons/{}", created.id)).body(Json(created)))
}

#[put("/lessons/<id>", data = "<lesson>")]
pub async fn api_update_lesson(
    id: i64,
    lesson: Json<NewLesson>,
    mut uow: UnitOfWork,
) -> Result<Json<Lesson>, AppError> {
    let updated = update_lesson(&mut uow, id, &lesson).await?;
    uow.commit().await?;

    Ok(Json(updated))
}

#[delete("/lessons/<id>")]
pub async fn api_delete_lesson(id: i64, mut uow: UnitOfWork) -> Result<Status, AppError> {
    delete_lesson(&mut uow, id).await?;
    uow.commit().await?;

    Ok(Status::NoContent)
}
