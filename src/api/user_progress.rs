use rocket::http::Status;
use rocket::response::status::Created;
use rocket::serde::json::Json;

use crate::database::UnitOfWork;
use crate::db::{
    create_user_progress, delete_user_progress, get_all_user_progress, get_user_progress,
    update_user_progress,
};
use crate::error::AppError;
use crate::models::{NewUserProgress, UserProgress};

#[get("/user-progress")]
pub async fn api_get_all_user_progress(
    mut uow: UnitOfWork,
) -> Result<Json<Vec<UserProgress>>, AppError> {
    let progress = get_all_user_progress(&mut uow).await?;
    Ok(Json(progress))
}

#[get("/user-progress/<id>")]
pub async fn api_get_user_progress(
    id: i64,
    mut uow: UnitOfWork,
) -> Result<Json<UserProgress>, AppError> {
    let progress = get_user_progress(&mut uow, id).await?;
    Ok(Json(progress))
}

#[post("/user-progress", data = "<progress>")]
pub async fn api_create_user_progress(
    progress: Json<NewUserProgress>,
    mut uow: UnitOfWork,
) -> Result<Created<Json<UserProgress>>, AppError> {
    let created = create_user_progress(&mut uow, &progress).await?;
    uow.commit().await?;

    Ok(Created::new(format!("/user-progress/{}", created.id)).body(Json(created)))
}

#[put("/user-progress/<id>", data = "<progress>")]
pub async fn api_update_user_progress(
    id: i64,
    progress: Json<NewUserProgress>,
    mut uow: UnitOfWork,
) -> Result<Json<UserProgress>, AppError> {
    let updated = update_user_progress(&mut uow, id, &progress).await?;
    uow.commit().await?;

    Ok(Json(updated))
}

#[delete("/user-progress/<id>")]
pub async fn api_delete_user_progress(id: i64, mut uow: UnitOfWork) -> Result<Status, AppError> {
    delete_user_progress(&mut uow, id).await?;
    uow.commit().await?;

    Ok(Status::NoContent)
}
