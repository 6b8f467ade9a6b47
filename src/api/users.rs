use rocket::http::Status;
use rocket::response::status::Created;
use rocket::serde::json::Json;

use crate::database::UnitOfWork;
use crate::db::{
    create_user, delete_user, get_all_users, get_user, get_user_by_email, update_user,
};
use crate::error::AppError;
use crate::models::{NewUser, User};

#[get("/users")]
pub async fn api_get_users(mut uow: UnitOfWork) -> Result<Json<Vec<User>>, AppError> {
    let users = get_all_users(&mut uow).await?;
    Ok(Json(users))
}

#[get("/users/by-email/<email>")]
pub async fn api_get_user_by_email(
    email: &str,
    mut uow: UnitOfWork,
) -> Result<Json<User>, AppError> {
    let user = get_user_by_email(&mut uow, email).await?;
    Ok(Json(user))
}

#[get("/users/<id>")]
pub async fn api_get_user(id: i64, mut uow: UnitOfWork) -> Result<Json<User>, AppError> {
    let user = get_user(&mut uow, id).await?;
    Ok(Json(user))
}

#[post("/users", data = "<user>")]
pub async fn api_create_user(
    user: Json<NewUser>,
    mut uow: UnitOfWork,
) -> Result<Created<Json<User>>, AppError> {
    let created = create_user(&mut uow, &user).await?;
    uow.commit().await?;

    Ok(Created::new(format!("/users/{}", created.id)).body(Json(created)))
}

#[put("/users/<id>", data = "<user>")]
pub async fn api_update_user(
    id: i64,
    user: Json<NewUser>,
    mut uow: UnitOfWork,
) -> Result<Json<User>, AppError> {
    let updated = update_user(&mut uow, id, &user).await?;
    uow.commit().await?;

    Ok(Json(updated))
}

#[delete("/users/<id>")]
pub async fn api_delete_user(id: i64, mut uow: UnitOfWork) -> Result<Status, AppError> {
    delete_user(&mut uow, id).await?;
    uow.commit().await?;

    Ok(Status::NoContent)
}
