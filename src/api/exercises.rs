use rocket::http::Status;
use rocket::response::status::Created;
use rocket::serde::json::Json;

use crate::database::UnitOfWork;
use crate::db::{
    create_exercise, delete_exercise, get_all_exercises, get_exercise, get_exercises_by_lesson,
    update_exercise,
};
use crate::error::AppError;
use crate::models::{Exercise, NewExercise};

#[get("/exercises")]
pub async fn api_get_exercises(mut uow: UnitOfWork) -> Result<Json<Vec<Exercise>>, AppError> {
    let exercises = get_all_exercises(&mut uow).await?;
    Ok(Json(exercises))
}

#[get("/exercises/by-lesson/<lesson_id>")]
pub async fn api_get_exercises_by_lesson(
    lesson_id: i64,
    mut uow: UnitOfWork,
) -> Result<Json<Vec<Exercise>>, AppError> {
    let exercises = get_exercises_by_lesson(&mut uow, lesson_id).await?;
    Ok(Json(exercises))
}

#[get("/exercises/<id>")]
pub async fn api_get_exercise(id: i64, mut uow: UnitOfWork) -> Result<Json<Exercise>, AppError> {
    let exercise = get_exercise(&mut uow, id).await?;
    Ok(Json(exercise))
}

#[post("/exercises", data = "<exercise>")]
pub async fn api_create_exercise(
    exercise: Json<NewExercise>,
    mut uow: UnitOfWork,
) -> Result<Created<Json<Exercise>>, AppError> {
    let created = create_exercise(&mut uow, &exercise).await?;
    uow.commit().await?;

    Ok(Created::new(format!("/exercises/{}", created.id)).body(Json(created)))
}

#[put("/exercises/<id>", data = "<exercise>")]
pub async fn api_update_exercise(
    id: i64,
    exercise: Json<NewExercise>,
    mut uow: UnitOfWork,
) -> Result<Json<Exercise>, AppError> {
    let updated = update_exercise(&mut uow, id, &exercise).await?;
    uow.commit().await?;

    Ok(Json(updated))
}

#[delete("/exercises/<id>")]
pub async fn api_delete_exercise(id: i64, mut uow: UnitOfWork) -> Result<Status, AppError> {
    delete_exercise(&mut uow, id).await?;
    uow.commit().await?;

    Ok(Status::NoContent)
}
