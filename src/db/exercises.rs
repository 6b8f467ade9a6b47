use sqlx::SqliteConnection;
use tracing::{info, instrument};

use crate::error::AppError;
use crate::models::{DbExercise, Exercise, NewExercise};

#[instrument(skip(conn))]
pub async fn get_all_exercises(conn: &mut SqliteConnection) -> Result<Vec<Exercise>, AppError> {
    info!("Getting all exercises");
    let rows = sqlx::query_as::<_, DbExercise>(
        "SELECT id, lesson_id, title, type, content FROM Exercises ORDER BY id",
    )
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows.into_iter().map(Exercise::from).collect())
}

#[instrument(skip(conn))]
pub async fn get_exercises_by_lesson(
    conn: &mut SqliteConnection,
    lesson_id: i64,
) -> Result<Vec<Exercise>, AppError> {
    info!("Getting exercises for lesson");
    let rows = sqlx::query_as::<_, DbExercise>(
        "SELECT id, lesson_id, title, type, content
         FROM Exercises
         WHERE lesson_id = ?
         ORDER BY id",
    )
    .bind(lesson_id)
    .fetch_all(&mut *conn)
    .await?;

    // An unknown lesson id is just an empty list
    Ok(rows.into_iter().map(Exercise::from).collect())
}

#[instrument(skip(conn))]
pub async fn get_exercise(conn: &mut SqliteConnection, id: i64) -> Result<Exercise, AppError> {
    info!("Fetching exercise by ID");
    let row = sqlx::query_as::<_, DbExercise>(
        "SELECT id, lesson_id, title, type, content FROM Exercises WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    match row {
        Some(exercise) => Ok(Exercise::from(exercise)),
        _ => Err(AppError::not_found("Exercise")),
    }
}

#[instrument(skip(conn), fields(lesson_id = exercise.lesson_id, title = %exercise.title))]
pub async fn create_exercise(
    conn: &mut SqliteConnection,
    exercise: &NewExercise,
) -> Result<Exercise, AppError> {
    info!("Creating exercise");
    let row = sqlx::query_as::<_, DbExercise>(
        "INSERT INTO Exercises (lesson_id, title, type, content)
         VALUES (?, ?, ?, ?)
         RETURNING id, lesson_id, title, type, content",
    )
    .bind(exercise.lesson_id)
    .bind(&exercise.title)
    .bind(exercise.exercise_type.as_deref())
    .bind(exercise.content.as_deref())
    .fetch_one(&mut *conn)
    .await?;

    Ok(Exercise::from(row))
}

#[instrument(skip(conn), fields(lesson_id = exercise.lesson_id, title = %exercise.title))]
pub async fn update_exercise(
    conn: &mut SqliteConnection,
    id: i64,
    exercise: &NewExercise,
) -> Result<Exercise, AppError> {
    info!("Updating exercise");
    let row = sqlx::query_as::<_, DbExercise>(
        "UPDATE Exercises
         SET lesson_id = ?, title = ?, type = ?, content = ?
         WHERE id = ?
         RETURNING id, lesson_id, title, type, content",
    )
    .bind(exercise.lesson_id)
    .bind(&exercise.title)
    .bind(exercise.exercise_type.as_deref())
    .bind(exercise.content.as_deref())
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    match row {
        Some(exercise) => Ok(Exercise::from(exercise)),
        _ => Err(AppError::not_found("Exercise")),
    }
}

#[instrument(skip(conn))]
pub async fn delete_exercise(conn: &mut SqliteConnection, id: i64) -> Result<(), AppError> {
    info!("Deleting exercise");
    let result = sqlx::query("DELETE FROM Exercises WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Exercise"));
    }

    Ok(())
}
