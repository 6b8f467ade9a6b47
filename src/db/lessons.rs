use sqlx::SqliteConnection;
use tracing::{info, instrument};

use crate::error::AppError;
use crate::models::{DbLesson, Lesson, NewLesson};

#[instrument(skip(conn))]
pub async fn get_all_lessons(conn: &mut SqliteConnection) -> Result<Vec<Lesson>, AppError> {
    info!("Getting all lessons");
    let rows = sqlx::query_as::<_, DbLesson>(
        "SELECT id, title, description, level, media_id, lesson_link, type
         FROM Lessons
         ORDER BY id",
    )
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows.into_iter().map(Lesson::from).collect())
}

#[instrument(skip(conn))]
pub async fn get_lesson(conn: &mut SqliteConnection, id: i64) -> Result<Lesson, AppError> {
    info!("Fetching lesson by ID");
    let row = sqlx::query_as::<_, DbLesson>(
        "SELECT id, title, description, level, media_id, lesson_link, type
         FROM Lessons
         WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    match row {
        Some(lesson) => Ok(Lesson::from(lesson)),
        _ => Err(AppError::not_found("Lesson")),
    }
}

#[instrument(skip(conn), fields(title = %lesson.title))]
pub async fn create_lesson(
    conn: &mut SqliteConnection,
    lesson: &NewLesson,
) -> Result<Lesson, AppError> {
    info!("Creating lesson");
    let row = sqlx::query_as::<_, DbLesson>(
        "INSERT INTO Lessons (title, description, level, media_id, lesson_link, type)
         VALUES (?, ?, ?, ?, ?, ?)
         RETURNING id, title, description, level, media_id, lesson_link, type",
    )
    .bind(&lesson.title)
    .bind(lesson.description.as_deref())
    .bind(lesson.level.as_deref())
    .bind(lesson.media_id.as_deref())
    .bind(lesson.lesson_link.as_deref())
    .bind(lesson.lesson_type.as_deref())
    .fetch_one(&mut *conn)
    .await?;

    Ok(Lesson::from(row))
}

#[instrument(skip(conn), fields(title = %lesson.title))]
pub async fn update_lesson(
    conn: &mut SqliteConnection,
    id: i64,
    lesson: &NewLesson,
) -> Result<Lesson, AppError> {
    info!("Updating lesson");
    let row = sqlx::query_as::<_, DbLesson>(
        "UPDATE Lessons
         SET title = ?, description = ?, level = ?, media_id = ?, lesson_link = ?, type = ?
         WHERE id = ?
         RETURNING id, title, description, level, media_id, lesson_link, type",
    )
    .bind(&lesson.title)
    .bind(lesson.description.as_deref())
    .bind(lesson.level.as_deref())
    .bind(lesson.media_id.as_deref())
    .bind(lesson.lesson_link.as_deref())
    .bind(lesson.lesson_type.as_deref())
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    match row {
        Some(lesson) => Ok(Lesson::from(lesson)),
        _ => Err(AppError::not_found("Lesson")),
    }
}

/// Exercises and progress rows pointing at the lesson are left in place.
#[instrument(skip(conn))]
pub async fn delete_lesson(conn: &mut SqliteConnection, id: i64) -> Result<(), AppError> {
    info!("Deleting lesson");
    let result = sqlx::query("DELETE FROM Lessons WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Lesson"));
    }

    Ok(())
}
