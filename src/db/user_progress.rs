use sqlx::SqliteConnection;
use tracing::{info, instrument};

use crate::error::AppError;
use crate::models::{DbUserProgress, NewUserProgress, UserProgress};

#[instrument(skip(conn))]
pub async fn get_all_user_progress(
    conn: &mut SqliteConnection,
) -> Result<Vec<UserProgress>, AppError> {
    info!("Getting all user progress");
    let rows = sqlx::query_as::<_, DbUserProgress>(
        "SELECT id, user_id, lesson_id, completed, completed_at FROM UserProgress ORDER BY id",
    )
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows.into_iter().map(UserProgress::from).collect())
}

#[instrument(skip(conn))]
pub async fn get_user_progress(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<UserProgress, AppError> {
    info!("Fetching user progress by ID");
    let row = sqlx::query_as::<_, DbUserProgress>(
        "SELECT id, user_id, lesson_id, completed, completed_at FROM UserProgress WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    match row {
        Some(progress) => Ok(UserProgress::from(progress)),
        _ => Err(AppError::not_found("User progress")),
    }
}

#[instrument(skip(conn), fields(user_id = progress.user_id, lesson_id = progress.lesson_id))]
pub async fn create_user_progress(
    conn: &mut SqliteConnection,
    progress: &NewUserProgress,
) -> Result<UserProgress, AppError> {
    info!("Creating user progress");
    let row = sqlx::query_as::<_, DbUserProgress>(
        "INSERT INTO UserProgress (user_id, lesson_id, completed, completed_at)
         VALUES (?, ?, ?, ?)
         RETURNING id, user_id, lesson_id, completed, completed_at",
    )
    .bind(progress.user_id)
    .bind(progress.lesson_id)
    .bind(progress.is_completed())
    .bind(progress.completed_at_naive())
    .fetch_one(&mut *conn)
    .await?;

    Ok(UserProgress::from(row))
}

#[instrument(skip(conn), fields(user_id = progress.user_id, lesson_id = progress.lesson_id))]
pub async fn update_user_progress(
    conn: &mut SqliteConnection,
    id: i64,
    progress: &NewUserProgress,
) -> Result<UserProgress, AppError> {
    info!("Updating user progress");
    let row = sqlx::query_as::<_, DbUserProgress>(
        "UPDATE UserProgress
         SET user_id = ?, lesson_id = ?, completed = ?, completed_at = ?
         WHERE id = ?
         RETURNING id, user_id, lesson_id, completed, completed_at",
    )
    .bind(progress.user_id)
    .bind(progress.lesson_id)
    .bind(progress.is_completed())
    .bind(progress.completed_at_naive())
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    match row {
        Some(progress) => Ok(UserProgress::from(progress)),
        _ => Err(AppError::not_found("User progress")),
    }
}

#[instrument(skip(conn))]
pub async fn delete_user_progress(conn: &mut SqliteConnection, id: i64) -> Result<(), AppError> {
    info!("Deleting user progress");
    let result = sqlx::query("DELETE FROM UserProgress WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("User progress"));
    }

    Ok(())
}
