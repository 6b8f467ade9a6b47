use sqlx::SqliteConnection;
use tracing::{info, instrument};

use crate::error::AppError;
use crate::models::{DbUser, NewUser, User};

const USER_CONFLICT: &str = "Username or email already exists";

#[instrument(skip(conn))]
pub async fn get_all_users(conn: &mut SqliteConnection) -> Result<Vec<User>, AppError> {
    info!("Getting all users");
    let rows = sqlx::query_as::<_, DbUser>(
        "SELECT id, username, email, avatar_url, created_at FROM Users ORDER BY id",
    )
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows.into_iter().map(User::from).collect())
}

#[instrument(skip(conn))]
pub async fn get_user(conn: &mut SqliteConnection, id: i64) -> Result<User, AppError> {
    info!("Fetching user by ID");
    let row = sqlx::query_as::<_, DbUser>(
        "SELECT id, username, email, avatar_url, created_at FROM Users WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    match row {
        Some(user) => Ok(User::from(user)),
        _ => Err(AppError::not_found("User")),
    }
}

#[instrument(skip(conn))]
pub async fn get_user_by_email(conn: &mut SqliteConnection, email: &str) -> Result<User, AppError> {
    info!("Fetching user by email");
    let row = sqlx::query_as::<_, DbUser>(
        "SELECT id, username, email, avatar_url, created_at FROM Users WHERE email = ?",
    )
    .bind(email)
    .fetch_optional(&mut *conn)
    .await?;

    match row {
        Some(user) => Ok(User::from(user)),
        _ => Err(AppError::not_found("User")),
    }
}

#[instrument(skip(conn), fields(username = %user.username))]
pub async fn create_user(conn: &mut SqliteConnection, user: &NewUser) -> Result<User, AppError> {
    info!("Creating new user");
    let row = sqlx::query_as::<_, DbUser>(
        "INSERT INTO Users (username, email, avatar_url)
         VALUES (?, ?, ?)
         RETURNING id, username, email, avatar_url, created_at",
    )
    .bind(&user.username)
    .bind(user.email.as_deref())
    .bind(user.avatar_url.as_deref())
    .fetch_one(&mut *conn)
    .await
    .map_err(|e| AppError::from_write(e, USER_CONFLICT))?;

    Ok(User::from(row))
}

#[instrument(skip(conn), fields(username = %user.username))]
pub async fn update_user(
    conn: &mut SqliteConnection,
    id: i64,
    user: &NewUser,
) -> Result<User, AppError> {
    info!("Updating user");
    let row = sqlx::query_as::<_, DbUser>(
        "UPDATE Users
         SET username = ?, email = ?, avatar_url = ?
         WHERE id = ?
         RETURNING id, username, email, avatar_url, created_at",
    )
    .bind(&user.username)
    .bind(user.email.as_deref())
    .bind(user.avatar_url.as_deref())
    .bind(id)
    .fetch_optional(&mut *conn)
    .await
    .map_err(|e| AppError::from_write(e, USER_CONFLICT))?;

    match row {
        Some(user) => Ok(User::from(user)),
        _ => Err(AppError::not_found("User")),
    }
}

#[instrument(skip(conn))]
pub async fn delete_user(conn: &mut SqliteConnection, id: i64) -> Result<(), AppError> {
    info!("Deleting user");
    let result = sqlx::query("DELETE FROM Users WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("User"));
    }

    Ok(())
}
