use sqlx::SqliteConnection;
use tracing::{info, instrument};

use crate::error::AppError;
use crate::models::{DbPracticeRoom, NewPracticeRoom, PracticeRoom};

#[instrument(skip(conn))]
pub async fn get_all_practice_rooms(
    conn: &mut SqliteConnection,
) -> Result<Vec<PracticeRoom>, AppError> {
    info!("Getting all practice rooms");
    let rows = sqlx::query_as::<_, DbPracticeRoom>(
        "SELECT id, room_name, host_user_id, instrument, created_at
         FROM PracticeRooms
         ORDER BY id",
    )
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows.into_iter().map(PracticeRoom::from).collect())
}

#[instrument(skip(conn))]
pub async fn get_practice_rooms_by_host(
    conn: &mut SqliteConnection,
    host_user_id: i64,
) -> Result<Vec<PracticeRoom>, AppError> {
    info!("Getting practice rooms hosted by user");
    let rows = sqlx::query_as::<_, DbPracticeRoom>(
        "SELECT id, room_name, host_user_id, instrument, created_at
         FROM PracticeRooms
         WHERE host_user_id = ?
         ORDER BY id",
    )
    .bind(host_user_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows.into_iter().map(PracticeRoom::from).collect())
}

#[instrument(skip(conn))]
pub async fn get_practice_rooms_by_instrument(
    conn: &mut SqliteConnection,
    instrument: &str,
) -> Result<Vec<PracticeRoom>, AppError> {
    info!("Getting practice rooms by instrument");
    let rows = sqlx::query_as::<_, DbPracticeRoom>(
        "SELECT id, room_name, host_user_id, instrument, created_at
         FROM PracticeRooms
         WHERE lower(instrument) = lower(?)
         ORDER BY id",
    )
    .bind(instrument)
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows.into_iter().map(PracticeRoom::from).collect())
}

#[instrument(skip(conn))]
pub async fn get_practice_room(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<PracticeRoom, AppError> {
    info!("Fetching practice room by ID");
    let row = sqlx::query_as::<_, DbPracticeRoom>(
        "SELECT id, room_name, host_user_id, instrument, created_at
         FROM PracticeRooms
         WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    match row {
        Some(room) => Ok(PracticeRoom::from(room)),
        _ => Err(AppError::not_found("Practice room")),
    }
}

#[instrument(skip(conn), fields(room_name = %room.room_name))]
pub async fn create_practice_room(
    conn: &mut SqliteConnection,
    room: &NewPracticeRoom,
) -> Result<PracticeRoom, AppError> {
    info!("Creating practice room");
    let row = sqlx::query_as::<_, DbPracticeRoom>(
        "INSERT INTO PracticeRooms (room_name, host_user_id, instrument)
         VALUES (?, ?, ?)
         RETURNING id, room_name, host_user_id, instrument, created_at",
    )
    .bind(&room.room_name)
    .bind(room.host_user_id)
    .bind(room.instrument.as_deref())
    .fetch_one(&mut *conn)
    .await?;

    Ok(PracticeRoom::from(row))
}

#[instrument(skip(conn), fields(room_name = %room.room_name))]
pub async fn update_practice_room(
    conn: &mut SqliteConnection,
    id: i64,
    room: &NewPracticeRoom,
) -> Result<PracticeRoom, AppError> {
    info!("Updating practice room");
    let row = sqlx::query_as::<_, DbPracticeRoom>(
        "UPDATE PracticeRooms
         SET room_name = ?, host_user_id = ?, instrument = ?
         WHERE id = ?
         RETURNING id, room_name, host_user_id, instrument, created_at",
    )
    .bind(&room.room_name)
    .bind(room.host_user_id)
    .bind(room.instrument.as_deref())
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    match row {
        Some(room) => Ok(PracticeRoom::from(room)),
        _ => Err(AppError::not_found("Practice room")),
    }
}

#[instrument(skip(conn))]
pub async fn delete_practice_room(conn: &mut SqliteConnection, id: i64) -> Result<(), AppError> {
    info!("Deleting practice room");
    let result = sqlx::query("DELETE FROM PracticeRooms WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Practice room"));
    }

    Ok(())
}
