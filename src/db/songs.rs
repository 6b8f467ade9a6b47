use sqlx::SqliteConnection;
use tracing::{info, instrument};

use crate::error::AppError;
use crate::models::{DbSong, NewSong, Song};

#[instrument(skip(conn))]
pub async fn get_all_songs(conn: &mut SqliteConnection) -> Result<Vec<Song>, AppError> {
    info!("Getting all songs");
    let rows = sqlx::query_as::<_, DbSong>(
        "SELECT id, title, artist, level, sheet_url, video_id FROM Songs ORDER BY id",
    )
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows.into_iter().map(Song::from).collect())
}

#[instrument(skip(conn))]
pub async fn get_song(conn: &mut SqliteConnection, id: i64) -> Result<Song, AppError> {
    info!("Fetching song by ID");
    let row = sqlx::query_as::<_, DbSong>(
        "SELECT id, title, artist, level, sheet_url, video_id FROM Songs WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    match row {
        Some(song) => Ok(Song::from(song)),
        _ => Err(AppError::not_found("Song")),
    }
}

#[instrument(skip(conn), fields(title = %song.title))]
pub async fn create_song(conn: &mut SqliteConnection, song: &NewSong) -> Result<Song, AppError> {
    info!("Creating song");
    let row = sqlx::query_as::<_, DbSong>(
        "INSERT INTO Songs (title, artist, level, sheet_url, video_id)
         VALUES (?, ?, ?, ?, ?)
         RETURNING id, title, artist, level, sheet_url, video_id",
    )
    .bind(&song.title)
    .bind(song.artist.as_deref())
    .bind(song.level.as_deref())
    .bind(song.sheet_url.as_deref())
    .bind(song.video_id.as_deref())
    .fetch_one(&mut *conn)
    .await?;

    Ok(Song::from(row))
}

#[instrument(skip(conn), fields(title = %song.title))]
pub async fn update_song(
    conn: &mut SqliteConnection,
    id: i64,
    song: &NewSong,
) -> Result<Song, AppError> {
    info!("Updating song");
    let row = sqlx::query_as::<_, DbSong>(
        "UPDATE Songs
         SET title = ?, artist = ?, level = ?, sheet_url = ?, video_id = ?
         WHERE id = ?
         RETURNING id, title, artist, level, sheet_url, video_id",
    )
    .bind(&song.title)
    .bind(song.artist.as_deref())
    .bind(song.level.as_deref())
    .bind(song.sheet_url.as_deref())
    .bind(song.video_id.as_deref())
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    match row {
        Some(song) => Ok(Song::from(song)),
        _ => Err(AppError::not_found("Song")),
    }
}

#[instrument(skip(conn))]
pub async fn delete_song(conn: &mut SqliteConnection, id: i64) -> Result<(), AppError> {
    info!("Deleting song");
    let result = sqlx::query("DELETE FROM Songs WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Song"));
    }

    Ok(())
}
