use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

fn to_utc(dt: NaiveDateTime) -> DateTime<Utc> {
    DateTime::<Utc>::from_naive_utc_and_offset(dt, Utc)
}

/// Parses an ISO-8601 timestamp. Values without an offset are read as UTC.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    match DateTime::parse_from_rfc3339(value) {
        Ok(dt) => Ok(dt.with_timezone(&Utc)),
        Err(_) => value
            .parse::<NaiveDateTime>()
            .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"))
            .map(to_utc),
    }
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|raw| parse_timestamp(&raw).map_err(<D::Error as serde::de::Error>::custom))
        .transpose()
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(sqlx::FromRow, Clone, Default)]
pub struct DbUser {
    pub id: Option<i64>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

impl From<DbUser> for User {
    fn from(user: DbUser) -> Self {
        Self {
            id: user.id.unwrap_or_default(),
            username: user.username.unwrap_or_default(),
            email: user.email,
            avatar_url: user.avatar_url,
            created_at: user.created_at.map(to_utc),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct NewUser {
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Lesson {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub level: Option<String>,
    pub media_id: Option<String>,
    pub lesson_link: Option<String>,
    #[serde(rename = "type")]
    pub lesson_type: Option<String>,
}

#[derive(sqlx::FromRow, Clone, Default)]
pub struct DbLesson {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub level: Option<String>,
    pub media_id: Option<String>,
    pub lesson_link: Option<String>,
    #[sqlx(rename = "type")]
    pub lesson_type: Option<String>,
}

impl From<DbLesson> for Lesson {
    fn from(lesson: DbLesson) -> Self {
        Self {
            id: lesson.id.unwrap_or_default(),
            title: lesson.title.unwrap_or_default(),
            description: lesson.description,
            level: lesson.level,
            media_id: lesson.media_id,
            lesson_link: lesson.lesson_link,
            lesson_type: lesson.lesson_type,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct NewLesson {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub media_id: Option<String>,
    #[serde(default)]
    pub lesson_link: Option<String>,
    #[serde(default, rename = "type")]
    pub lesson_type: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Exercise {
    pub id: i64,
    pub lesson_id: i64,
    pub title: String,
    #[serde(rename = "type")]
    pub exercise_type: Option<String>,
    pub content: Option<String>,
}

#[derive(sqlx::FromRow, Clone, Default)]
pub struct DbExercise {
    pub id: Option<i64>,
    pub lesson_id: Option<i64>,
    pub title: Option<String>,
    #[sqlx(rename = "type")]
    pub exercise_type: Option<String>,
    pub content: Option<String>,
}

impl From<DbExercise> for Exercise {
    fn from(exercise: DbExercise) -> Self {
        Self {
            id: exercise.id.unwrap_or_default(),
            lesson_id: exercise.lesson_id.unwrap_or_default(),
            title: exercise.title.unwrap_or_default(),
            exercise_type: exercise.exercise_type,
            content: exercise.content,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct NewExercise {
    pub lesson_id: i64,
    pub title: String,
    #[serde(default, rename = "type")]
    pub exercise_type: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Song {
    pub id: i64,
    pub title: String,
    pub artist: Option<String>,
    pub level: Option<String>,
    pub sheet_url: Option<String>,
    pub video_id: Option<String>,
}

#[derive(sqlx::FromRow, Clone, Default)]
pub struct DbSong {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub level: Option<String>,
    pub sheet_url: Option<String>,
    pub video_id: Option<String>,
}

impl From<DbSong> for Song {
    fn from(song: DbSong) -> Self {
        Self {
            id: song.id.unwrap_or_default(),
            title: song.title.unwrap_or_default(),
            artist: song.artist,
            level: song.level,
            sheet_url: song.sheet_url,
            video_id: song.video_id,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct NewSong {
    pub title: String,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub sheet_url: Option<String>,
    #[serde(default)]
    pub video_id: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PracticeRoom {
    pub id: i64,
    pub room_name: String,
    pub host_user_id: Option<i64>,
    pub instrument: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(sqlx::FromRow, Clone, Default)]
pub struct DbPracticeRoom {
    pub id: Option<i64>,
    pub room_name: Option<String>,
    pub host_user_id: Option<i64>,
    pub instrument: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

impl From<DbPracticeRoom> for PracticeRoom {
    fn from(room: DbPracticeRoom) -> Self {
        Self {
            id: room.id.unwrap_or_default(),
            room_name: room.room_name.unwrap_or_default(),
            host_user_id: room.host_user_id,
            instrument: room.instrument,
            created_at: room.created_at.map(to_utc),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct NewPracticeRoom {
    pub room_name: String,
    #[serde(default)]
    pub host_user_id: Option<i64>,
    #[serde(default)]
    pub instrument: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserProgress {
    pub id: i64,
    pub user_id: i64,
    pub lesson_id: i64,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(sqlx::FromRow, Clone, Default)]
pub struct DbUserProgress {
    pub id: Option<i64>,
    pub user_id: Option<i64>,
    pub lesson_id: Option<i64>,
    pub completed: Option<bool>,
    pub completed_at: Option<NaiveDateTime>,
}

impl From<DbUserProgress> for UserProgress {
    fn from(progress: DbUserProgress) -> Self {
        Self {
            id: progress.id.unwrap_or_default(),
            user_id: progress.user_id.unwrap_or_default(),
            lesson_id: progress.lesson_id.unwrap_or_default(),
            completed: progress.completed.unwrap_or_default(),
            completed_at: progress.completed_at.map(to_utc),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct NewUserProgress {
    pub user_id: i64,
    pub lesson_id: i64,
    #[serde(default)]
    pub completed: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl NewUserProgress {
    pub fn is_completed(&self) -> bool {
        self.completed.unwrap_or(false)
    }

    pub fn completed_at_naive(&self) -> Option<NaiveDateTime> {
        self.completed_at.map(|dt| dt.naive_utc())
    }
}
