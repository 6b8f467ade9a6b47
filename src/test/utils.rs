#[cfg(test)]
pub mod test_utils {
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::sync::Once;

    use chrono::{DateTime, TimeZone, Utc};

    use rocket::http::{ContentType, Status};
    use rocket::local::asynchronous::{Client, LocalResponse};
    use serde::de::DeserializeOwned;
    use sqlx::Sqlite;
    use sqlx::pool::PoolConnection;

    use crate::database::Storage;
    use crate::db::{
        create_exercise, create_lesson, create_practice_room, create_song, create_user,
        create_user_progress,
    };
    use crate::env::AppConfig;
    use crate::error::AppError;
    use crate::init_rocket;
    use crate::models::{
        NewExercise, NewLesson, NewPracticeRoom, NewSong, NewUser, NewUserProgress,
    };

    static INIT: Once = Once::new();

    pub const RESET_SCRIPT: &str = concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/sql/music_app_schema_with_data.sql"
    );

    pub struct TestExercise {
        pub lesson_title: String,
        pub title: String,
        pub exercise_type: Option<String>,
    }

    pub struct TestPracticeRoom {
        pub room_name: String,
        pub host_username: Option<String>,
        pub instrument: Option<String>,
    }

    pub struct TestProgress {
        pub username: String,
        pub lesson_title: String,
        pub completed: bool,
    }

    #[derive(Default)]
    pub struct TestDbBuilder {
        users: Vec<NewUser>,
        lessons: Vec<NewLesson>,
        exercises: Vec<TestExercise>,
        songs: Vec<NewSong>,
        practice_rooms: Vec<TestPracticeRoom>,
        progress: Vec<TestProgress>,
    }

    impl TestDbBuilder {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn user(mut self, username: &str, email: Option<&str>) -> Self {
            self.users.push(NewUser {
                username: username.to_string(),
                email: email.map(String::from),
                avatar_url: None,
            });
            self
        }

        pub fn lesson(mut self, title: &str, level: Option<&str>) -> Self {
            self.lessons.push(NewLesson {
                title: title.to_string(),
                description: None,
                level: level.map(String::from),
                media_id: None,
                lesson_link: None,
                lesson_type: None,
            });
            self
        }

        pub fn exercise(mut self, lesson_title: &str, title: &str, exercise_type: Option<&str>) -> Self {
            self.exercises.push(TestExercise {
                lesson_title: lesson_title.to_string(),
                title: title.to_string(),
                exercise_type: exercise_type.map(String::from),
            });
            self
        }

        pub fn song(mut self, title: &str, artist: Option<&str>) -> Self {
            self.songs.push(NewSong {
                title: title.to_string(),
                artist: artist.map(String::from),
                level: None,
                sheet_url: None,
                video_id: None,
            });
            self
        }

        pub fn practice_room(
            mut self,
            room_name: &str,
            host_username: Option<&str>,
            instrument: Option<&str>,
        ) -> Self {
            self.practice_rooms.push(TestPracticeRoom {
                room_name: room_name.to_string(),
                host_username: host_username.map(String::from),
                instrument: instrument.map(String::from),
            });
            self
        }

        pub fn progress(mut self, username: &str, lesson_title: &str, completed: bool) -> Self {
            self.progress.push(TestProgress {
                username: username.to_string(),
                lesson_title: lesson_title.to_string(),
                completed,
            });
            self
        }

        pub async fn build(self) -> Result<TestDb, AppError> {
            INIT.call_once(|| {
                let _ = tracing_subscriber::fmt()
                    .with_env_filter(tracing_subscriber::EnvFilter::new("debug"))
                    .with_test_writer()
                    .try_init();
            });

            // One connection keeps every statement against the shared
            // in-memory database strictly ordered.
            let storage = Storage::connect("sqlite::memory:", 1).await?;
            storage.migrate().await?;

            let mut ids = IdMaps::default();
            let mut uow = storage.begin().await?;

            for user in &self.users {
                let created = create_user(&mut uow, user).await?;
                ids.users.insert(created.username.clone(), created.id);
            }

            for lesson in &self.lessons {
                let created = create_lesson(&mut uow, lesson).await?;
                ids.lessons.insert(created.title.clone(), created.id);
            }

            for exercise in &self.exercises {
                let lesson_id = ids.lesson(&exercise.lesson_title)?;
                let created = create_exercise(
                    &mut uow,
                    &NewExercise {
                        lesson_id,
                        title: exercise.title.clone(),
                        exercise_type: exercise.exercise_type.clone(),
                        content: None,
                    },
                )
                .await?;
                ids.exercises.insert(created.title.clone(), created.id);
            }

            for song in &self.songs {
                let created = create_song(&mut uow, song).await?;
                ids.songs.insert(created.title.clone(), created.id);
            }

            for room in &self.practice_rooms {
                let host_user_id = match &room.host_username {
                    Some(username) => Some(ids.user(username)?),
                    None => None,
                };
                let created = create_practice_room(
                    &mut uow,
                    &NewPracticeRoom {
                        room_name: room.room_name.clone(),
                        host_user_id,
                        instrument: room.instrument.clone(),
                    },
                )
                .await?;
                ids.practice_rooms.insert(created.room_name.clone(), created.id);
            }

            for progress in &self.progress {
                let created = create_user_progress(
                    &mut uow,
                    &NewUserProgress {
                        user_id: ids.user(&progress.username)?,
                        lesson_id: ids.lesson(&progress.lesson_title)?,
                        completed: Some(progress.completed),
                        completed_at: progress.completed.then(seeded_completion_time),
                    },
                )
                .await?;
                ids.progress.insert(
                    format!("{}:{}", progress.username, progress.lesson_title),
                    created.id,
                );
            }

            uow.commit().await?;

            Ok(TestDb { storage, ids })
        }
    }

    #[derive(Default)]
    pub struct IdMaps {
        users: HashMap<String, i64>,
        lessons: HashMap<String, i64>,
        exercises: HashMap<String, i64>,
        songs: HashMap<String, i64>,
        practice_rooms: HashMap<String, i64>,
        progress: HashMap<String, i64>,
    }

    impl IdMaps {
        fn user(&self, username: &str) -> Result<i64, AppError> {
            self.users
                .get(username)
                .copied()
                .ok_or_else(|| AppError::NotFound(format!("Test user {} not seeded", username)))
        }

        fn lesson(&self, title: &str) -> Result<i64, AppError> {
            self.lessons
                .get(title)
                .copied()
                .ok_or_else(|| AppError::NotFound(format!("Test lesson {} not seeded", title)))
        }
    }

    pub struct TestDb {
        pub storage: Storage,
        pub ids: IdMaps,
    }

    impl TestDb {
        pub fn user_id(&self, username: &str) -> Option<i64> {
            self.ids.users.get(username).copied()
        }

        pub fn lesson_id(&self, title: &str) -> Option<i64> {
            self.ids.lessons.get(title).copied()
        }

        pub fn exercise_id(&self, title: &str) -> Option<i64> {
            self.ids.exercises.get(title).copied()
        }

        pub fn song_id(&self, title: &str) -> Option<i64> {
            self.ids.songs.get(title).copied()
        }

        pub fn practice_room_id(&self, room_name: &str) -> Option<i64> {
            self.ids.practice_rooms.get(room_name).copied()
        }

        pub fn progress_id(&self, username: &str, lesson_title: &str) -> Option<i64> {
            self.ids
                .progress
                .get(&format!("{}:{}", username, lesson_title))
                .copied()
        }

        pub async fn conn(&self) -> PoolConnection<Sqlite> {
            self.storage
                .pool()
                .acquire()
                .await
                .expect("Failed to acquire connection")
        }
    }

    /// Completion time given to every progress row the builder marks done.
    pub fn seeded_completion_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 1, 18, 30, 0)
            .single()
            .expect("Valid seed timestamp")
    }

    pub fn test_config() -> AppConfig {
        AppConfig {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
            reset_script_path: PathBuf::from(RESET_SCRIPT),
        }
    }

    pub async fn create_standard_test_db() -> TestDb {
        TestDbBuilder::new()
            .user("ada", Some("ada@example.com"))
            .user("miles", Some("miles@example.com"))
            .user("nina", None)
            .lesson("Reading the Treble Clef", Some("beginner"))
            .lesson("Major Scales", Some("beginner"))
            .exercise("Reading the Treble Clef", "Name the notes", Some("quiz"))
            .exercise("Reading the Treble Clef", "Spaces drill", Some("quiz"))
            .exercise("Major Scales", "C major ascending", Some("playing"))
            .song("Ode to Joy", Some("Ludwig van Beethoven"))
            .song("Autumn Leaves", Some("Joseph Kosma"))
            .practice_room("Morning Keys", Some("ada"), Some("Piano"))
            .practice_room("Jazz Jam", Some("miles"), Some("Trumpet"))
            .practice_room("Open Room", None, None)
            .progress("ada", "Reading the Treble Clef", true)
            .progress("ada", "Major Scales", false)
            .build()
            .await
            .expect("Failed to build test database")
    }

    pub async fn setup_test_client(test_db: TestDb) -> (Client, TestDb) {
        let rocket = init_rocket(test_db.storage.clone(), test_config());
        let client = Client::tracked(rocket)
            .await
            .expect("Failed to build rocket client");

        (client, test_db)
    }

    pub async fn post_json<'a>(
        client: &'a Client,
        uri: &str,
        body: serde_json::Value,
    ) -> LocalResponse<'a> {
        client
            .post(uri.to_string())
            .header(ContentType::JSON)
            .body(body.to_string())
            .dispatch()
            .await
    }

    pub async fn put_json<'a>(
        client: &'a Client,
        uri: &str,
        body: serde_json::Value,
    ) -> LocalResponse<'a> {
        client
            .put(uri.to_string())
            .header(ContentType::JSON)
            .body(body.to_string())
            .dispatch()
            .await
    }

    pub async fn read_json<T: DeserializeOwned>(response: LocalResponse<'_>) -> T {
        let body = response.into_string().await.expect("Response had no body");
        serde_json::from_str(&body).expect("Response body was not the expected JSON")
    }

    pub async fn expect_status(response: LocalResponse<'_>, status: Status) -> String {
        assert_eq!(response.status(), status);
        response.into_string().await.unwrap_or_default()
    }
}
