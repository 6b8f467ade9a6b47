#[cfg(test)]
mod tests {
    use crate::db::{
        create_lesson, delete_lesson, get_all_lessons, get_exercises_by_lesson, get_lesson,
        update_lesson,
    };
    use crate::error::AppError;
    use crate::models::NewLesson;
    use crate::test::test_utils::{TestDbBuilder, create_standard_test_db};

    fn full_lesson(title: &str) -> NewLesson {
        NewLesson {
            title: title.to_string(),
            description: Some("Whole and half steps".to_string()),
            level: Some("beginner".to_string()),
            media_id: Some("media-7".to_string()),
            lesson_link: Some("https://learn.example.com/scales".to_string()),
            lesson_type: Some("theory".to_string()),
        }
    }

    #[rocket::async_test]
    async fn test_create_and_get_lesson() {
        let test_db = TestDbBuilder::new().build().await.expect("Failed to build test database");
        let mut conn = test_db.conn().await;

        let input = full_lesson("Minor Scales");
        let created = create_lesson(&mut conn, &input).await.expect("Failed to create lesson");

        let fetched = get_lesson(&mut conn, created.id).await.expect("Failed to get lesson");
        assert_eq!(fetched, created);
        assert_eq!(fetched.title, input.title);
        assert_eq!(fetched.description, input.description);
        assert_eq!(fetched.level, input.level);
        assert_eq!(fetched.media_id, input.media_id);
        assert_eq!(fetched.lesson_link, input.lesson_link);
        assert_eq!(fetched.lesson_type, input.lesson_type);
    }

    #[rocket::async_test]
    async fn test_get_missing_lesson() {
        let test_db = TestDbBuilder::new().build().await.expect("Failed to build test database");
        let mut conn = test_db.conn().await;

        match get_lesson(&mut conn, 42).await {
            Err(AppError::NotFound(msg)) => assert_eq!(msg, "Lesson not found"),
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[rocket::async_test]
    async fn test_update_lesson_overwrites_every_field() {
        let test_db = TestDbBuilder::new().build().await.expect("Failed to build test database");
        let mut conn = test_db.conn().await;

        let created = create_lesson(&mut conn, &full_lesson("Intervals"))
            .await
            .expect("Failed to create lesson");

        let replacement = NewLesson {
            title: "Intervals, revised".to_string(),
            description: None,
            level: Some("intermediate".to_string()),
            media_id: None,
            lesson_link: None,
            lesson_type: None,
        };

        let updated = update_lesson(&mut conn, created.id, &replacement)
            .await
            .expect("Failed to update lesson");

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "Intervals, revised");
        assert_eq!(updated.description, None);
        assert_eq!(updated.level.as_deref(), Some("intermediate"));
        assert_eq!(updated.lesson_type, None);
    }

    #[rocket::async_test]
    async fn test_update_nonexistent_lesson() {
        let test_db = create_standard_test_db().await;
        let mut conn = test_db.conn().await;

        let before = get_all_lessons(&mut conn).await.expect("Failed to list lessons");
        let result = update_lesson(&mut conn, 9999, &full_lesson("Nope")).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));

        let after = get_all_lessons(&mut conn).await.expect("Failed to list lessons");
        assert_eq!(before, after);
    }

    #[rocket::async_test]
    async fn test_delete_lesson_leaves_exercises_behind() {
        let test_db = create_standard_test_db().await;
        let lesson_id = test_db
            .lesson_id("Reading the Treble Clef")
            .expect("Lesson not seeded");
        let mut conn = test_db.conn().await;

        delete_lesson(&mut conn, lesson_id).await.expect("Failed to delete lesson");

        assert!(matches!(
            get_lesson(&mut conn, lesson_id).await,
            Err(AppError::NotFound(_))
        ));

        let orphans = get_exercises_by_lesson(&mut conn, lesson_id)
            .await
            .expect("Failed to list exercises");
        assert_eq!(orphans.len(), 2, "Deleting a lesson does not cascade");

        assert!(matches!(
            delete_lesson(&mut conn, lesson_id).await,
            Err(AppError::NotFound(_))
        ));
    }
}
