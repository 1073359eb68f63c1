use application::CourseApp;
use chrono::{Duration, Utc};
use domain::{CourseUpdate, DomainError, LessonStatus, LessonUpdate, User};

async fn signup(app: &CourseApp, username: &str, email: &str) -> User {
    app.user_service
        .signup(username.to_string(), email.to_string(), "hash".to_string())
        .await
        .unwrap()
}

async fn create_course(app: &CourseApp, principal: &str, instructors: Vec<User>) -> domain::Course {
    let start = Utc::now();
    app.course_service
        .create_course(
            Some(principal),
            "Practical Rust".to_string(),
            "A hands-on course".to_string(),
            start,
            start + Duration::days(30),
            instructors.into_iter().map(|u| u.id.into()).collect(),
        )
        .await
        .unwrap()
}

async fn add_lesson(
    app: &CourseApp,
    principal: Option<&str>,
    course_id: uuid::Uuid,
    title: &str,
) -> Result<domain::Lesson, DomainError> {
    app.lesson_service
        .create_lesson(
            principal,
            course_id,
            title.to_string(),
            LessonStatus::Draft,
            Utc::now(),
            "https://videos.example.com/lesson.mp4".to_string(),
        )
        .await
}

#[tokio::test]
async fn signup_rejects_duplicates_case_insensitively() {
    let app = CourseApp::new();
    signup(&app, "alice", "alice@example.com").await;

    let by_username = app
        .user_service
        .signup(
            "ALICE".to_string(),
            "other@example.com".to_string(),
            "hash".to_string(),
        )
        .await;
    assert!(matches!(by_username, Err(DomainError::UsernameTaken(_))));

    let by_email = app
        .user_service
        .signup(
            "bob".to_string(),
            "Alice@Example.com".to_string(),
            "hash".to_string(),
        )
        .await;
    assert!(matches!(by_email, Err(DomainError::EmailTaken(_))));

    // the failed signups left no trace
    assert_eq!(app.user_service.get_all_users().await.unwrap().len(), 1);
}

#[tokio::test]
async fn created_course_is_stamped_with_the_requester() {
    let app = CourseApp::new();
    let alice = signup(&app, "alice", "alice@example.com").await;

    let course = create_course(&app, "alice", vec![]).await;
    assert_eq!(course.creator_id, alice.id);

    let fetched = app.course_service.get_course(course.id).await.unwrap();
    assert_eq!(fetched.creator_id, alice.id);
}

#[tokio::test]
async fn course_creation_requires_a_resolvable_principal() {
    let app = CourseApp::new();
    let start = Utc::now();

    let anonymous = app
        .course_service
        .create_course(
            None,
            "Ghost Course".to_string(),
            String::new(),
            start,
            start + Duration::days(1),
            vec![],
        )
        .await;
    assert!(matches!(anonymous, Err(DomainError::Unauthenticated)));

    let unknown = app
        .course_service
        .create_course(
            Some("nobody"),
            "Ghost Course".to_string(),
            String::new(),
            start,
            start + Duration::days(1),
            vec![],
        )
        .await;
    assert!(matches!(unknown, Err(DomainError::Unauthenticated)));
}

#[tokio::test]
async fn instructors_cannot_mutate_the_course_itself() {
    let app = CourseApp::new();
    signup(&app, "u1", "u1@example.com").await;
    let u2 = signup(&app, "u2", "u2@example.com").await;

    let course = create_course(&app, "u1", vec![u2]).await;

    let update = app
        .course_service
        .update_course(
            course.id,
            Some("u2"),
            CourseUpdate {
                title: Some("Taken over".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(update, Err(DomainError::Forbidden(_))));

    let delete = app.course_service.delete_course(course.id, Some("u2")).await;
    assert!(matches!(delete, Err(DomainError::Forbidden(_))));

    // the course is untouched
    let fetched = app.course_service.get_course(course.id).await.unwrap();
    assert_eq!(fetched.title, "Practical Rust");
}

#[tokio::test]
async fn course_patch_keeps_unnamed_fields() {
    let app = CourseApp::new();
    signup(&app, "u1", "u1@example.com").await;
    let course = create_course(&app, "u1", vec![]).await;

    app.course_service
        .update_course(
            course.id,
            Some("u1"),
            CourseUpdate {
                title: Some("Renamed".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let fetched = app.course_service.get_course(course.id).await.unwrap();
    assert_eq!(fetched.title, "Renamed");
    assert_eq!(fetched.description, course.description);
    assert_eq!(fetched.start_date, course.start_date);
    assert_eq!(fetched.end_date, course.end_date);
    assert_eq!(fetched.instructors, course.instructors);
    assert_eq!(fetched.creator_id, course.creator_id);
}

#[tokio::test]
async fn course_patch_cannot_break_date_ordering() {
    let app = CourseApp::new();
    signup(&app, "u1", "u1@example.com").await;
    let course = create_course(&app, "u1", vec![]).await;

    let result = app
        .course_service
        .update_course(
            course.id,
            Some("u1"),
            CourseUpdate {
                end_date: Some(course.start_date - Duration::days(1)),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(DomainError::ValidationError(_))));
}

#[tokio::test]
async fn lesson_creation_is_limited_to_creator_and_instructors() {
    let app = CourseApp::new();
    signup(&app, "u1", "u1@example.com").await;
    let u2 = signup(&app, "u2", "u2@example.com").await;
    signup(&app, "u3", "u3@example.com").await;

    let course = create_course(&app, "u1", vec![u2]).await;

    assert!(add_lesson(&app, Some("u1"), course.id, "by creator").await.is_ok());
    assert!(add_lesson(&app, Some("u2"), course.id, "by instructor").await.is_ok());

    let stranger = add_lesson(&app, Some("u3"), course.id, "by stranger").await;
    assert!(matches!(stranger, Err(DomainError::Forbidden(_))));

    let anonymous = add_lesson(&app, None, course.id, "by nobody").await;
    assert!(matches!(anonymous, Err(DomainError::Unauthenticated)));
}

#[tokio::test]
async fn lesson_creator_is_assigned_server_side() {
    let app = CourseApp::new();
    signup(&app, "u1", "u1@example.com").await;
    let u2 = signup(&app, "u2", "u2@example.com").await;

    let course = create_course(&app, "u1", vec![u2.clone()]).await;
    let lesson = add_lesson(&app, Some("u2"), course.id, "Ownership").await.unwrap();

    assert_eq!(lesson.creator_id, u2.id);
    assert_eq!(lesson.course_id, course.id);
}

#[tokio::test]
async fn lesson_edits_exclude_non_author_instructors() {
    let app = CourseApp::new();
    signup(&app, "u1", "u1@example.com").await;
    let u2 = signup(&app, "u2", "u2@example.com").await;
    let u4 = signup(&app, "u4", "u4@example.com").await;

    let course = create_course(&app, "u1", vec![u2, u4]).await;
    let lesson = add_lesson(&app, Some("u2"), course.id, "Lifetimes").await.unwrap();

    // u4 is an instructor, but neither the author nor the course creator
    let denied = app
        .lesson_service
        .update_lesson(
            lesson.id,
            Some("u4"),
            LessonUpdate {
                title: Some("Edited".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(denied, Err(DomainError::Forbidden(_))));

    let denied_delete = app.lesson_service.delete_lesson(lesson.id, Some("u4")).await;
    assert!(matches!(denied_delete, Err(DomainError::Forbidden(_))));

    // the course creator can always edit
    let edited = app
        .lesson_service
        .update_lesson(
            lesson.id,
            Some("u1"),
            LessonUpdate {
                title: Some("Edited by creator".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(edited.title, "Edited by creator");

    // and so can the author
    app.lesson_service
        .update_lesson(
            lesson.id,
            Some("u2"),
            LessonUpdate {
                status: Some(LessonStatus::Published),
                ..Default::default()
            },
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn lesson_patch_preserves_course_and_author() {
    let app = CourseApp::new();
    signup(&app, "u1", "u1@example.com").await;
    let course = create_course(&app, "u1", vec![]).await;
    let lesson = add_lesson(&app, Some("u1"), course.id, "Traits").await.unwrap();

    let updated = app
        .lesson_service
        .update_lesson(
            lesson.id,
            Some("u1"),
            LessonUpdate {
                course_id: Some(uuid::Uuid::new_v4()),
                creator_id: Some(uuid::Uuid::new_v4()),
                video_url: Some("https://videos.example.com/traits-v2.mp4".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.course_id, lesson.course_id);
    assert_eq!(updated.creator_id, lesson.creator_id);
    assert_eq!(updated.video_url, "https://videos.example.com/traits-v2.mp4");
}

#[tokio::test]
async fn missing_resources_answer_not_found_before_any_permission_check() {
    let app = CourseApp::new();
    let ghost = uuid::Uuid::new_v4();

    // no identity supplied, yet the answer is not-found, not unauthorized
    let course = app
        .course_service
        .update_course(ghost, None, CourseUpdate::default())
        .await;
    assert!(matches!(course, Err(DomainError::CourseNotFound(_))));

    let lesson = app.lesson_service.delete_lesson(ghost, None).await;
    assert!(matches!(lesson, Err(DomainError::LessonNotFound(_))));
}

#[tokio::test]
async fn deleting_a_course_deletes_its_lessons() {
    let app = CourseApp::new();
    signup(&app, "u1", "u1@example.com").await;
    let course = create_course(&app, "u1", vec![]).await;
    add_lesson(&app, Some("u1"), course.id, "One").await.unwrap();
    add_lesson(&app, Some("u1"), course.id, "Two").await.unwrap();

    app.course_service
        .delete_course(course.id, Some("u1"))
        .await
        .unwrap();

    assert!(app
        .lesson_service
        .lessons_by_course(course.id)
        .await
        .unwrap()
        .is_empty());
}
