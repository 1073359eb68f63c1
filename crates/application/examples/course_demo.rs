use application::CourseApp;
use chrono::{Duration, Utc};
use domain::LessonStatus;

/// Walk through the full service flow without the HTTP layer:
/// signup -> course creation -> instructor lesson -> policy denial.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let app = CourseApp::new();

    let alice = app
        .user_service
        .signup(
            "alice".to_string(),
            "alice@example.com".to_string(),
            "not-a-real-hash".to_string(),
        )
        .await?;
    let bob = app
        .user_service
        .signup(
            "bob".to_string(),
            "bob@example.com".to_string(),
            "not-a-real-hash".to_string(),
        )
        .await?;
    println!("👤 Signed up alice ({}) and bob ({})", alice.id, bob.id);

    let start = Utc::now();
    let course = app
        .course_service
        .create_course(
            Some("alice"),
            "Practical Rust".to_string(),
            "Ownership, traits, async".to_string(),
            start,
            start + Duration::days(30),
            vec![bob.id.into()],
        )
        .await?;
    println!("📚 Created course '{}' owned by alice", course.title);

    let lesson = app
        .lesson_service
        .create_lesson(
            Some("bob"),
            course.id,
            "The Borrow Checker".to_string(),
            LessonStatus::Draft,
            Utc::now(),
            "https://videos.example.com/borrowck.mp4".to_string(),
        )
        .await?;
    println!("🎬 bob (instructor) added lesson '{}'", lesson.title);

    let denied = app
        .course_service
        .delete_course(course.id, Some("bob"))
        .await;
    println!("🚫 bob tried to delete the course: {:?}", denied.unwrap_err());

    Ok(())
}
