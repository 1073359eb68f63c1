pub mod course_repository;
pub mod lesson_repository;
pub mod user_repository;

pub use course_repository::CourseRepository;
pub use lesson_repository::LessonRepository;
pub use user_repository::UserRepository;
