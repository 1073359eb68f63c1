use domain::*;
use infrastructure::*;
use std::sync::Arc;

/// Course application - wires the in-memory stores into the services.
/// This is the single composition root; everything above it depends only
/// on the repository traits.
pub struct CourseApp {
    pub user_service: Arc<UserService>,
    pub course_service: CourseService,
    pub lesson_service: LessonService,
}

impl CourseApp {
    pub fn new() -> Self {
        // Infrastructure layer - one synchronized store per collection
        let user_repository: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::new());
        let course_repository: Arc<dyn CourseRepository> =
            Arc::new(InMemoryCourseRepository::new());
        let lesson_repository: Arc<dyn LessonRepository> =
            Arc::new(InMemoryLessonRepository::new());

        // Domain services
        let user_service = Arc::new(UserService::new(user_repository));

        let course_service = CourseService::new(
            course_repository.clone(),
            lesson_repository.clone(),
            user_service.clone(),
        );

        let lesson_service =
            LessonService::new(lesson_repository, course_repository, user_service.clone());

        Self {
            user_service,
            course_service,
            lesson_service,
        }
    }
}

impl Default for CourseApp {
    fn default() -> Self {
        Self::new()
    }
}
