use crate::entities::Lesson;
use crate::errors::DomainError;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait LessonRepository: Send + Sync {
    async fn add(&self, lesson: &Lesson) -> Result<(), DomainError>;
    /// Direct lookup by lesson id. Each record carries its `course_id`, so
    /// callers never have to walk every course to locate a lesson.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Lesson>, DomainError>;
    async fn find_by_course_id(&self, course_id: Uuid) -> Result<Vec<Lesson>, DomainError>;
    async fn update(&self, lesson: &Lesson) -> Result<(), DomainError>;
    async fn delete(&self, id: Uuid) -> Result<(), DomainError>;
    async fn find_all(&self) -> Result<Vec<Lesson>, DomainError>;
}
