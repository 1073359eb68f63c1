use crate::entities::Course;
use crate::errors::DomainError;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn add(&self, course: &Course) -> Result<(), DomainError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Course>, DomainError>;
    async fn update(&self, course: &Course) -> Result<(), DomainError>;
    async fn delete(&self, id: Uuid) -> Result<(), DomainError>;
    async fn find_all(&self) -> Result<Vec<Course>, DomainError>;
}
