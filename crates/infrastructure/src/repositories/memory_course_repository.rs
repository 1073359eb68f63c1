use async_trait::async_trait;
use domain::{Course, CourseRepository, DomainError};
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory course store guarded by a single collection-wide lock.
pub struct InMemoryCourseRepository {
    courses: RwLock<Vec<Course>>,
}

impl InMemoryCourseRepository {
    pub fn new() -> Self {
        Self {
            courses: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryCourseRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CourseRepository for InMemoryCourseRepository {
    async fn add(&self, course: &Course) -> Result<(), DomainError> {
        self.courses.write().await.push(course.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Course>, DomainError> {
        let courses = self.courses.read().await;
        Ok(courses.iter().find(|c| c.id == id).cloned())
    }

    async fn update(&self, course: &Course) -> Result<(), DomainError> {
        let mut courses = self.courses.write().await;
        if let Some(slot) = courses.iter_mut().find(|c| c.id == course.id) {
            *slot = course.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        self.courses.write().await.retain(|c| c.id != id);
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Course>, DomainError> {
        Ok(self.courses.read().await.clone())
    }
}
