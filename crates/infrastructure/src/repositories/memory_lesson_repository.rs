use async_trait::async_trait;
use domain::{DomainError, Lesson, LessonRepository};
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory lesson store. Lessons are looked up directly by id; the
/// stored record carries its parent course id.
pub struct InMemoryLessonRepository {
    lessons: RwLock<Vec<Lesson>>,
}

impl InMemoryLessonRepository {
    pub fn new() -> Self {
        Self {
            lessons: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryLessonRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LessonRepository for InMemoryLessonRepository {
    async fn add(&self, lesson: &Lesson) -> Result<(), DomainError> {
        self.lessons.write().await.push(lesson.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Lesson>, DomainError> {
        let lessons = self.lessons.read().await;
        Ok(lessons.iter().find(|l| l.id == id).cloned())
    }

    async fn find_by_course_id(&self, course_id: Uuid) -> Result<Vec<Lesson>, DomainError> {
        let lessons = self.lessons.read().await;
        Ok(lessons
            .iter()
            .filter(|l| l.course_id == course_id)
            .cloned()
            .collect())
    }

    async fn update(&self, lesson: &Lesson) -> Result<(), DomainError> {
        let mut lessons = self.lessons.write().await;
        if let Some(slot) = lessons.iter_mut().find(|l| l.id == lesson.id) {
            *slot = lesson.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        self.lessons.write().await.retain(|l| l.id != id);
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Lesson>, DomainError> {
        Ok(self.lessons.read().await.clone())
    }
}
