use crate::entities::{Lesson, LessonStatus, LessonUpdate};
use crate::errors::DomainError;
use crate::repositories::{CourseRepository, LessonRepository};
use crate::services::access_policy::{authorize_course, authorize_lesson, CourseAction, LessonAction};
use crate::services::UserService;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

/// Lesson Service - lesson creation is open to the course creator and its
/// instructors; update and delete only to the lesson author or the course
/// creator.
pub struct LessonService {
    lesson_repository: Arc<dyn LessonRepository>,
    course_repository: Arc<dyn CourseRepository>,
    users: Arc<UserService>,
}

impl LessonService {
    pub fn new(
        lesson_repository: Arc<dyn LessonRepository>,
        course_repository: Arc<dyn CourseRepository>,
        users: Arc<UserService>,
    ) -> Self {
        Self {
            lesson_repository,
            course_repository,
            users,
        }
    }

    /// Create a lesson on a course. The creator id is assigned from the
    /// resolved requester, never taken from the payload.
    pub async fn create_lesson(
        &self,
        principal: Option<&str>,
        course_id: Uuid,
        title: String,
        status: LessonStatus,
        publish_date: DateTime<Utc>,
        video_url: String,
    ) -> Result<Lesson, DomainError> {
        let requester = self.users.require_principal(principal).await?;

        let course = match self.course_repository.find_by_id(course_id).await? {
            Some(course) => course,
            None => return Err(DomainError::CourseNotFound(course_id)),
        };

        if authorize_course(CourseAction::CreateLesson, &course, requester.id).is_denied() {
            return Err(DomainError::Forbidden(
                "Only the course creator or an instructor may add lessons".to_string(),
            ));
        }

        let lesson = Lesson::new(title, status, publish_date, video_url, course_id, requester.id);
        lesson.validate()?;

        self.lesson_repository.add(&lesson).await?;
        Ok(lesson)
    }

    pub async fn lessons_by_course(&self, course_id: Uuid) -> Result<Vec<Lesson>, DomainError> {
        self.lesson_repository.find_by_course_id(course_id).await
    }

    pub async fn update_lesson(
        &self,
        id: Uuid,
        principal: Option<&str>,
        update: LessonUpdate,
    ) -> Result<Lesson, DomainError> {
        let (mut lesson, course) = self.locate(id).await?;
        let requester = self.users.require_principal(principal).await?;

        if authorize_lesson(LessonAction::Update, &lesson, &course, requester.id).is_denied() {
            return Err(DomainError::Forbidden(
                "Only the lesson author or the course creator may edit a lesson".to_string(),
            ));
        }

        lesson.apply_update(update);
        lesson.validate()?;

        self.lesson_repository.update(&lesson).await?;
        Ok(lesson)
    }

    pub async fn delete_lesson(&self, id: Uuid, principal: Option<&str>) -> Result<(), DomainError> {
        let (lesson, course) = self.locate(id).await?;
        let requester = self.users.require_principal(principal).await?;

        if authorize_lesson(LessonAction::Delete, &lesson, &course, requester.id).is_denied() {
            return Err(DomainError::Forbidden(
                "Only the lesson author or the course creator may delete a lesson".to_string(),
            ));
        }

        self.lesson_repository.delete(lesson.id).await
    }

    /// Fetch a lesson and its parent course. The lesson record carries the
    /// course id, so this is two keyed lookups rather than a walk over
    /// every course's lessons.
    async fn locate(&self, id: Uuid) -> Result<(Lesson, crate::entities::Course), DomainError> {
        let lesson = match self.lesson_repository.find_by_id(id).await? {
            Some(lesson) => lesson,
            None => return Err(DomainError::LessonNotFound(id)),
        };

        let course = match self.course_repository.find_by_id(lesson.course_id).await? {
            Some(course) => course,
            None => return Err(DomainError::CourseNotFound(lesson.course_id)),
        };

        Ok((lesson, course))
    }
}
