use crate::entities::{Course, CourseUpdate, InstructorRef};
use crate::errors::DomainError;
use crate::repositories::{CourseRepository, LessonRepository};
use crate::services::access_policy::{authorize_course, CourseAction};
use crate::services::UserService;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

/// Course Service - orchestrates course CRUD behind the ownership policy.
///
/// Mutation paths check resource existence first, then identity, then
/// ownership, so an unknown id answers not-found even to anonymous callers.
pub struct CourseService {
    course_repository: Arc<dyn CourseRepository>,
    lesson_repository: Arc<dyn LessonRepository>,
    users: Arc<UserService>,
}

impl CourseService {
    pub fn new(
        course_repository: Arc<dyn CourseRepository>,
        lesson_repository: Arc<dyn LessonRepository>,
        users: Arc<UserService>,
    ) -> Self {
        Self {
            course_repository,
            lesson_repository,
            users,
        }
    }

    pub async fn list_courses(&self) -> Result<Vec<Course>, DomainError> {
        self.course_repository.find_all().await
    }

    pub async fn get_course(&self, id: Uuid) -> Result<Course, DomainError> {
        match self.course_repository.find_by_id(id).await? {
            Some(course) => Ok(course),
            None => Err(DomainError::CourseNotFound(id)),
        }
    }

    /// Create a course with the resolved requester stamped as creator.
    pub async fn create_course(
        &self,
        principal: Option<&str>,
        title: String,
        description: String,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
        instructors: Vec<InstructorRef>,
    ) -> Result<Course, DomainError> {
        let requester = self.users.require_principal(principal).await?;

        let course = Course::new(
            title,
            description,
            start_date,
            end_date,
            requester.id,
            instructors,
        );
        course.validate()?;

        self.course_repository.add(&course).await?;
        Ok(course)
    }

    pub async fn update_course(
        &self,
        id: Uuid,
        principal: Option<&str>,
        update: CourseUpdate,
    ) -> Result<Course, DomainError> {
        let mut course = self.get_course(id).await?;
        let requester = self.users.require_principal(principal).await?;

        if authorize_course(CourseAction::Update, &course, requester.id).is_denied() {
            return Err(DomainError::Forbidden(
                "Only the course creator may update a course".to_string(),
            ));
        }

        course.apply_update(update);
        course.validate()?;

        self.course_repository.update(&course).await?;
        Ok(course)
    }

    /// Delete a course and every lesson that belongs to it. Lessons do not
    /// outlive their course.
    pub async fn delete_course(&self, id: Uuid, principal: Option<&str>) -> Result<(), DomainError> {
        let course = self.get_course(id).await?;
        let requester = self.users.require_principal(principal).await?;

        if authorize_course(CourseAction::Delete, &course, requester.id).is_denied() {
            return Err(DomainError::Forbidden(
                "Only the course creator may delete a course".to_string(),
            ));
        }

        for lesson in self.lesson_repository.find_by_course_id(id).await? {
            self.lesson_repository.delete(lesson.id).await?;
        }
        self.course_repository.delete(id).await
    }

    /// The instructor set of an existing course; empty is a valid answer.
    pub async fn instructors(&self, id: Uuid) -> Result<Vec<InstructorRef>, DomainError> {
        let course = self.get_course(id).await?;
        Ok(course.instructors)
    }
}
