use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lesson lifecycle status. The original clients sent free-form strings;
/// the server now rejects anything outside this set at deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LessonStatus {
    Draft,
    Published,
    Archived,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: Uuid,
    pub title: String,
    pub status: LessonStatus,
    pub publish_date: DateTime<Utc>,
    pub video_url: String,
    /// Parent course, immutable after creation.
    pub course_id: Uuid,
    /// The user who authored the lesson, assigned server-side at creation.
    pub creator_id: Uuid,
}

/// Partial update payload. `course_id` and `creator_id` are accepted for
/// wire compatibility but never applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LessonUpdate {
    pub title: Option<String>,
    pub status: Option<LessonStatus>,
    pub publish_date: Option<DateTime<Utc>>,
    pub video_url: Option<String>,
    pub course_id: Option<Uuid>,
    pub creator_id: Option<Uuid>,
}

impl Lesson {
    pub fn new(
        title: String,
        status: LessonStatus,
        publish_date: DateTime<Utc>,
        video_url: String,
        course_id: Uuid,
        creator_id: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            status,
            publish_date,
            video_url,
            course_id,
            creator_id,
        }
    }

    pub fn validate(&self) -> Result<(), crate::DomainError> {
        if self.title.trim().is_empty() {
            return Err(crate::DomainError::ValidationError(
                "Title is required".to_string(),
            ));
        }

        Ok(())
    }

    /// Apply patch semantics: absent fields keep their prior values; the
    /// parent course and original author survive any payload.
    pub fn apply_update(&mut self, update: LessonUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(publish_date) = update.publish_date {
            self.publish_date = publish_date;
        }
        if let Some(video_url) = update.video_url {
            self.video_url = video_url;
        }
    }
}
