use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user referenced from a course's instructor set. Clients may send a bare
/// id or a full object; everything is normalized to this shape before it
/// reaches the services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstructorRef {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl From<Uuid> for InstructorRef {
    fn from(id: Uuid) -> Self {
        Self {
            id,
            username: None,
            email: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    /// Set once at creation, never reassigned.
    pub creator_id: Uuid,
    pub instructors: Vec<InstructorRef>,
}

/// Partial update payload. Only populated fields overwrite existing values;
/// `creator_id` is accepted for wire compatibility but never applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CourseUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub instructors: Option<Vec<InstructorRef>>,
    pub creator_id: Option<Uuid>,
}

impl Course {
    pub fn new(
        title: String,
        description: String,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
        creator_id: Uuid,
        instructors: Vec<InstructorRef>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            description,
            start_date,
            end_date,
            creator_id,
            instructors,
        }
    }

    pub fn validate(&self) -> Result<(), crate::DomainError> {
        if self.title.trim().is_empty() {
            return Err(crate::DomainError::ValidationError(
                "Title is required".to_string(),
            ));
        }

        if self.end_date <= self.start_date {
            return Err(crate::DomainError::ValidationError(
                "End date must be after start date".to_string(),
            ));
        }

        Ok(())
    }

    pub fn has_instructor(&self, user_id: Uuid) -> bool {
        self.instructors.iter().any(|i| i.id == user_id)
    }

    /// Apply patch semantics: absent fields keep their prior values and the
    /// creator id is ignored even when the payload supplies one.
    pub fn apply_update(&mut self, update: CourseUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(start_date) = update.start_date {
            self.start_date = start_date;
        }
        if let Some(end_date) = update.end_date {
            self.end_date = end_date;
        }
        if let Some(instructors) = update.instructors {
            self.instructors = instructors;
        }
    }
}
