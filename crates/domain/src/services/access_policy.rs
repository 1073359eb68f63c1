//! Ownership policy for courses and lessons.
//!
//! Every decision is a pure function of (action, resource snapshot,
//! requesting user id); no authorization state is persisted anywhere.

use crate::entities::{Course, Lesson};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseAction {
    Update,
    Delete,
    CreateLesson,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonAction {
    Update,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    Deny,
}

impl AccessDecision {
    pub fn is_allowed(self) -> bool {
        matches!(self, AccessDecision::Allow)
    }

    pub fn is_denied(self) -> bool {
        !self.is_allowed()
    }
}

fn decision(allowed: bool) -> AccessDecision {
    if allowed {
        AccessDecision::Allow
    } else {
        AccessDecision::Deny
    }
}

/// Course mutation is creator-only; instructors are denied. Lesson creation
/// additionally admits any member of the course's instructor set.
pub fn authorize_course(action: CourseAction, course: &Course, requester_id: Uuid) -> AccessDecision {
    let allowed = match action {
        CourseAction::Update | CourseAction::Delete => course.creator_id == requester_id,
        CourseAction::CreateLesson => {
            course.creator_id == requester_id || course.has_instructor(requester_id)
        }
    };
    decision(allowed)
}

/// Lesson update and delete share one rule, narrower than lesson creation:
/// only the lesson's original author or the parent course's creator.
pub fn authorize_lesson(
    action: LessonAction,
    lesson: &Lesson,
    course: &Course,
    requester_id: Uuid,
) -> AccessDecision {
    let allowed = match action {
        LessonAction::Update | LessonAction::Delete => {
            lesson.creator_id == requester_id || course.creator_id == requester_id
        }
    };
    decision(allowed)
}
