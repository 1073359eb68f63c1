use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::DomainError;
use serde_json::json;

/// Wrapper so domain errors can cross the axum boundary with the right
/// status code attached.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    /// For faults that should never reach the client verbatim.
    pub fn internal(err: impl std::fmt::Display) -> Self {
        ApiError(DomainError::Internal(err.to_string()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            DomainError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            DomainError::UsernameTaken(_) => {
                (StatusCode::CONFLICT, "Username already taken".to_string())
            }
            DomainError::EmailTaken(_) => {
                (StatusCode::CONFLICT, "Email already registered".to_string())
            }
            // uniform message: do not reveal whether the account exists
            DomainError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Invalid credentials".to_string())
            }
            DomainError::Unauthenticated => {
                (StatusCode::UNAUTHORIZED, "Not authenticated".to_string())
            }
            DomainError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            DomainError::UserNotFound(_) => (StatusCode::NOT_FOUND, "User not found".to_string()),
            DomainError::CourseNotFound(_) => {
                (StatusCode::NOT_FOUND, "Course not found".to_string())
            }
            DomainError::LessonNotFound(_) => {
                (StatusCode::NOT_FOUND, "Lesson not found".to_string())
            }
            DomainError::RepositoryError(msg) => {
                tracing::error!("Repository error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            DomainError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
