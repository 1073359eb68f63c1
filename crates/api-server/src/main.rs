use anyhow::Result;
use application::CourseApp;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    middleware,
    response::Json,
    routing::{get, post, put},
    Router,
};
use chrono::{DateTime, Utc};
use domain::{Course, CourseUpdate, InstructorRef, Lesson, LessonStatus, LessonUpdate, User};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use uuid::Uuid;

mod auth;
mod config;
mod error;

use auth::{AuthenticatedUser, TokenService};
use config::Config;
use error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub app: Arc<CourseApp>,
    pub tokens: Arc<TokenService>,
}

// ---------- Auth DTOs ----------

#[derive(Debug, Deserialize)]
struct SignupRequest {
    username: String,
    email: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Debug, Serialize)]
struct AuthResponse {
    token: String,
    id: Uuid,
}

#[derive(Debug, Serialize)]
struct UserInfo {
    id: Uuid,
    name: String,
    email: String,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.username,
            email: user.email,
        }
    }
}

// ---------- Course DTOs ----------

/// Clients historically sent instructors either as bare ids or as full
/// user objects; accept both and normalize.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InstructorPayload {
    Id(Uuid),
    Full {
        id: Uuid,
        username: Option<String>,
        email: Option<String>,
    },
}

impl From<InstructorPayload> for InstructorRef {
    fn from(payload: InstructorPayload) -> Self {
        match payload {
            InstructorPayload::Id(id) => id.into(),
            InstructorPayload::Full {
                id,
                username,
                email,
            } => InstructorRef {
                id,
                username,
                email,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct CreateCourseRequest {
    title: String,
    description: String,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    #[serde(default)]
    instructors: Vec<InstructorPayload>,
}

#[derive(Debug, Deserialize)]
struct UpdateCourseRequest {
    title: Option<String>,
    description: Option<String>,
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
    instructors: Option<Vec<InstructorPayload>>,
    // accepted but never applied
    creator_id: Option<Uuid>,
}

impl From<UpdateCourseRequest> for CourseUpdate {
    fn from(req: UpdateCourseRequest) -> Self {
        CourseUpdate {
            title: req.title,
            description: req.description,
            start_date: req.start_date,
            end_date: req.end_date,
            instructors: req
                .instructors
                .map(|list| list.into_iter().map(Into::into).collect()),
            creator_id: req.creator_id,
        }
    }
}

#[derive(Debug, Serialize)]
struct CourseInfo {
    id: Uuid,
    title: String,
    description: String,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    creator_id: Uuid,
    instructors: Vec<InstructorRef>,
}

impl From<Course> for CourseInfo {
    fn from(course: Course) -> Self {
        Self {
            id: course.id,
            title: course.title,
            description: course.description,
            start_date: course.start_date,
            end_date: course.end_date,
            creator_id: course.creator_id,
            instructors: course.instructors,
        }
    }
}

// ---------- Lesson DTOs ----------

#[derive(Debug, Deserialize)]
struct CreateLessonRequest {
    title: String,
    status: LessonStatus,
    publish_date: DateTime<Utc>,
    video_url: String,
    course_id: Uuid,
}

#[derive(Debug, Deserialize)]
struct UpdateLessonRequest {
    title: Option<String>,
    status: Option<LessonStatus>,
    publish_date: Option<DateTime<Utc>>,
    video_url: Option<String>,
    // accepted but never applied
    course_id: Option<Uuid>,
    creator_id: Option<Uuid>,
}

impl From<UpdateLessonRequest> for LessonUpdate {
    fn from(req: UpdateLessonRequest) -> Self {
        LessonUpdate {
            title: req.title,
            status: req.status,
            publish_date: req.publish_date,
            video_url: req.video_url,
            course_id: req.course_id,
            creator_id: req.creator_id,
        }
    }
}

#[derive(Debug, Serialize)]
struct LessonInfo {
    id: Uuid,
    title: String,
    status: LessonStatus,
    publish_date: DateTime<Utc>,
    video_url: String,
    course_id: Uuid,
    creator_id: Uuid,
}

impl From<Lesson> for LessonInfo {
    fn from(lesson: Lesson) -> Self {
        Self {
            id: lesson.id,
            title: lesson.title,
            status: lesson.status,
            publish_date: lesson.publish_date,
            video_url: lesson.video_url,
            course_id: lesson.course_id,
            creator_id: lesson.creator_id,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter("api_server=debug,tower_http=debug")
        .init();

    info!("🚀 Starting Course Sphere API Server");

    let config = Config::from_env();
    info!("🌐 API server will bind to: {}:{}", config.api_host, config.api_port);

    let app_state = AppState {
        app: Arc::new(CourseApp::new()),
        tokens: Arc::new(TokenService::new(
            config.jwt_secret.clone(),
            config.token_ttl_hours,
        )),
    };

    // Routes that refuse to run without a valid bearer token
    let protected = Router::new()
        .route("/auth/me", get(me))
        .route("/course", post(create_course))
        .route("/lesson", post(create_lesson))
        .route("/lesson/:id", put(update_lesson).delete(delete_lesson))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            auth::auth_middleware,
        ));

    // Routes that resolve identity themselves (or need none)
    let public = Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/all", get(list_users))
        .route("/course", get(list_courses))
        .route(
            "/course/:id",
            get(get_course).put(update_course).delete(delete_course),
        )
        .route("/course/:id/instructors", get(course_instructors))
        .route("/lesson/course/:id", get(lessons_by_course))
        .route("/health", get(health_check));

    let app = public
        .merge(protected)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    let bind_address = format!("{}:{}", config.api_host, config.api_port);
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("🌐 API Server listening on http://{}", bind_address);
    info!("📖 API Documentation:");
    info!("   POST   /auth/signup             - Create an account");
    info!("   POST   /auth/login              - Exchange credentials for a token");
    info!("   GET    /auth/me                 - Current account (bearer)");
    info!("   GET    /auth/all                - List accounts");
    info!("   GET    /course                  - List courses");
    info!("   POST   /course                  - Create course (bearer)");
    info!("   GET    /course/:id              - Course details");
    info!("   PUT    /course/:id              - Update course (creator only)");
    info!("   DELETE /course/:id              - Delete course (creator only)");
    info!("   GET    /course/:id/instructors  - Instructor set");
    info!("   POST   /lesson                  - Add lesson (creator/instructor)");
    info!("   GET    /lesson/course/:id       - Lessons of a course");
    info!("   PUT    /lesson/:id              - Update lesson (author/course creator)");
    info!("   DELETE /lesson/:id              - Delete lesson (author/course creator)");
    info!("   GET    /health                  - Health check");

    axum::serve(listener, app).await?;

    Ok(())
}

// ---------- Auth handlers ----------

async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    info!("Signup attempt: {}", payload.username);

    if payload.password.len() < 6 {
        return Err(domain::DomainError::ValidationError(
            "Password must be at least 6 characters".to_string(),
        )
        .into());
    }

    let password_hash =
        bcrypt::hash(&payload.password, bcrypt::DEFAULT_COST).map_err(ApiError::internal)?;

    let user = state
        .app
        .user_service
        .signup(payload.username, payload.email, password_hash)
        .await?;

    let token = state.tokens.issue(&user.username).map_err(ApiError::internal)?;
    Ok(Json(AuthResponse { token, id: user.id }))
}

async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    info!("Login attempt: {}", payload.email);

    // unknown email and wrong password answer identically
    let user = state
        .app
        .user_service
        .find_by_email(&payload.email)
        .await?
        .ok_or(domain::DomainError::InvalidCredentials)?;

    let valid = bcrypt::verify(&payload.password, &user.password_hash)
        .map_err(ApiError::internal)?;
    if !valid {
        return Err(domain::DomainError::InvalidCredentials.into());
    }

    let token = state.tokens.issue(&user.username).map_err(ApiError::internal)?;
    Ok(Json(AuthResponse { token, id: user.id }))
}

async fn me(
    State(state): State<AppState>,
    AuthenticatedUser(username): AuthenticatedUser,
) -> Result<Json<UserInfo>, ApiError> {
    // a valid token whose account has vanished is a 404, not a 401
    let user = state
        .app
        .user_service
        .resolve_principal(Some(&username))
        .await?;
    Ok(Json(user.into()))
}

async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserInfo>>, ApiError> {
    let users = state.app.user_service.get_all_users().await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

// ---------- Course handlers ----------

async fn list_courses(State(state): State<AppState>) -> Result<Json<Vec<CourseInfo>>, ApiError> {
    let courses = state.app.course_service.list_courses().await?;
    Ok(Json(courses.into_iter().map(Into::into).collect()))
}

async fn create_course(
    State(state): State<AppState>,
    AuthenticatedUser(username): AuthenticatedUser,
    Json(payload): Json<CreateCourseRequest>,
) -> Result<(StatusCode, Json<CourseInfo>), ApiError> {
    let course = state
        .app
        .course_service
        .create_course(
            Some(&username),
            payload.title,
            payload.description,
            payload.start_date,
            payload.end_date,
            payload.instructors.into_iter().map(Into::into).collect(),
        )
        .await?;

    info!("📚 Course '{}' created by {}", course.title, username);
    Ok((StatusCode::CREATED, Json(course.into())))
}

async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CourseInfo>, ApiError> {
    let course = state.app.course_service.get_course(id).await?;
    Ok(Json(course.into()))
}

async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(payload): Json<UpdateCourseRequest>,
) -> Result<StatusCode, ApiError> {
    let principal = state.tokens.principal_from_headers(&headers);
    state
        .app
        .course_service
        .update_course(id, principal.as_deref(), payload.into())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let principal = state.tokens.principal_from_headers(&headers);
    state
        .app
        .course_service
        .delete_course(id, principal.as_deref())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn course_instructors(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<InstructorRef>>, ApiError> {
    let instructors = state.app.course_service.instructors(id).await?;
    Ok(Json(instructors))
}

// ---------- Lesson handlers ----------

async fn create_lesson(
    State(state): State<AppState>,
    AuthenticatedUser(username): AuthenticatedUser,
    Json(payload): Json<CreateLessonRequest>,
) -> Result<(StatusCode, Json<LessonInfo>), ApiError> {
    let lesson = state
        .app
        .lesson_service
        .create_lesson(
            Some(&username),
            payload.course_id,
            payload.title,
            payload.status,
            payload.publish_date,
            payload.video_url,
        )
        .await?;

    info!("🎬 Lesson '{}' added by {}", lesson.title, username);
    Ok((StatusCode::CREATED, Json(lesson.into())))
}

async fn lessons_by_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<LessonInfo>>, ApiError> {
    let lessons = state.app.lesson_service.lessons_by_course(id).await?;
    Ok(Json(lessons.into_iter().map(Into::into).collect()))
}

async fn update_lesson(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AuthenticatedUser(username): AuthenticatedUser,
    Json(payload): Json<UpdateLessonRequest>,
) -> Result<StatusCode, ApiError> {
    state
        .app
        .lesson_service
        .update_lesson(id, Some(&username), payload.into())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_lesson(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AuthenticatedUser(username): AuthenticatedUser,
) -> Result<StatusCode, ApiError> {
    state
        .app
        .lesson_service
        .delete_lesson(id, Some(&username))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}
