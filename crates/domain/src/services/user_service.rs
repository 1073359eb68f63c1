use crate::entities::User;
use crate::errors::DomainError;
use crate::repositories::UserRepository;
use std::sync::Arc;
use uuid::Uuid;

/// User Service - signup uniqueness checks and identity resolution.
pub struct UserService {
    user_repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(user_repository: Arc<dyn UserRepository>) -> Self {
        Self { user_repository }
    }

    /// Create a new user. Username and email are globally unique,
    /// case-insensitively; the username is checked first. On conflict the
    /// store is left untouched.
    pub async fn signup(
        &self,
        username: String,
        email: String,
        password_hash: String,
    ) -> Result<User, DomainError> {
        let user = User::new(username, email, password_hash);

        user.validate()?;

        if self
            .user_repository
            .find_by_username(&user.username)
            .await?
            .is_some()
        {
            return Err(DomainError::UsernameTaken(user.username));
        }

        if self
            .user_repository
            .find_by_email(&user.email)
            .await?
            .is_some()
        {
            return Err(DomainError::EmailTaken(user.email));
        }

        self.user_repository.add(&user).await?;
        Ok(user)
    }

    /// Map a bearer principal (the username claim of a verified token) to
    /// its user record. An absent or blank claim is unauthenticated; a
    /// claim with no matching record is a distinct not-found signal so
    /// callers can choose how much to reveal.
    pub async fn resolve_principal(&self, principal: Option<&str>) -> Result<User, DomainError> {
        let username = match principal.map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => return Err(DomainError::Unauthenticated),
        };

        match self.user_repository.find_by_username(username).await? {
            Some(user) => Ok(user),
            None => Err(DomainError::UserNotFound(username.to_string())),
        }
    }

    /// Like `resolve_principal`, but for mutation paths where an unknown
    /// identity must not be distinguishable from a missing one.
    pub async fn require_principal(&self, principal: Option<&str>) -> Result<User, DomainError> {
        self.resolve_principal(principal)
            .await
            .map_err(|e| match e {
                DomainError::UserNotFound(_) => DomainError::Unauthenticated,
                other => other,
            })
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.user_repository.find_by_email(email).await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        self.user_repository.find_by_id(id).await
    }

    pub async fn get_all_users(&self) -> Result<Vec<User>, DomainError> {
        self.user_repository.find_all().await
    }
}
