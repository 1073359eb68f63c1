use crate::entities::User;
use crate::errors::DomainError;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository trait - defines what we need from the persistence layer.
/// This is a PORT in hexagonal architecture; the ownership and mutation
/// logic depends only on these signatures, never on a concrete store.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn add(&self, user: &User) -> Result<(), DomainError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;
    /// Case-insensitive exact match.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;
    /// Case-insensitive exact match.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;
    async fn update(&self, user: &User) -> Result<(), DomainError>;
    async fn delete(&self, id: Uuid) -> Result<(), DomainError>;
    async fn find_all(&self) -> Result<Vec<User>, DomainError>;
}
