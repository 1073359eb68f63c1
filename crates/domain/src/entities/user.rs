use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Core User entity - represents an account in the system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    /// Never exposed through the API; read DTOs carry id/name/email only.
    #[serde(skip_serializing)]
    pub password_hash: String,
}

impl User {
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            password_hash,
        }
    }

    pub fn validate(&self) -> Result<(), crate::DomainError> {
        if self.username.trim().is_empty() {
            return Err(crate::DomainError::ValidationError(
                "Username is required".to_string(),
            ));
        }

        if self.email.trim().is_empty() {
            return Err(crate::DomainError::ValidationError(
                "Email is required".to_string(),
            ));
        }

        if !self.email.contains('@') || !self.email.contains('.') {
            return Err(crate::DomainError::ValidationError(
                "Invalid email format".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(username: &str, email: &str) -> User {
        User::new(username.to_string(), email.to_string(), "hash".to_string())
    }

    #[test]
    fn accepts_well_formed_users() {
        assert!(user("alice", "alice@example.com").validate().is_ok());
    }

    #[test]
    fn rejects_blank_username() {
        assert!(user("  ", "alice@example.com").validate().is_err());
    }

    #[test]
    fn rejects_malformed_email() {
        assert!(user("alice", "alice-at-example").validate().is_err());
        assert!(user("alice", "alice@example").validate().is_err());
        assert!(user("alice", "").validate().is_err());
    }
}
