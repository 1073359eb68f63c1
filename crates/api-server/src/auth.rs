/// Token issuance, verification and the bearer-auth middleware.
use crate::error::ApiError;
use crate::AppState;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use chrono::{Duration, Utc};
use domain::DomainError;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Username of the authenticated account.
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

/// Issues and verifies the opaque bearer tokens. The rest of the system
/// only ever sees the resolved `sub` claim.
pub struct TokenService {
    secret: String,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: String, ttl_hours: u64) -> Self {
        Self {
            secret,
            ttl: Duration::hours(ttl_hours as i64),
        }
    }

    pub fn issue(&self, username: &str) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let claims = Claims {
            sub: username.to_string(),
            exp: (now + self.ttl).timestamp(),
            iat: now.timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
    }

    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
    }

    /// Best-effort principal extraction for routes where authentication is
    /// optional and the service decides what an absent identity means.
    pub fn principal_from_headers(&self, headers: &HeaderMap) -> Option<String> {
        let auth_header = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
        let token = auth_header.strip_prefix("Bearer ")?;
        self.verify(token).ok().map(|claims| claims.sub)
    }
}

/// The authenticated principal, stored in request extensions by the
/// middleware and available to handlers as an extractor.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub String);

/// Middleware for routes that require a valid bearer token up front.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(ApiError(DomainError::Unauthenticated))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(ApiError(DomainError::Unauthenticated))?;

    let claims = state.tokens.verify(token).map_err(|e| {
        warn!("Token verification failed: {}", e);
        ApiError(DomainError::Unauthenticated)
    })?;

    request
        .extensions_mut()
        .insert(AuthenticatedUser(claims.sub));

    Ok(next.run(request).await)
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(ApiError(DomainError::Unauthenticated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn issued_tokens_verify_back_to_the_subject() {
        let tokens = TokenService::new("secret".to_string(), 24);

        let token = tokens.issue("alice").unwrap();
        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.sub, "alice");
    }

    #[test]
    fn foreign_tokens_are_rejected() {
        let ours = TokenService::new("secret".to_string(), 24);
        let theirs = TokenService::new("other_secret".to_string(), 24);

        let token = theirs.issue("alice").unwrap();
        assert!(ours.verify(&token).is_err());
    }

    #[test]
    fn principal_extraction_requires_a_bearer_header() {
        let tokens = TokenService::new("secret".to_string(), 24);
        let token = tokens.issue("alice").unwrap();

        let mut headers = HeaderMap::new();
        assert_eq!(tokens.principal_from_headers(&headers), None);

        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&token).unwrap(),
        );
        // missing the Bearer prefix
        assert_eq!(tokens.principal_from_headers(&headers), None);

        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
        );
        assert_eq!(
            tokens.principal_from_headers(&headers),
            Some("alice".to_string())
        );
    }
}
