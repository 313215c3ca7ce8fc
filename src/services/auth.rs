//! Stateless bearer-token gateway.
//!
//! Tokens are HS512-signed with the fixed server secret and carry the
//! username as subject plus an expiry. Verification fails closed: any
//! signature, expiry, or principal-resolution failure rejects the
//! request before it reaches a resource component. Principal
//! resolution is a pure function of (token, current person/role
//! state): person looked up by name, role by the person's `role_id`.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Resources;
use crate::db::ADMIN_ROLE;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Unknown principal: {0}")]
    PrincipalNotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: i64,
}

/// The authenticated identity attached to a request after token
/// verification, with its resolved authority.
#[derive(Debug, Clone, Serialize)]
pub struct Principal {
    pub person_id: i32,
    pub username: String,
    pub role: String,
}

impl Principal {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}

pub struct AuthGateway {
    ctx: Resources,
}

impl AuthGateway {
    #[must_use]
    pub(crate) const fn new(ctx: Resources) -> Self {
        Self { ctx }
    }

    /// Verifies credentials and returns a signed bearer token.
    pub async fn issue_token(&self, username: &str, password: &str) -> Result<String, AuthError> {
        let is_valid = self
            .ctx
            .store
            .verify_person_password(username, password)
            .await?;

        if !is_valid {
            return Err(AuthError::InvalidCredentials);
        }

        let expires_at =
            chrono::Utc::now() + chrono::Duration::hours(self.ctx.security.token_ttl_hours);

        sign(username, expires_at.timestamp(), &self.ctx.security.jwt_secret)
    }

    /// Verifies a bearer token and resolves its principal.
    pub async fn authenticate(&self, token: &str) -> Result<Principal, AuthError> {
        let claims = verify(token, &self.ctx.security.jwt_secret)?;

        let person = self
            .ctx
            .store
            .get_person_by_name(&claims.sub)
            .await?
            .ok_or_else(|| AuthError::PrincipalNotFound(claims.sub.clone()))?;

        let role = self
            .ctx
            .store
            .get_role(person.role_id)
            .await?
            .ok_or_else(|| AuthError::PrincipalNotFound(claims.sub.clone()))?;

        Ok(Principal {
            person_id: person.id,
            username: person.name,
            role: role.name,
        })
    }
}

fn sign(username: &str, exp: i64, secret: &str) -> Result<String, AuthError> {
    let claims = Claims {
        sub: username.to_string(),
        exp,
    };

    encode(
        &Header::new(Algorithm::HS512),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AuthError::Internal(format!("Failed to sign token: {e}")))
}

fn verify(token: &str, secret: &str) -> Result<Claims, AuthError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS512),
    )
    .map(|data| data.claims)
    .map_err(|e| AuthError::InvalidToken(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    fn future_exp() -> i64 {
        (chrono::Utc::now() + chrono::Duration::hours(1)).timestamp()
    }

    #[test]
    fn test_sign_verify_round_trip() {
        let token = sign("alice", future_exp(), SECRET).unwrap();
        let claims = verify(&token, SECRET).unwrap();
        assert_eq!(claims.sub, "alice");
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = sign("alice", future_exp(), SECRET).unwrap();
        assert!(matches!(
            verify(&token, "other-secret"),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        let exp = (chrono::Utc::now() - chrono::Duration::hours(1)).timestamp();
        let token = sign("alice", exp, SECRET).unwrap();
        assert!(matches!(
            verify(&token, SECRET),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert!(matches!(
            verify("not-a-token", SECRET),
            Err(AuthError::InvalidToken(_))
        ));
    }
}
