//!
//! # Session Issuer
//!
//! Validates credentials and issues signed, time-bound session tokens.
//! Registration enforces email uniqueness; login answers both unknown-email
//! and wrong-password with the same message so the response never reveals
//! which check failed.

use sqlx::PgPool;
use validator::Validate;

use crate::auth::{generate_token, hash_password, verify_password, LoginRequest, RegisterRequest};
use crate::error::AppError;
use crate::models::UserRecord;
use crate::store::UserStore;

/// A freshly issued session: the signed token plus the user it belongs to.
/// The API layer turns this into the cookie and the response body.
pub struct Session {
    pub token: String,
    pub user: UserRecord,
}

pub struct SessionService {
    users: UserStore,
}

impl SessionService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            users: UserStore::new(pool),
        }
    }

    /// Creates a new account and issues a session for it.
    ///
    /// Fails with 400 "Email already exists" when the address is taken. The
    /// password is hashed before it goes anywhere near the store and is
    /// never logged.
    pub async fn register(&self, input: RegisterRequest) -> Result<Session, AppError> {
        input.validate()?;

        let existing = self.users.find_by_email(&input.email).await?;
        if existing.is_some() {
            return Err(AppError::Validation("Email already exists".into()));
        }

        let password_hash = hash_password(&input.password)?;
        let user = self
            .users
            .insert(&input.name, &input.email, &password_hash, false)
            .await?;

        let token = generate_token(user.id)?;
        Ok(Session { token, user })
    }

    /// Authenticates a user and issues a session.
    pub async fn login(&self, input: LoginRequest) -> Result<Session, AppError> {
        input.validate()?;

        let user = match self.users.find_by_email(&input.email).await? {
            Some(user) => user,
            None => return Err(invalid_credentials()),
        };

        if !verify_password(&input.password, &user.password_hash)? {
            return Err(invalid_credentials());
        }

        let token = generate_token(user.id)?;
        Ok(Session { token, user })
    }
}

// One message for both failure modes: no existence leak.
fn invalid_credentials() -> AppError {
    AppError::Unauthorized("Invalid email or password".into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_credentials_is_generic() {
        match invalid_credentials() {
            AppError::Unauthorized(msg) => {
                assert_eq!(msg, "Invalid email or password");
                assert!(!msg.contains("email not found"));
            }
            other => panic!("Unexpected error kind: {:?}", other),
        }
    }
}
