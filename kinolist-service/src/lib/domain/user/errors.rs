use auth::JwtError;
use auth::PasswordError;
use thiserror::Error;

use crate::domain::deadline::DeadlineExceeded;
use crate::domain::errors::ValidationError;
use crate::domain::user::models::UserId;

/// Top-level error for all account and session operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    // Client input errors (automatically converted via #[from])
    #[error(transparent)]
    Validation(#[from] ValidationError),

    // Domain-level errors
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("user {0} not found")]
    NotFound(UserId),

    #[error("user with such email {0} doesn't exist")]
    NotFoundByEmail(String),

    #[error("username already exists: {0}")]
    UsernameAlreadyExists(String),

    #[error("email already exists: {0}")]
    EmailAlreadyExists(String),

    // Infrastructure errors
    #[error("failed to issue tokens: {0}")]
    TokenIssue(JwtError),

    #[error("password error: {0}")]
    Password(#[from] PasswordError),

    #[error("database error: {0}")]
    Database(String),

    #[error(transparent)]
    Timeout(#[from] DeadlineExceeded),
}
