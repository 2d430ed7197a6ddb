use thiserror::Error;

use crate::domain::deadline::DeadlineExceeded;
use crate::domain::errors::ValidationError;
use crate::domain::list::models::MovieId;
use crate::domain::user::models::UserId;

/// Top-level error for movie list operations
#[derive(Debug, Clone, Error)]
pub enum ListError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("user {0} has no movie list")]
    ListNotFound(UserId),

    #[error("no movie found by name {0:?}")]
    MovieNotFound(String),

    #[error("movie {0} is not in the list")]
    TitleNotInList(MovieId),

    #[error("movie {0} is already in the list")]
    AlreadyInList(MovieId),

    #[error("movie search failed: {0}")]
    Search(String),

    #[error("database error: {0}")]
    Database(String),

    #[error(transparent)]
    Timeout(#[from] DeadlineExceeded),
}
