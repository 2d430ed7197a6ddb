use thiserror::Error;

/// Rejected client input.
///
/// Shared by account credentials and movie-list entries. `field` names the
/// first attribute that failed; later attributes are not checked.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid {field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}
