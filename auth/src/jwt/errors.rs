use thiserror::Error;

/// Error type for JWT operations.
///
/// Decoding failures are split in two: `Expired` is the only one a caller
/// may recover from (by refreshing), everything else is `Malformed`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("token is malformed: {0}")]
    Malformed(String),

    #[error("token is expired")]
    Expired,
}

impl JwtError {
    pub fn is_expired(&self) -> bool {
        matches!(self, JwtError::Expired)
    }
}
