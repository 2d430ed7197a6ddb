use crate::jwt::JwtError;
use crate::password::HashingCost;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::token::TokenClass;
use crate::token::TokenCodec;
use crate::token::TokenPair;

/// Authentication coordinator combining password verification and token issuance.
///
/// Provides high-level authentication operations by coordinating
/// password hashing and the two-class token codec.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_codec: TokenCodec,
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `hashing_cost` - Argon2 cost for new password hashes
    /// * `token_codec` - Codec holding the access and refresh secrets
    ///
    /// # Errors
    /// * `InvalidCost` - Hashing cost is rejected by argon2
    pub fn new(hashing_cost: HashingCost, token_codec: TokenCodec) -> Result<Self, PasswordError> {
        Ok(Self {
            password_hasher: PasswordHasher::new(hashing_cost)?,
            token_codec,
        })
    }

    /// Hash a password for storage.
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a token pair.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `subject` - User identifier to put in both tokens
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash could not be checked
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: i64,
    ) -> Result<TokenPair, AuthenticationError> {
        self.password_hasher
            .verify(password, stored_hash)
            .map_err(|e| match e {
                PasswordError::Mismatch => AuthenticationError::InvalidCredentials,
                other => AuthenticationError::PasswordError(other),
            })?;

        Ok(self.token_codec.issue_pair(subject)?)
    }

    /// Issue a token pair without password verification.
    ///
    /// Used by the refresh flow, where the caller already proved
    /// possession of a valid refresh token.
    pub fn issue_tokens(&self, subject: i64) -> Result<TokenPair, JwtError> {
        self.token_codec.issue_pair(subject)
    }

    /// Validate an access token and return its subject.
    pub fn parse_access_token(&self, token: &str) -> Result<i64, JwtError> {
        self.token_codec.parse(TokenClass::Access, token)
    }

    /// Validate a refresh token and return its subject.
    pub fn parse_refresh_token(&self, token: &str) -> Result<i64, JwtError> {
        self.token_codec.parse(TokenClass::Refresh, token)
    }
}
