use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;

/// Lifetime of an access token.
pub const ACCESS_TOKEN_TTL: Duration = Duration::from_secs(30 * 60);

/// Lifetime of a refresh token.
pub const REFRESH_TOKEN_TTL: Duration = Duration::from_secs(30 * 24 * 60 * 60);

/// Token class. Each class is signed with its own secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenClass {
    Access,
    Refresh,
}

/// Access/refresh pair handed to a client at sign-in and on refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Two-class session token codec.
///
/// Tokens are stateless: validity is decided by signature and expiry alone.
/// A token of one class never verifies under the other class's secret.
pub struct TokenCodec {
    access: JwtHandler,
    refresh: JwtHandler,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenCodec {
    /// Create a codec with the standard lifetimes (30 minutes / 30 days).
    ///
    /// # Arguments
    /// * `access_secret` - Secret signing access tokens
    /// * `refresh_secret` - Secret signing refresh tokens
    pub fn new(access_secret: &[u8], refresh_secret: &[u8]) -> Self {
        Self::with_ttls(access_secret, refresh_secret, ACCESS_TOKEN_TTL, REFRESH_TOKEN_TTL)
    }

    /// Create a codec with custom lifetimes.
    pub fn with_ttls(
        access_secret: &[u8],
        refresh_secret: &[u8],
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> Self {
        Self {
            access: JwtHandler::new(access_secret),
            refresh: JwtHandler::new(refresh_secret),
            access_ttl,
            refresh_ttl,
        }
    }

    /// Lifetime of tokens of the given class.
    pub fn ttl(&self, class: TokenClass) -> Duration {
        match class {
            TokenClass::Access => self.access_ttl,
            TokenClass::Refresh => self.refresh_ttl,
        }
    }

    fn handler(&self, class: TokenClass) -> &JwtHandler {
        match class {
            TokenClass::Access => &self.access,
            TokenClass::Refresh => &self.refresh,
        }
    }

    /// Issue a signed token for a subject.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token signing failed
    pub fn issue(&self, class: TokenClass, subject: i64) -> Result<String, JwtError> {
        let claims = Claims::for_subject(subject, self.ttl(class));
        self.handler(class).encode(&claims)
    }

    /// Verify a token and return its subject.
    ///
    /// # Errors
    /// * `Expired` - Signature is valid but the token has expired
    /// * `Malformed` - Anything else, including a token of the other class
    pub fn parse(&self, class: TokenClass, token: &str) -> Result<i64, JwtError> {
        self.handler(class).decode(token)?.subject()
    }

    /// Issue a fresh access/refresh pair for a subject.
    pub fn issue_pair(&self, subject: i64) -> Result<TokenPair, JwtError> {
        Ok(TokenPair {
            access_token: self.issue(TokenClass::Access, subject)?,
            refresh_token: self.issue(TokenClass::Refresh, subject)?,
        })
    }
}
