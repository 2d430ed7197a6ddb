//! Authentication utilities library
//!
//! Provides the session authentication building blocks:
//! - Password hashing (Argon2id, configurable cost)
//! - JWT encoding and validation (HS256)
//! - A two-class token codec (access / refresh, independent secrets and lifetimes)
//! - Authentication coordination
//!
//! The service defines its own ports and adapts these implementations.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::{HashingCost, PasswordHasher};
//!
//! let hasher = PasswordHasher::new(HashingCost::minimum()).unwrap();
//! let hash = hasher.hash("My_passw0rd").unwrap();
//! assert!(hasher.verify("My_passw0rd", &hash).is_ok());
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::{TokenClass, TokenCodec};
//!
//! let codec = TokenCodec::new(
//!     b"access_secret_at_least_32_bytes_long!",
//!     b"refresh_secret_at_least_32_bytes_long",
//! );
//! let token = codec.issue(TokenClass::Access, 42).unwrap();
//! assert_eq!(codec.parse(TokenClass::Access, &token).unwrap(), 42);
//! assert!(codec.parse(TokenClass::Refresh, &token).is_err());
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, HashingCost, TokenCodec};
//!
//! let codec = TokenCodec::new(
//!     b"access_secret_at_least_32_bytes_long!",
//!     b"refresh_secret_at_least_32_bytes_long",
//! );
//! let auth = Authenticator::new(HashingCost::minimum(), codec).unwrap();
//!
//! // Register: hash password
//! let hash = auth.hash_password("My_passw0rd").unwrap();
//!
//! // Login: verify and issue tokens
//! let pair = auth.authenticate("My_passw0rd", &hash, 7).unwrap();
//!
//! // Validate tokens
//! assert_eq!(auth.parse_access_token(&pair.access_token).unwrap(), 7);
//! assert_eq!(auth.parse_refresh_token(&pair.refresh_token).unwrap(), 7);
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;
pub mod token;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::HashingCost;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::TokenClass;
pub use token::TokenCodec;
pub use token::TokenPair;
pub use token::ACCESS_TOKEN_TTL;
pub use token::REFRESH_TOKEN_TTL;
