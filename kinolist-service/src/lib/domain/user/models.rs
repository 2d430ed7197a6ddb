use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::errors::ValidationError;

/// User aggregate entity.
///
/// Represents a registered account. The id is assigned by storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: String,
    pub created_on: DateTime<Utc>,
    pub last_login: DateTime<Utc>,
}

/// Account about to be created; storage assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: String,
    pub created_on: DateTime<Utc>,
    pub last_login: DateTime<Utc>,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub i64);

impl UserId {
    /// Parse a user ID from a path segment.
    ///
    /// # Errors
    /// * `ValidationError` - String is not a decimal integer
    pub fn from_string(s: &str) -> Result<Self, ValidationError> {
        s.parse()
            .map(UserId)
            .map_err(|_| ValidationError::new("id", format!("{s:?} is not a numeric id")))
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Username value type
///
/// 6 to 50 characters, ASCII letters, digits and underscore only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 6;
    const MAX_LENGTH: usize = 50;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `ValidationError` on field `username`
    pub fn new(username: String) -> Result<Self, ValidationError> {
        let length = username.chars().count();
        if (Self::MIN_LENGTH..=Self::MAX_LENGTH).contains(&length)
            && username.chars().all(is_word_char)
        {
            Ok(Self(username))
        } else {
            Err(ValidationError::new(
                "username",
                "must consist of letters, digits and underscores and contain from 6 to 50 characters",
            ))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// `local@label.tld` where the local part has 6 to 30 letters, digits,
/// `_`, `-` or `.`, the domain label 1 to 10 letters, digits, `_` or `-`,
/// and the top-level domain 2 to 4 of the same.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `ValidationError` on field `email`
    pub fn new(email: String) -> Result<Self, ValidationError> {
        if Self::is_well_formed(&email) {
            Ok(Self(email))
        } else {
            Err(ValidationError::new(
                "email",
                "must look like name@domain.tld with 6 to 30 characters before '@'",
            ))
        }
    }

    fn is_well_formed(email: &str) -> bool {
        let Some((local, domain)) = email.split_once('@') else {
            return false;
        };
        let Some((label, tld)) = domain.split_once('.') else {
            return false;
        };

        let segment = |part: &str, min: usize, max: usize, extra: &[char]| {
            let length = part.chars().count();
            (min..=max).contains(&length)
                && part
                    .chars()
                    .all(|c| is_word_char(c) || c == '-' || extra.contains(&c))
        };

        segment(local, 6, 30, &['.']) && segment(label, 1, 10, &[]) && segment(tld, 2, 4, &[])
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password that satisfies the complexity rule.
///
/// 8 to 30 characters with at least one digit, one lowercase and one
/// uppercase letter. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 8;
    const MAX_LENGTH: usize = 30;

    /// # Errors
    /// * `ValidationError` on field `password`
    pub fn new(password: String) -> Result<Self, ValidationError> {
        let mut length = 0;
        let (mut digit, mut lower, mut upper) = (false, false, false);

        for c in password.chars() {
            length += 1;
            if c.is_ascii_digit() {
                digit = true;
            } else if c.is_lowercase() {
                lower = true;
            } else if c.is_uppercase() {
                upper = true;
            }
        }

        if digit && lower && upper && (Self::MIN_LENGTH..=Self::MAX_LENGTH).contains(&length) {
            Ok(Self(password))
        } else {
            Err(ValidationError::new(
                "password",
                "must contain from 8 to 30 characters, at least one uppercase letter, one lowercase letter and one digit",
            ))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Raw sign-up payload, not yet validated.
#[derive(Clone, PartialEq, Eq)]
pub struct SignUpCredentials {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl SignUpCredentials {
    /// Validate username, then email, then password; the first failure wins.
    pub fn validate(self) -> Result<SignUpCommand, ValidationError> {
        let username = Username::new(self.username)?;
        let email = EmailAddress::new(self.email)?;
        let password = Password::new(self.password)?;
        Ok(SignUpCommand {
            username,
            email,
            password,
        })
    }
}

impl fmt::Debug for SignUpCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignUpCredentials")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Validated sign-up request
#[derive(Debug)]
pub struct SignUpCommand {
    pub username: Username,
    pub email: EmailAddress,
    pub password: Password,
}

/// Sign-in payload. Not shape-validated: unknown emails and wrong
/// passwords are reported by the lookup and the hash check.
#[derive(Clone, PartialEq, Eq)]
pub struct SignInCredentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for SignInCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignInCredentials")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}
