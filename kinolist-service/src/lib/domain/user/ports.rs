use async_trait::async_trait;
use auth::JwtError;
use auth::TokenPair;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::SignInCredentials;
use crate::domain::user::models::SignUpCredentials;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Port for account and session operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new account.
    ///
    /// # Arguments
    /// * `credentials` - Raw username, email and password
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `Validation` - First credential rule violated
    /// * `UsernameAlreadyExists` / `EmailAlreadyExists` - Duplicate account
    /// * `Database` / `Timeout` - Storage failure
    async fn sign_up(&self, credentials: SignUpCredentials) -> Result<User, UserError>;

    /// Check credentials and issue a fresh token pair.
    ///
    /// Records the login time on success.
    ///
    /// # Errors
    /// * `NotFoundByEmail` - No account with this email
    /// * `InvalidCredentials` - Password does not match
    /// * `TokenIssue` - Tokens could not be signed
    /// * `Database` / `Timeout` - Storage failure
    async fn sign_in(&self, credentials: SignInCredentials) -> Result<TokenPair, UserError>;

    /// End a session. Tokens are stateless, so nothing is revoked and this
    /// never fails; the transport layer drops the refresh cookie.
    fn sign_out(&self, refresh_token: Option<String>) -> Result<(), UserError>;

    /// Resolve the subject of an access token.
    fn parse_access_token(&self, token: &str) -> Result<UserId, JwtError>;

    /// Resolve the subject of a refresh token.
    fn parse_refresh_token(&self, token: &str) -> Result<UserId, JwtError>;

    /// Issue a new pair for an already-authenticated subject.
    ///
    /// # Errors
    /// * `TokenIssue` - Tokens could not be signed
    fn update_tokens(&self, user_id: UserId) -> Result<TokenPair, UserError>;

    /// # Errors
    /// * `NotFound` - User does not exist
    async fn get_user(&self, user_id: UserId) -> Result<User, UserError>;

    /// Remove an account and return what was removed.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    async fn delete_user(&self, user_id: UserId) -> Result<User, UserError>;
}

/// Persistence operations for user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new account and return it with its assigned id.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Database` - Database operation failed
    async fn create_account(&self, user: NewUser) -> Result<User, UserError>;

    /// # Returns
    /// Optional user entity (None if not found)
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

    /// # Returns
    /// Optional user entity (None if not found)
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserError>;

    /// Store `user.last_login` for `user.id`.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    async fn update_last_login(&self, user: &User) -> Result<(), UserError>;

    /// Remove an account.
    ///
    /// # Returns
    /// The removed user (None if it did not exist)
    async fn delete(&self, id: UserId) -> Result<Option<User>, UserError>;
}
