use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::JwtError;
use auth::TokenPair;
use chrono::Utc;

use crate::domain::deadline::within;
use crate::domain::deadline::REPOSITORY_DEADLINE;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::SignInCredentials;
use crate::domain::user::models::SignUpCredentials;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::AuthServicePort;
use crate::domain::user::ports::UserRepository;

/// Domain service implementation for account and session operations.
///
/// Concrete implementation of AuthServicePort with dependency injection.
/// Every repository call is bounded by `deadline`.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
    deadline: Duration,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hashing and token issuance
    ///
    /// # Returns
    /// Service using the default repository deadline
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self::with_deadline(repository, authenticator, REPOSITORY_DEADLINE)
    }

    pub fn with_deadline(
        repository: Arc<UR>,
        authenticator: Arc<Authenticator>,
        deadline: Duration,
    ) -> Self {
        Self {
            repository,
            authenticator,
            deadline,
        }
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn sign_up(&self, credentials: SignUpCredentials) -> Result<User, UserError> {
        let command = credentials.validate()?;

        let password_hash = self
            .authenticator
            .hash_password(command.password.as_str())?;

        let now = Utc::now();
        let new_user = NewUser {
            username: command.username,
            email: command.email,
            password_hash,
            created_on: now,
            last_login: now,
        };

        let user = within(self.deadline, self.repository.create_account(new_user)).await?;
        tracing::info!(user_id = %user.id, "account created");

        Ok(user)
    }

    async fn sign_in(&self, credentials: SignInCredentials) -> Result<TokenPair, UserError> {
        let mut user = within(
            self.deadline,
            self.repository.find_by_email(&credentials.email),
        )
        .await?
        .ok_or_else(|| UserError::NotFoundByEmail(credentials.email.clone()))?;

        let tokens = self
            .authenticator
            .authenticate(&credentials.password, &user.password_hash, user.id.0)
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => {
                    tracing::warn!(user_id = %user.id, "sign-in rejected: wrong password");
                    UserError::InvalidCredentials
                }
                AuthenticationError::PasswordError(e) => UserError::Password(e),
                AuthenticationError::JwtError(e) => UserError::TokenIssue(e),
            })?;

        user.last_login = Utc::now();
        within(self.deadline, self.repository.update_last_login(&user)).await?;

        tracing::info!(user_id = %user.id, "signed in");
        Ok(tokens)
    }

    fn sign_out(&self, refresh_token: Option<String>) -> Result<(), UserError> {
        tracing::info!(had_refresh_token = refresh_token.is_some(), "signed out");
        Ok(())
    }

    fn parse_access_token(&self, token: &str) -> Result<UserId, JwtError> {
        self.authenticator.parse_access_token(token).map(UserId)
    }

    fn parse_refresh_token(&self, token: &str) -> Result<UserId, JwtError> {
        self.authenticator.parse_refresh_token(token).map(UserId)
    }

    fn update_tokens(&self, user_id: UserId) -> Result<TokenPair, UserError> {
        self.authenticator
            .issue_tokens(user_id.0)
            .map_err(UserError::TokenIssue)
    }

    async fn get_user(&self, user_id: UserId) -> Result<User, UserError> {
        within(self.deadline, self.repository.find_by_id(user_id))
            .await?
            .ok_or(UserError::NotFound(user_id))
    }

    async fn delete_user(&self, user_id: UserId) -> Result<User, UserError> {
        let user = within(self.deadline, self.repository.delete(user_id))
            .await?
            .ok_or(UserError::NotFound(user_id))?;

        tracing::info!(user_id = %user.id, "account deleted");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use auth::HashingCost;
    use auth::TokenCodec;
    use mockall::mock;

    use super::*;
    use crate::domain::deadline::DeadlineExceeded;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::Username;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create_account(&self, user: NewUser) -> Result<User, UserError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;
            async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserError>;
            async fn update_last_login(&self, user: &User) -> Result<(), UserError>;
            async fn delete(&self, id: UserId) -> Result<Option<User>, UserError>;
        }
    }

    fn authenticator() -> Arc<Authenticator> {
        let codec = TokenCodec::new(
            b"test_access_secret_that_is_long_enough",
            b"test_refresh_secret_that_is_long_enough",
        );
        Arc::new(Authenticator::new(HashingCost::minimum(), codec).unwrap())
    }

    fn stored_user(id: i64, authenticator: &Authenticator, password: &str) -> User {
        User {
            id: UserId(id),
            username: Username::new("kino_fan42".to_string()).unwrap(),
            email: EmailAddress::new("kinofan@mail.ru".to_string()).unwrap(),
            password_hash: authenticator.hash_password(password).unwrap(),
            created_on: Utc::now(),
            last_login: Utc::now(),
        }
    }

    fn sign_up_credentials(username: &str, email: &str, password: &str) -> SignUpCredentials {
        SignUpCredentials {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_sign_up_success() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_create_account()
            .withf(|user| {
                user.username.as_str() == "kino_fan42"
                    && user.email.as_str() == "kinofan@mail.ru"
                    && user.password_hash.starts_with("$argon2id")
                    && user.created_on == user.last_login
            })
            .times(1)
            .returning(|new_user| {
                Ok(User {
                    id: UserId(1),
                    username: new_user.username,
                    email: new_user.email,
                    password_hash: new_user.password_hash,
                    created_on: new_user.created_on,
                    last_login: new_user.last_login,
                })
            });

        let service = AuthService::new(Arc::new(repository), authenticator());

        let user = service
            .sign_up(sign_up_credentials(
                "kino_fan42",
                "kinofan@mail.ru",
                "Str0ngPass",
            ))
            .await
            .unwrap();

        assert_eq!(user.id, UserId(1));
        assert_ne!(user.password_hash, "Str0ngPass");
    }

    #[tokio::test]
    async fn test_sign_up_validation_stops_before_storage() {
        let mut repository = MockTestUserRepository::new();
        repository.expect_create_account().times(0);

        let service = AuthService::new(Arc::new(repository), authenticator());

        let result = service
            .sign_up(sign_up_credentials("kino_fan42", "kinofan@mail.ru", "weak"))
            .await;

        match result {
            Err(UserError::Validation(e)) => assert_eq!(e.field, "password"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_sign_up_duplicate_email() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_create_account()
            .times(1)
            .returning(|user| Err(UserError::EmailAlreadyExists(user.email.to_string())));

        let service = AuthService::new(Arc::new(repository), authenticator());

        let result = service
            .sign_up(sign_up_credentials(
                "kino_fan42",
                "kinofan@mail.ru",
                "Str0ngPass",
            ))
            .await;

        assert!(matches!(result, Err(UserError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_sign_in_issues_tokens_and_records_login() {
        let authenticator = authenticator();
        let user = stored_user(7, &authenticator, "Str0ngPass");
        let previous_login = user.last_login;

        let mut repository = MockTestUserRepository::new();
        let returned_user = user.clone();
        repository
            .expect_find_by_email()
            .withf(|email| email == "kinofan@mail.ru")
            .times(1)
            .returning(move |_| Ok(Some(returned_user.clone())));
        repository
            .expect_update_last_login()
            .withf(move |user| user.id == UserId(7) && user.last_login >= previous_login)
            .times(1)
            .returning(|_| Ok(()));

        let service = AuthService::new(Arc::new(repository), authenticator);

        let tokens = service
            .sign_in(SignInCredentials {
                email: "kinofan@mail.ru".to_string(),
                password: "Str0ngPass".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(service.parse_access_token(&tokens.access_token), Ok(UserId(7)));
        assert_eq!(service.parse_refresh_token(&tokens.refresh_token), Ok(UserId(7)));
    }

    #[tokio::test]
    async fn test_sign_in_wrong_password() {
        let authenticator = authenticator();
        let user = stored_user(7, &authenticator, "Str0ngPass");

        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));
        repository.expect_update_last_login().times(0);

        let service = AuthService::new(Arc::new(repository), authenticator);

        let result = service
            .sign_in(SignInCredentials {
                email: "kinofan@mail.ru".to_string(),
                password: "Str0ngPasS".to_string(),
            })
            .await;

        assert!(matches!(result, Err(UserError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_sign_in_unknown_email() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(repository), authenticator());

        let err = service
            .sign_in(SignInCredentials {
                email: "nobody@mail.ru".to_string(),
                password: "Str0ngPass".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, UserError::NotFoundByEmail(_)));
        assert_eq!(
            err.to_string(),
            "user with such email nobody@mail.ru doesn't exist"
        );
    }

    #[test]
    fn test_sign_out_is_idempotent() {
        let service = AuthService::new(Arc::new(MockTestUserRepository::new()), authenticator());

        assert!(service.sign_out(Some("whatever".to_string())).is_ok());
        assert!(service.sign_out(None).is_ok());
    }

    #[test]
    fn test_token_classes_are_not_interchangeable() {
        let service = AuthService::new(Arc::new(MockTestUserRepository::new()), authenticator());

        let tokens = service.update_tokens(UserId(88)).unwrap();

        assert_eq!(service.parse_access_token(&tokens.access_token), Ok(UserId(88)));
        assert!(matches!(
            service.parse_access_token(&tokens.refresh_token),
            Err(JwtError::Malformed(_))
        ));
        assert!(matches!(
            service.parse_refresh_token(&tokens.access_token),
            Err(JwtError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_id()
            .withf(|id| *id == UserId(404))
            .times(1)
            .returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(repository), authenticator());

        let result = service.get_user(UserId(404)).await;
        assert!(matches!(result, Err(UserError::NotFound(UserId(404)))));
    }

    #[tokio::test]
    async fn test_delete_user_returns_removed_account() {
        let authenticator = authenticator();
        let user = stored_user(3, &authenticator, "Str0ngPass");

        let mut repository = MockTestUserRepository::new();
        let returned_user = user.clone();
        repository
            .expect_delete()
            .withf(|id| *id == UserId(3))
            .times(1)
            .returning(move |_| Ok(Some(returned_user.clone())));

        let service = AuthService::new(Arc::new(repository), authenticator);

        assert_eq!(service.delete_user(UserId(3)).await.unwrap(), user);
    }

    struct StalledRepository;

    #[async_trait]
    impl UserRepository for StalledRepository {
        async fn create_account(&self, _user: NewUser) -> Result<User, UserError> {
            std::future::pending().await
        }
        async fn find_by_email(&self, _email: &str) -> Result<Option<User>, UserError> {
            std::future::pending().await
        }
        async fn find_by_id(&self, _id: UserId) -> Result<Option<User>, UserError> {
            std::future::pending().await
        }
        async fn update_last_login(&self, _user: &User) -> Result<(), UserError> {
            std::future::pending().await
        }
        async fn delete(&self, _id: UserId) -> Result<Option<User>, UserError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_repository_calls_are_bounded() {
        let deadline = Duration::from_millis(20);
        let service =
            AuthService::with_deadline(Arc::new(StalledRepository), authenticator(), deadline);

        let result = service.get_user(UserId(1)).await;
        assert!(matches!(
            result,
            Err(UserError::Timeout(DeadlineExceeded(d))) if d == deadline
        ));

        let result = service
            .sign_in(SignInCredentials {
                email: "kinofan@mail.ru".to_string(),
                password: "Str0ngPass".to_string(),
            })
            .await;
        assert!(matches!(result, Err(UserError::Timeout(_))));
    }
}
