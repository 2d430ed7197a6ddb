use std::collections::HashMap;
use std::sync::atomic::AtomicI64;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use auth::Claims;
use auth::HashingCost;
use auth::JwtHandler;
use auth::TokenCodec;
use auth::ACCESS_TOKEN_TTL;
use auth::REFRESH_TOKEN_TTL;
use kinolist_service::domain::list::errors::ListError;
use kinolist_service::domain::list::models::ListId;
use kinolist_service::domain::list::models::ListInfo;
use kinolist_service::domain::list::models::ListUnit;
use kinolist_service::domain::list::models::ListUnitChanges;
use kinolist_service::domain::list::models::Movie;
use kinolist_service::domain::list::models::MovieId;
use kinolist_service::domain::list::ports::ListRepository;
use kinolist_service::domain::list::ports::MovieSearch;
use kinolist_service::domain::list::service::ListService;
use kinolist_service::domain::user::errors::UserError;
use kinolist_service::domain::user::models::NewUser;
use kinolist_service::domain::user::models::User;
use kinolist_service::domain::user::models::UserId;
use kinolist_service::domain::user::ports::UserRepository;
use kinolist_service::domain::user::service::AuthService;
use kinolist_service::inbound::http::cookies::RefreshCookie;
use kinolist_service::inbound::http::router::create_router;
use serde_json::json;

pub const ACCESS_SECRET: &[u8] = b"test-access-secret-for-signing-at-least-32-bytes";
pub const REFRESH_SECRET: &[u8] = b"test-refresh-secret-for-signing-at-least-32-bytes";

/// Test application that spawns a real server over in-memory storage
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub access_handler: JwtHandler,
    pub refresh_handler: JwtHandler,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        Self::spawn_with_list_repository(InMemoryListRepository::default()).await
    }

    /// Spawn the application over a caller-provided list repository
    pub async fn spawn_with_list_repository<LR: ListRepository>(list_repository: LR) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let authenticator = Arc::new(
            Authenticator::new(
                HashingCost::minimum(),
                TokenCodec::new(ACCESS_SECRET, REFRESH_SECRET),
            )
            .expect("Failed to create authenticator"),
        );

        let auth_service = Arc::new(AuthService::new(
            Arc::new(InMemoryUserRepository::default()),
            authenticator,
        ));
        let list_service = Arc::new(ListService::new(
            Arc::new(list_repository),
            Arc::new(StubMovieSearch::with_catalogue()),
        ));

        let router = create_router(auth_service, list_service, RefreshCookie::default());

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            access_handler: JwtHandler::new(ACCESS_SECRET),
            refresh_handler: JwtHandler::new(REFRESH_SECRET),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(self.url(path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(self.url(path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PATCH request with Bearer token
    pub fn patch_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client.patch(self.url(path)).bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(self.url(path)).bearer_auth(token)
    }

    /// Register an account, returning the response body (`list_id`, `user_id`).
    pub async fn sign_up(&self, username: &str, email: &str) -> serde_json::Value {
        let response = self
            .post("/auth/signup")
            .json(&json!({
                "username": username,
                "email": email,
                "password": "Str0ngPass",
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        response.json().await.expect("Failed to parse response")
    }

    /// Sign in with the password used by `sign_up`, returning the token pair.
    pub async fn sign_in(&self, email: &str) -> (String, String) {
        let response = self
            .post("/auth/signin")
            .json(&json!({ "email": email, "password": "Str0ngPass" }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        (
            body["access_token"].as_str().unwrap().to_string(),
            body["refresh_token"].as_str().unwrap().to_string(),
        )
    }

    /// Access token for `user_id` that expired one second ago.
    pub fn expired_access_token(&self, user_id: i64) -> String {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims::for_subject(user_id, ACCESS_TOKEN_TTL)
            .with_issued_at(now - ACCESS_TOKEN_TTL.as_secs() as i64 - 1)
            .with_expiration(now - 1);
        self.access_handler.encode(&claims).unwrap()
    }

    /// Valid refresh token for `user_id`.
    pub fn refresh_token(&self, user_id: i64) -> String {
        self.refresh_handler
            .encode(&Claims::for_subject(user_id, REFRESH_TOKEN_TTL))
            .unwrap()
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
    last_id: AtomicI64,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create_account(&self, user: NewUser) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();

        if users.iter().any(|u| u.username == user.username) {
            return Err(UserError::UsernameAlreadyExists(user.username.to_string()));
        }
        if users.iter().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }

        let created = User {
            id: UserId(self.last_id.fetch_add(1, Ordering::SeqCst) + 1),
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            created_on: user.created_on,
            last_login: user.last_login,
        };
        users.push(created.clone());
        Ok(created)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email.as_str() == email).cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn update_last_login(&self, user: &User) -> Result<(), UserError> {
        let mut users = self.users.lock().unwrap();
        let stored = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(UserError::NotFound(user.id))?;
        stored.last_login = user.last_login;
        Ok(())
    }

    async fn delete(&self, id: UserId) -> Result<Option<User>, UserError> {
        let mut users = self.users.lock().unwrap();
        let position = users.iter().position(|u| u.id == id);
        Ok(position.map(|i| users.remove(i)))
    }
}

#[derive(Default)]
pub struct InMemoryListRepository {
    lists: Mutex<HashMap<UserId, (ListId, Vec<ListUnit>)>>,
}

impl InMemoryListRepository {
    fn with_units<T>(
        &self,
        list_id: ListId,
        f: impl FnOnce(&mut Vec<ListUnit>) -> T,
    ) -> Result<T, ListError> {
        let mut lists = self.lists.lock().unwrap();
        let (_, units) = lists
            .values_mut()
            .find(|(id, _)| *id == list_id)
            .ok_or_else(|| ListError::Database(format!("list {list_id} does not exist")))?;
        Ok(f(units))
    }
}

#[async_trait]
impl ListRepository for InMemoryListRepository {
    async fn create_list(&self, owner: UserId) -> Result<ListInfo, ListError> {
        let mut lists = self.lists.lock().unwrap();
        let list_id = ListId(owner.0 * 10);
        lists.insert(owner, (list_id, Vec::new()));
        Ok(ListInfo {
            list_id,
            user_id: owner,
        })
    }

    async fn find_list(&self, owner: UserId) -> Result<Option<ListInfo>, ListError> {
        let lists = self.lists.lock().unwrap();
        Ok(lists.get(&owner).map(|(list_id, _)| ListInfo {
            list_id: *list_id,
            user_id: owner,
        }))
    }

    async fn add_unit(&self, list_id: ListId, unit: &ListUnit) -> Result<(), ListError> {
        self.with_units(list_id, |units| {
            if units.iter().any(|u| u.movie.id == unit.movie.id) {
                return Err(ListError::AlreadyInList(unit.movie.id));
            }
            units.push(unit.clone());
            Ok(())
        })?
    }

    async fn units(&self, list_id: ListId) -> Result<Vec<ListUnit>, ListError> {
        self.with_units(list_id, |units| units.clone())
    }

    async fn update_unit(
        &self,
        list_id: ListId,
        movie_id: MovieId,
        changes: &ListUnitChanges,
    ) -> Result<Option<ListUnit>, ListError> {
        self.with_units(list_id, |units| {
            units
                .iter_mut()
                .find(|u| u.movie.id == movie_id)
                .map(|unit| {
                    changes.apply(unit);
                    unit.clone()
                })
        })
    }

    async fn delete_unit(
        &self,
        list_id: ListId,
        movie_id: MovieId,
    ) -> Result<Option<ListUnit>, ListError> {
        self.with_units(list_id, |units| {
            let position = units.iter().position(|u| u.movie.id == movie_id);
            position.map(|i| units.remove(i))
        })
    }
}

/// List repository whose first `failures` calls to `create_list` fail.
pub struct FlakyListRepository {
    inner: InMemoryListRepository,
    failures: AtomicUsize,
}

impl FlakyListRepository {
    pub fn failing_create_list(failures: usize) -> Self {
        Self {
            inner: InMemoryListRepository::default(),
            failures: AtomicUsize::new(failures),
        }
    }
}

#[async_trait]
impl ListRepository for FlakyListRepository {
    async fn create_list(&self, owner: UserId) -> Result<ListInfo, ListError> {
        let failing = self
            .failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok();
        if failing {
            return Err(ListError::Database("connection reset".to_string()));
        }
        self.inner.create_list(owner).await
    }

    async fn find_list(&self, owner: UserId) -> Result<Option<ListInfo>, ListError> {
        self.inner.find_list(owner).await
    }

    async fn add_unit(&self, list_id: ListId, unit: &ListUnit) -> Result<(), ListError> {
        self.inner.add_unit(list_id, unit).await
    }

    async fn units(&self, list_id: ListId) -> Result<Vec<ListUnit>, ListError> {
        self.inner.units(list_id).await
    }

    async fn update_unit(
        &self,
        list_id: ListId,
        movie_id: MovieId,
        changes: &ListUnitChanges,
    ) -> Result<Option<ListUnit>, ListError> {
        self.inner.update_unit(list_id, movie_id, changes).await
    }

    async fn delete_unit(
        &self,
        list_id: ListId,
        movie_id: MovieId,
    ) -> Result<Option<ListUnit>, ListError> {
        self.inner.delete_unit(list_id, movie_id).await
    }
}

/// Movie search over a fixed catalogue, matching by case-insensitive substring.
pub struct StubMovieSearch {
    catalogue: Vec<Movie>,
}

impl StubMovieSearch {
    pub fn with_catalogue() -> Self {
        Self {
            catalogue: vec![
                Movie {
                    id: MovieId(43395),
                    name: "Solaris".to_string(),
                },
                Movie {
                    id: MovieId(43911),
                    name: "Stalker".to_string(),
                },
                Movie {
                    id: MovieId(361),
                    name: "Fight Club".to_string(),
                },
            ],
        }
    }
}

#[async_trait]
impl MovieSearch for StubMovieSearch {
    async fn search(&self, name: &str) -> Result<Option<Movie>, ListError> {
        let needle = name.to_lowercase();
        Ok(self
            .catalogue
            .iter()
            .find(|movie| movie.name.to_lowercase().contains(&needle))
            .cloned())
    }
}
