use std::sync::Arc;

use auth::Authenticator;
use auth::TokenCodec;
use kinolist_service::config::Config;
use kinolist_service::domain::list::service::ListService;
use kinolist_service::domain::user::service::AuthService;
use kinolist_service::inbound::http::cookies::RefreshCookie;
use kinolist_service::inbound::http::router::create_router;
use kinolist_service::outbound::movies::KinopoiskClient;
use kinolist_service::outbound::repositories::PostgresListRepository;
use kinolist_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kinolist_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "kinolist-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        max_connections = config.database.max_connections,
        movies_base_url = %config.movies.base_url,
        cookie_path = %config.cookie.path,
        cookie_secure = config.cookie.secure,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let token_codec = TokenCodec::new(
        config.jwt.access_secret.as_bytes(),
        config.jwt.refresh_secret.as_bytes(),
    );
    let authenticator = Arc::new(Authenticator::new(config.password.into(), token_codec)?);

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let list_repository = Arc::new(PostgresListRepository::new(pg_pool));
    let movie_search = Arc::new(KinopoiskClient::new(
        &config.movies.base_url,
        config.movies.api_key.clone(),
        config.movies.timeout(),
    )?);

    let auth_service = Arc::new(AuthService::new(user_repository, authenticator));
    let list_service = Arc::new(ListService::new(list_repository, movie_search));
    let refresh_cookie = RefreshCookie::new(config.cookie.path.clone(), config.cookie.secure);

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(auth_service, list_service, refresh_cookie);

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}
