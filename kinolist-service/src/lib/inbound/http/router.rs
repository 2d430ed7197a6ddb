use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::patch;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::cookies::RefreshCookie;
use super::handlers::add_movie::add_movie;
use super::handlers::delete_movie::delete_movie;
use super::handlers::delete_user::delete_user;
use super::handlers::get_user::get_user;
use super::handlers::list_movies::list_movies;
use super::handlers::sign_in::sign_in;
use super::handlers::sign_out::sign_out;
use super::handlers::sign_up::sign_up;
use super::handlers::update_movie::update_movie;
use super::middleware::identify_user;
use super::middleware::SessionState;
use crate::domain::list::ports::ListServicePort;
use crate::domain::user::ports::AuthServicePort;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthServicePort>,
    pub list_service: Arc<dyn ListServicePort>,
    pub refresh_cookie: RefreshCookie,
}

impl AppState {
    pub fn session(&self) -> SessionState {
        SessionState {
            auth_service: Arc::clone(&self.auth_service),
            refresh_cookie: self.refresh_cookie.clone(),
        }
    }
}

pub fn create_router(
    auth_service: Arc<dyn AuthServicePort>,
    list_service: Arc<dyn ListServicePort>,
    refresh_cookie: RefreshCookie,
) -> Router {
    let state = AppState {
        auth_service,
        list_service,
        refresh_cookie,
    };

    let public_routes = Router::new()
        .route("/auth/signup", post(sign_up))
        .route("/auth/signin", post(sign_in))
        .route("/auth/signout", post(sign_out));

    let protected_routes = Router::new()
        .route("/user/:id", get(get_user).delete(delete_user))
        .route("/list", get(list_movies).post(add_movie))
        .route("/list/:id", patch(update_movie).delete(delete_movie))
        .route_layer(middleware::from_fn_with_state(
            state.session(),
            identify_user,
        ));

    // Headers carry bearer tokens and cookies; they are never recorded.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
