use std::sync::Arc;

use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;

use crate::domain::user::models::UserId;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::cookies::RefreshCookie;
use crate::inbound::http::cookies::REFRESH_COOKIE_NAME;
use crate::inbound::http::handlers::ApiError;

/// Extension type to store the resolved session identity in request extensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// State needed by the session middleware.
#[derive(Clone)]
pub struct SessionState {
    pub auth_service: Arc<dyn AuthServicePort>,
    pub refresh_cookie: RefreshCookie,
}

/// Resolve the caller from the bearer access token, refreshing the session
/// when the access token has merely expired.
///
/// * no `Bearer <token>` header: 401 `invalid authorization header`
/// * valid access token: continue as that user
/// * malformed access token: 401 with the token error
/// * expired access token, refresh cookie missing or invalid: 400 with the
///   access token error
/// * expired access token, valid refresh cookie: issue a new pair, continue
///   as that user and attach `Authorization: Bearer <new>` plus a fresh
///   refresh cookie to the response
/// * new pair could not be issued: 500
pub async fn identify_user(
    State(session): State<SessionState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let Some(access_token) = bearer_token(req.headers()) else {
        tracing::warn!("rejected request without a bearer token");
        return ApiError::Unauthorized("invalid authorization header".to_string()).into_response();
    };

    let access_error = match session.auth_service.parse_access_token(access_token) {
        Ok(user_id) => {
            req.extensions_mut().insert(AuthenticatedUser { user_id });
            return next.run(req).await;
        }
        Err(e) if e.is_expired() => e,
        Err(e) => {
            tracing::warn!(error = %e, "rejected malformed access token");
            return ApiError::Unauthorized(e.to_string()).into_response();
        }
    };

    let refreshed = jar
        .get(REFRESH_COOKIE_NAME)
        .map(|cookie| session.auth_service.parse_refresh_token(cookie.value()));

    let user_id = match refreshed {
        Some(Ok(user_id)) => user_id,
        Some(Err(e)) => {
            tracing::warn!(error = %e, "access token expired and refresh token rejected");
            return ApiError::BadRequest(access_error.to_string()).into_response();
        }
        None => {
            tracing::warn!("access token expired and no refresh token presented");
            return ApiError::BadRequest(access_error.to_string()).into_response();
        }
    };

    let tokens = match session.auth_service.update_tokens(user_id) {
        Ok(tokens) => tokens,
        Err(e) => return ApiError::from(e).into_response(),
    };

    let bearer = match HeaderValue::from_str(&format!("Bearer {}", tokens.access_token)) {
        Ok(value) => value,
        Err(e) => {
            tracing::error!(error = %e, "issued access token is not a valid header value");
            return ApiError::InternalServerError("failed to issue tokens".to_string())
                .into_response();
        }
    };

    tracing::info!(user_id = %user_id, "session refreshed");

    req.headers_mut().insert(AUTHORIZATION, bearer.clone());
    req.extensions_mut().insert(AuthenticatedUser { user_id });
    let response = next.run(req).await;

    let jar = jar.add(session.refresh_cookie.issue(tokens.refresh_token));
    (jar, [(AUTHORIZATION, bearer)], response).into_response()
}

/// Token of an `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?;

    if token.is_empty() || token.contains(' ') {
        return None;
    }
    Some(token)
}
