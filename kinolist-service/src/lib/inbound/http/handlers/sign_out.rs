use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::CookieJar;

use super::ApiError;
use crate::inbound::http::cookies::REFRESH_COOKIE_NAME;
use crate::inbound::http::router::AppState;

/// Drop the client's refresh cookie. Succeeds with or without a session.
pub async fn sign_out(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, StatusCode), ApiError> {
    let refresh_token = jar
        .get(REFRESH_COOKIE_NAME)
        .map(|cookie| cookie.value().to_string());

    state.auth_service.sign_out(refresh_token)?;

    Ok((jar.add(state.refresh_cookie.removal()), StatusCode::OK))
}
