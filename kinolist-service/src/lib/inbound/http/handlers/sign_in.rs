use auth::TokenPair;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::SignInCredentials;
use crate::inbound::http::router::AppState;

/// Exchange email and password for a token pair.
///
/// The refresh token is also set as the `refreshToken` cookie.
pub async fn sign_in(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<SignInRequestBody>, JsonRejection>,
) -> Result<(CookieJar, ApiSuccess<TokenPair>), ApiError> {
    let Json(body) = payload?;

    let tokens = state.auth_service.sign_in(body.into()).await?;
    let jar = jar.add(state.refresh_cookie.issue(tokens.refresh_token.clone()));

    Ok((jar, ApiSuccess::new(StatusCode::OK, tokens)))
}

#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct SignInRequestBody {
    email: String,
    password: String,
}

impl From<SignInRequestBody> for SignInCredentials {
    fn from(body: SignInRequestBody) -> Self {
        Self {
            email: body.email,
            password: body.password,
        }
    }
}
