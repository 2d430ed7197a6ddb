use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::list::models::ListInfo;
use crate::domain::user::models::SignUpCredentials;
use crate::inbound::http::router::AppState;

/// Register an account and create its empty movie list.
///
/// An account is only kept together with its list: when the list cannot be
/// created the account is removed again, so the sign-up can be retried.
pub async fn sign_up(
    State(state): State<AppState>,
    payload: Result<Json<SignUpRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<ListInfoData>, ApiError> {
    let Json(body) = payload?;

    let user = state.auth_service.sign_up(body.into()).await?;
    let list = match state.list_service.create_list(user.id).await {
        Ok(list) => list,
        Err(e) => {
            tracing::warn!(user_id = %user.id, error = %e, "list creation failed, removing account");
            if let Err(rollback) = state.auth_service.delete_user(user.id).await {
                tracing::error!(
                    user_id = %user.id,
                    error = %rollback,
                    "failed to remove account left without a movie list"
                );
            }
            return Err(e.into());
        }
    };

    Ok(ApiSuccess::new(StatusCode::OK, list.into()))
}

#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct SignUpRequestBody {
    username: String,
    email: String,
    password: String,
}

impl From<SignUpRequestBody> for SignUpCredentials {
    fn from(body: SignUpRequestBody) -> Self {
        Self {
            username: body.username,
            email: body.email,
            password: body.password,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListInfoData {
    pub list_id: i64,
    pub user_id: i64,
}

impl From<ListInfo> for ListInfoData {
    fn from(list: ListInfo) -> Self {
        Self {
            list_id: list.list_id.0,
            user_id: list.user_id.0,
        }
    }
}
