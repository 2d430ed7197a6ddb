use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::list_movies::ListUnitData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::list::models::NewListUnit;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Find a title by name and add it to the caller's list.
pub async fn add_movie(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthenticatedUser>,
    payload: Result<Json<AddMovieRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<ListUnitData>, ApiError> {
    let Json(body) = payload?;

    state
        .list_service
        .add_movie(identity.user_id, body.into())
        .await
        .map_err(ApiError::from)
        .map(|ref unit| ApiSuccess::new(StatusCode::OK, unit.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AddMovieRequestBody {
    name: String,
    status: String,
    #[serde(default)]
    score: u8,
    #[serde(default)]
    is_favorite: bool,
}

impl From<AddMovieRequestBody> for NewListUnit {
    fn from(body: AddMovieRequestBody) -> Self {
        Self {
            name: body.name,
            status: body.status,
            score: body.score,
            is_favorite: body.is_favorite,
        }
    }
}
