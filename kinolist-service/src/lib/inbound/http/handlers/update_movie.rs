use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::list_movies::ListUnitData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::list::models::ListUnitPatch;
use crate::domain::list::models::MovieId;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Partially update one entry of the caller's list.
pub async fn update_movie(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthenticatedUser>,
    Path(movie_id): Path<String>,
    payload: Result<Json<UpdateMovieRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<ListUnitData>, ApiError> {
    let movie_id =
        MovieId::from_string(&movie_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let Json(body) = payload?;

    state
        .list_service
        .update_movie(identity.user_id, movie_id, body.into())
        .await
        .map_err(ApiError::from)
        .map(|ref unit| ApiSuccess::new(StatusCode::OK, unit.into()))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateMovieRequestBody {
    status: Option<String>,
    score: Option<u8>,
    is_favorite: Option<bool>,
}

impl From<UpdateMovieRequestBody> for ListUnitPatch {
    fn from(body: UpdateMovieRequestBody) -> Self {
        Self {
            status: body.status,
            score: body.score,
            is_favorite: body.is_favorite,
        }
    }
}
