use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::list_movies::ListUnitData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::list::models::MovieId;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn delete_movie(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthenticatedUser>,
    Path(movie_id): Path<String>,
) -> Result<ApiSuccess<ListUnitData>, ApiError> {
    let movie_id =
        MovieId::from_string(&movie_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .list_service
        .delete_movie(identity.user_id, movie_id)
        .await
        .map_err(ApiError::from)
        .map(|ref unit| ApiSuccess::new(StatusCode::OK, unit.into()))
}
