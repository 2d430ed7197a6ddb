use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::list::models::ListUnit;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// All titles in the caller's list.
pub async fn list_movies(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<Vec<ListUnitData>>, ApiError> {
    let units = state.list_service.movies(identity.user_id).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        units.iter().map(ListUnitData::from).collect(),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListUnitData {
    pub id: i64,
    pub name: String,
    pub status: String,
    pub score: u8,
    pub is_favorite: bool,
}

impl From<&ListUnit> for ListUnitData {
    fn from(unit: &ListUnit) -> Self {
        Self {
            id: unit.movie.id.0,
            name: unit.movie.name.clone(),
            status: unit.status.as_str().to_string(),
            score: unit.score.value(),
            is_favorite: unit.is_favorite,
        }
    }
}
