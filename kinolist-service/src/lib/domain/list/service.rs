use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::deadline::within;
use crate::domain::deadline::REPOSITORY_DEADLINE;
use crate::domain::list::errors::ListError;
use crate::domain::list::models::ListInfo;
use crate::domain::list::models::ListUnit;
use crate::domain::list::models::ListUnitPatch;
use crate::domain::list::models::MovieId;
use crate::domain::list::models::NewListUnit;
use crate::domain::list::ports::ListRepository;
use crate::domain::list::ports::ListServicePort;
use crate::domain::list::ports::MovieSearch;
use crate::domain::user::models::UserId;

/// Domain service implementation for movie list operations.
pub struct ListService<LR, MS>
where
    LR: ListRepository,
    MS: MovieSearch,
{
    repository: Arc<LR>,
    movie_search: Arc<MS>,
    deadline: Duration,
}

impl<LR, MS> ListService<LR, MS>
where
    LR: ListRepository,
    MS: MovieSearch,
{
    /// Create a new list service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - List persistence implementation
    /// * `movie_search` - Third-party movie lookup
    pub fn new(repository: Arc<LR>, movie_search: Arc<MS>) -> Self {
        Self::with_deadline(repository, movie_search, REPOSITORY_DEADLINE)
    }

    pub fn with_deadline(repository: Arc<LR>, movie_search: Arc<MS>, deadline: Duration) -> Self {
        Self {
            repository,
            movie_search,
            deadline,
        }
    }

    async fn list_of(&self, owner: UserId) -> Result<ListInfo, ListError> {
        within(self.deadline, self.repository.find_list(owner))
            .await?
            .ok_or(ListError::ListNotFound(owner))
    }
}

#[async_trait]
impl<LR, MS> ListServicePort for ListService<LR, MS>
where
    LR: ListRepository,
    MS: MovieSearch,
{
    async fn create_list(&self, owner: UserId) -> Result<ListInfo, ListError> {
        let list = within(self.deadline, self.repository.create_list(owner)).await?;
        tracing::debug!(user_id = %owner, list_id = %list.list_id, "list created");
        Ok(list)
    }

    async fn add_movie(&self, owner: UserId, unit: NewListUnit) -> Result<ListUnit, ListError> {
        let command = unit.validate()?;
        let list = self.list_of(owner).await?;

        let movie = within(self.deadline, self.movie_search.search(&command.name))
            .await?
            .ok_or_else(|| ListError::MovieNotFound(command.name.clone()))?;

        let unit = ListUnit {
            movie,
            status: command.status,
            score: command.score,
            is_favorite: command.is_favorite,
        };
        within(self.deadline, self.repository.add_unit(list.list_id, &unit)).await?;

        tracing::info!(
            user_id = %owner,
            movie_id = %unit.movie.id,
            "movie added to list"
        );
        Ok(unit)
    }

    async fn movies(&self, owner: UserId) -> Result<Vec<ListUnit>, ListError> {
        let list = self.list_of(owner).await?;
        within(self.deadline, self.repository.units(list.list_id)).await
    }

    async fn update_movie(
        &self,
        owner: UserId,
        movie_id: MovieId,
        patch: ListUnitPatch,
    ) -> Result<ListUnit, ListError> {
        let changes = patch.validate()?;
        let list = self.list_of(owner).await?;

        within(
            self.deadline,
            self.repository.update_unit(list.list_id, movie_id, &changes),
        )
        .await?
        .ok_or(ListError::TitleNotInList(movie_id))
    }

    async fn delete_movie(&self, owner: UserId, movie_id: MovieId) -> Result<ListUnit, ListError> {
        let list = self.list_of(owner).await?;

        let unit = within(
            self.deadline,
            self.repository.delete_unit(list.list_id, movie_id),
        )
        .await?
        .ok_or(ListError::TitleNotInList(movie_id))?;

        tracing::info!(user_id = %owner, movie_id = %movie_id, "movie removed from list");
        Ok(unit)
    }
}
