use async_trait::async_trait;

use crate::domain::list::errors::ListError;
use crate::domain::list::models::ListId;
use crate::domain::list::models::ListInfo;
use crate::domain::list::models::ListUnit;
use crate::domain::list::models::ListUnitChanges;
use crate::domain::list::models::ListUnitPatch;
use crate::domain::list::models::Movie;
use crate::domain::list::models::MovieId;
use crate::domain::list::models::NewListUnit;
use crate::domain::user::models::UserId;

/// Port for movie list operations. Every operation acts on the list owned
/// by the authenticated user.
#[async_trait]
pub trait ListServicePort: Send + Sync + 'static {
    /// Create the empty list of a freshly registered user.
    ///
    /// # Returns
    /// Pointer to the created list
    async fn create_list(&self, owner: UserId) -> Result<ListInfo, ListError>;

    /// Look a title up by name and add the first match to the owner's list.
    ///
    /// # Arguments
    /// * `owner` - Authenticated user
    /// * `unit` - Name to search for and the owner's marks
    ///
    /// # Returns
    /// Stored list entry carrying the provider's id and canonical name
    ///
    /// # Errors
    /// * `Validation` - Name, score or status rejected
    /// * `MovieNotFound` - Search returned nothing
    /// * `AlreadyInList` - Title is already in the list
    /// * `ListNotFound` - Owner has no list
    async fn add_movie(&self, owner: UserId, unit: NewListUnit) -> Result<ListUnit, ListError>;

    /// All entries of the owner's list.
    async fn movies(&self, owner: UserId) -> Result<Vec<ListUnit>, ListError>;

    /// Apply a partial update to one entry.
    ///
    /// # Errors
    /// * `Validation` - Present score or status rejected
    /// * `TitleNotInList` - No such entry
    async fn update_movie(
        &self,
        owner: UserId,
        movie_id: MovieId,
        patch: ListUnitPatch,
    ) -> Result<ListUnit, ListError>;

    /// Remove one entry and return it.
    ///
    /// # Errors
    /// * `TitleNotInList` - No such entry
    async fn delete_movie(&self, owner: UserId, movie_id: MovieId) -> Result<ListUnit, ListError>;
}

/// Persistence operations for movie lists.
#[async_trait]
pub trait ListRepository: Send + Sync + 'static {
    async fn create_list(&self, owner: UserId) -> Result<ListInfo, ListError>;

    async fn find_list(&self, owner: UserId) -> Result<Option<ListInfo>, ListError>;

    /// # Errors
    /// * `AlreadyInList` - Entry for this movie already exists
    async fn add_unit(&self, list_id: ListId, unit: &ListUnit) -> Result<(), ListError>;

    async fn units(&self, list_id: ListId) -> Result<Vec<ListUnit>, ListError>;

    /// Update present fields in a single statement.
    ///
    /// # Returns
    /// The updated entry (None if it does not exist)
    async fn update_unit(
        &self,
        list_id: ListId,
        movie_id: MovieId,
        changes: &ListUnitChanges,
    ) -> Result<Option<ListUnit>, ListError>;

    /// # Returns
    /// The removed entry (None if it does not exist)
    async fn delete_unit(
        &self,
        list_id: ListId,
        movie_id: MovieId,
    ) -> Result<Option<ListUnit>, ListError>;
}

/// Third-party movie lookup.
#[async_trait]
pub trait MovieSearch: Send + Sync + 'static {
    /// Best match for `name`, if any.
    ///
    /// # Errors
    /// * `Search` - Provider unreachable or answered with an error
    async fn search(&self, name: &str) -> Result<Option<Movie>, ListError>;
}
