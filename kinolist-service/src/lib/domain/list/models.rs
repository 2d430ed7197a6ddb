use std::fmt;
use std::str::FromStr;

use crate::domain::errors::ValidationError;
use crate::domain::user::models::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListId(pub i64);

impl fmt::Display for ListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Movie identifier as assigned by the movie search provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MovieId(pub i64);

impl MovieId {
    /// Parse a movie ID from a path segment.
    ///
    /// # Errors
    /// * `ValidationError` - String is not a decimal integer
    pub fn from_string(s: &str) -> Result<Self, ValidationError> {
        s.parse()
            .map(MovieId)
            .map_err(|_| ValidationError::new("id", format!("{s:?} is not a numeric id")))
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Viewing status of a title in a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TitleStatus {
    Watching,
    Completed,
    OnHold,
    Dropped,
    PlanToWatch,
}

impl TitleStatus {
    pub const ALL: [TitleStatus; 5] = [
        TitleStatus::Watching,
        TitleStatus::Completed,
        TitleStatus::OnHold,
        TitleStatus::Dropped,
        TitleStatus::PlanToWatch,
    ];

    /// Canonical spelling, as stored and returned to clients.
    pub fn as_str(&self) -> &'static str {
        match self {
            TitleStatus::Watching => "watching",
            TitleStatus::Completed => "completed",
            TitleStatus::OnHold => "on-hold",
            TitleStatus::Dropped => "dropped",
            TitleStatus::PlanToWatch => "plan to watch",
        }
    }
}

impl FromStr for TitleStatus {
    type Err = ValidationError;

    /// Case-insensitive match against the canonical spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                ValidationError::new(
                    "status",
                    "must be one of: watching, completed, on-hold, dropped, plan to watch",
                )
            })
    }
}

impl fmt::Display for TitleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Personal score, 0 to 10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Score(u8);

impl Score {
    pub const MAX: u8 = 10;

    pub fn new(score: u8) -> Result<Self, ValidationError> {
        if score > Self::MAX {
            return Err(ValidationError::new("score", "cannot be greater than 10"));
        }
        Ok(Self(score))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movie {
    pub id: MovieId,
    pub name: String,
}

/// Pointer to a user's list, returned at sign-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListInfo {
    pub list_id: ListId,
    pub user_id: UserId,
}

/// One title in a list together with the owner's marks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListUnit {
    pub movie: Movie,
    pub status: TitleStatus,
    pub score: Score,
    pub is_favorite: bool,
}

/// Raw request to add a title, looked up by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewListUnit {
    pub name: String,
    pub status: String,
    pub score: u8,
    pub is_favorite: bool,
}

impl NewListUnit {
    /// Check name, then score, then status; the first failure wins.
    pub fn validate(self) -> Result<AddMovieCommand, ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::new("name", "empty movie name"));
        }
        let score = Score::new(self.score)?;
        let status = self.status.parse::<TitleStatus>()?;

        Ok(AddMovieCommand {
            name: self.name,
            status,
            score,
            is_favorite: self.is_favorite,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddMovieCommand {
    pub name: String,
    pub status: TitleStatus,
    pub score: Score,
    pub is_favorite: bool,
}

/// Raw partial update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListUnitPatch {
    pub status: Option<String>,
    pub score: Option<u8>,
    pub is_favorite: Option<bool>,
}

impl ListUnitPatch {
    /// Validate only the fields that are present, score before status.
    pub fn validate(self) -> Result<ListUnitChanges, ValidationError> {
        let score = self.score.map(Score::new).transpose()?;
        let status = self
            .status
            .as_deref()
            .map(str::parse::<TitleStatus>)
            .transpose()?;

        Ok(ListUnitChanges {
            status,
            score,
            is_favorite: self.is_favorite,
        })
    }
}

/// Validated partial update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListUnitChanges {
    pub status: Option<TitleStatus>,
    pub score: Option<Score>,
    pub is_favorite: Option<bool>,
}

impl ListUnitChanges {
    /// Apply present fields to `unit`.
    pub fn apply(&self, unit: &mut ListUnit) {
        if let Some(status) = self.status {
            unit.status = status;
        }
        if let Some(score) = self.score {
            unit.score = score;
        }
        if let Some(is_favorite) = self.is_favorite {
            unit.is_favorite = is_favorite;
        }
    }
}
