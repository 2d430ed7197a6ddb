use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::list::errors::ListError;
use crate::domain::list::models::ListId;
use crate::domain::list::models::ListInfo;
use crate::domain::list::models::ListUnit;
use crate::domain::list::models::ListUnitChanges;
use crate::domain::list::models::Movie;
use crate::domain::list::models::MovieId;
use crate::domain::list::models::Score;
use crate::domain::list::models::TitleStatus;
use crate::domain::list::ports::ListRepository;
use crate::domain::user::models::UserId;

const UNIT_COLUMNS: &str = "movie_id, name, status, score, is_favorite";

pub struct PostgresListRepository {
    pool: PgPool,
}

impl PostgresListRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ListRow {
    id: i64,
    owner_id: i64,
}

impl From<ListRow> for ListInfo {
    fn from(row: ListRow) -> Self {
        ListInfo {
            list_id: ListId(row.id),
            user_id: UserId(row.owner_id),
        }
    }
}

#[derive(sqlx::FromRow)]
struct ListUnitRow {
    movie_id: i64,
    name: String,
    status: String,
    score: i16,
    is_favorite: bool,
}

impl TryFrom<ListUnitRow> for ListUnit {
    type Error = ListError;

    fn try_from(row: ListUnitRow) -> Result<Self, Self::Error> {
        let status = row.status.parse::<TitleStatus>().map_err(|e| {
            ListError::Database(format!("stored entry {} has {e}", row.movie_id))
        })?;
        let score = u8::try_from(row.score)
            .ok()
            .and_then(|score| Score::new(score).ok())
            .ok_or_else(|| {
                ListError::Database(format!(
                    "stored entry {} has score {} out of range",
                    row.movie_id, row.score
                ))
            })?;

        Ok(ListUnit {
            movie: Movie {
                id: MovieId(row.movie_id),
                name: row.name,
            },
            status,
            score,
            is_favorite: row.is_favorite,
        })
    }
}

fn database_error(e: sqlx::Error) -> ListError {
    ListError::Database(e.to_string())
}

#[async_trait]
impl ListRepository for PostgresListRepository {
    async fn create_list(&self, owner: UserId) -> Result<ListInfo, ListError> {
        let row = sqlx::query_as::<_, ListRow>(
            "INSERT INTO lists (owner_id) VALUES ($1) RETURNING id, owner_id",
        )
        .bind(owner.0)
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(row.into())
    }

    async fn find_list(&self, owner: UserId) -> Result<Option<ListInfo>, ListError> {
        let row = sqlx::query_as::<_, ListRow>("SELECT id, owner_id FROM lists WHERE owner_id = $1")
            .bind(owner.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(row.map(ListInfo::from))
    }

    async fn add_unit(&self, list_id: ListId, unit: &ListUnit) -> Result<(), ListError> {
        sqlx::query(
            r#"
            INSERT INTO list_titles (list_id, movie_id, name, status, score, is_favorite)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(list_id.0)
        .bind(unit.movie.id.0)
        .bind(unit.movie.name.as_str())
        .bind(unit.status.as_str())
        .bind(i16::from(unit.score.value()))
        .bind(unit.is_favorite)
        .execute(&self.pool)
        .await
        .map_err(|e| match e.as_database_error() {
            Some(db_err) if db_err.is_unique_violation() => ListError::AlreadyInList(unit.movie.id),
            _ => database_error(e),
        })?;

        Ok(())
    }

    async fn units(&self, list_id: ListId) -> Result<Vec<ListUnit>, ListError> {
        let sql = format!("SELECT {UNIT_COLUMNS} FROM list_titles WHERE list_id = $1 ORDER BY added_on");
        let rows = sqlx::query_as::<_, ListUnitRow>(&sql)
            .bind(list_id.0)
            .fetch_all(&self.pool)
            .await
            .map_err(database_error)?;

        rows.into_iter().map(ListUnit::try_from).collect()
    }

    async fn update_unit(
        &self,
        list_id: ListId,
        movie_id: MovieId,
        changes: &ListUnitChanges,
    ) -> Result<Option<ListUnit>, ListError> {
        let sql = format!(
            r#"
            UPDATE list_titles
            SET status = COALESCE($3, status),
                score = COALESCE($4, score),
                is_favorite = COALESCE($5, is_favorite)
            WHERE list_id = $1 AND movie_id = $2
            RETURNING {UNIT_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, ListUnitRow>(&sql)
            .bind(list_id.0)
            .bind(movie_id.0)
            .bind(changes.status.map(|status| status.as_str()))
            .bind(changes.score.map(|score| i16::from(score.value())))
            .bind(changes.is_favorite)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?;

        row.map(ListUnit::try_from).transpose()
    }

    async fn delete_unit(
        &self,
        list_id: ListId,
        movie_id: MovieId,
    ) -> Result<Option<ListUnit>, ListError> {
        let sql = format!(
            "DELETE FROM list_titles WHERE list_id = $1 AND movie_id = $2 RETURNING {UNIT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ListUnitRow>(&sql)
            .bind(list_id.0)
            .bind(movie_id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?;

        row.map(ListUnit::try_from).transpose()
    }
}
