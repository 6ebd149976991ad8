use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::migrate::Migrator;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tracing::info;
use uuid::Uuid;

use crate::models::{Job, Skill, UserDocument};
use crate::store::{StoreError, UserStore};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// One row per user document; embedded skills and jobs live in JSONB columns.
#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    password_hash: String,
    skills: Json<Vec<Skill>>,
    jobs: Json<Vec<Job>>,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for UserDocument {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            password_hash: row.password_hash,
            skills: row.skills.0,
            jobs: row.jobs.0,
            created_at: row.created_at,
        }
    }
}

#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Applies the embedded schema migrations.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        MIGRATOR.run(&self.pool).await?;
        info!("Database migrations applied");
        Ok(())
    }
}

/// Maps a unique-index violation on `username` to `DuplicateUsername`.
fn map_write_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            return StoreError::DuplicateUsername;
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn list(&self) -> Result<Vec<UserDocument>, StoreError> {
        let rows = sqlx::query_as::<_, UserRow>("SELECT * FROM users ORDER BY created_at, id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(UserDocument::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserDocument>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(UserDocument::from))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<UserDocument>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(UserDocument::from))
    }

    async fn create(&self, user: UserDocument) -> Result<UserDocument, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, username, password_hash, skills, jobs, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(Json(&user.skills))
        .bind(Json(&user.jobs))
        .bind(user.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;
        Ok(row.into())
    }

    async fn save(&self, user: &UserDocument) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET username = $2, password_hash = $3, skills = $4, jobs = $5
            WHERE id = $1
            "#,
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(Json(&user.skills))
        .bind(Json(&user.jobs))
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
