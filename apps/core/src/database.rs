use crate::actors::messages::{ActorError, AppError};
use crate::actors::traits::ProfileStore;
use crate::models::{NewSkill, Skill};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

pub async fn init_db(db_url: &str) -> Result<SqlitePool, sqlx::Error> {
    info!("Initializing database at: {}", db_url);

    let options = SqliteConnectOptions::from_str(db_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS skills (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            name TEXT NOT NULL,
            proficiency TEXT NOT NULL,
            created_at INTEGER NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_skills_user ON skills(user_id);
        "#,
    )
    .execute(&pool)
    .await?;

    info!("Database initialized and schema applied.");

    Ok(pool)
}

// --- Skills CRUD ---

pub async fn add_skill(pool: &SqlitePool, user_id: &str, skill: NewSkill) -> Result<Skill, AppError> {
    skill.validate()?;

    let id = Uuid::new_v4().to_string();
    let created_at = Utc::now().timestamp();

    let row = sqlx::query_as::<_, Skill>(
        r#"
        INSERT INTO skills (id, user_id, name, proficiency, created_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id, user_id, name, proficiency, created_at
        "#,
    )
    .bind(&id)
    .bind(user_id)
    .bind(skill.name.trim())
    .bind(skill.proficiency.trim())
    .bind(created_at)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Skills for a user in the order they were added. Unknown users have none.
pub async fn get_skills(pool: &SqlitePool, user_id: &str) -> Result<Vec<Skill>, sqlx::Error> {
    sqlx::query_as::<_, Skill>(
        r#"
        SELECT id, user_id, name, proficiency, created_at
        FROM skills
        WHERE user_id = ?
        ORDER BY created_at ASC, rowid ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Returns `true` when a row was removed.
pub async fn delete_skill(pool: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM skills WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// [`ProfileStore`] backed by the SQLite `skills` table.
#[derive(Clone)]
pub struct SqliteProfileStore {
    pool: SqlitePool,
}

impl SqliteProfileStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl ProfileStore for SqliteProfileStore {
    async fn fetch_skills(&self, user_id: &str) -> Result<Vec<Skill>, AppError> {
        get_skills(&self.pool, user_id)
            .await
            .map_err(|e| AppError::Actor(ActorError::ProfileError(e.to_string())))
    }
}
