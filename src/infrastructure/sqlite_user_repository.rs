use crate::domain::repositories::{RepositoryError, UserRepository};
use crate::domain::user::User;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Sqlite};

const USER_COLUMNS: &str = "id, username, password_hash, email, nickname, avatar, status, role_id, created_at, updated_at";

#[derive(Clone)]
pub struct SqliteUserRepository {
    pool: Pool<Sqlite>,
}

impl SqliteUserRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn create(&self, user: &User) -> Result<User, RepositoryError> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (
                username, password_hash, email, nickname, avatar,
                status, role_id, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(&user.email)
        .bind(&user.nickname)
        .bind(&user.avatar)
        .bind(user.status)
        .bind(user.role_id)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        self.get_by_id(result.last_insert_rowid()).await
    }

    async fn update(&self, user: &User) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET username = ?,
                password_hash = ?,
                email = ?,
                nickname = ?,
                avatar = ?,
                status = ?,
                role_id = ?,
                updated_at = ?
            WHERE id = ? AND deleted_at IS NULL
            "#,
        )
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(&user.email)
        .bind(&user.nickname)
        .bind(&user.avatar)
        .bind(user.status)
        .bind(user.role_id)
        .bind(user.updated_at)
        .bind(user.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("User {} not found", user.id)));
        }

        Ok(())
    }

    async fn get_by_id(&self, id: i64) -> Result<User, RepositoryError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE id = ? AND deleted_at IS NULL",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    async fn get_by_username(&self, username: &str) -> Result<User, RepositoryError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE username = ? AND deleted_at IS NULL",
            USER_COLUMNS
        ))
        .bind(username)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    async fn count_by_username(&self, username: &str) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM users WHERE username = ? AND deleted_at IS NULL",
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn find_all(
        &self,
        page: i64,
        page_size: i64,
        search: Option<&str>,
    ) -> Result<(Vec<User>, i64), RepositoryError> {
        let pattern = format!("%{}%", search.unwrap_or_default());
        let offset = (page.max(1) - 1) * page_size;

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM users
            WHERE deleted_at IS NULL AND (username LIKE ? OR nickname LIKE ?)
            "#,
        )
        .bind(&pattern)
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await?;

        let users = sqlx::query_as::<_, User>(&format!(
            r#"
            SELECT {} FROM users
            WHERE deleted_at IS NULL AND (username LIKE ? OR nickname LIKE ?)
            ORDER BY id
            LIMIT ? OFFSET ?
            "#,
            USER_COLUMNS
        ))
        .bind(&pattern)
        .bind(&pattern)
        .bind(page_size)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok((users, total))
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let now = Utc::now();
        let result = sqlx::query(
            "UPDATE users SET deleted_at = ?, updated_at = ? WHERE id = ? AND deleted_at IS NULL",
        )
        .bind(now)
        .bind(now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("User {} not found", id)));
        }

        Ok(())
    }
}
