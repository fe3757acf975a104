use crate::domain::repositories::{RepositoryError, RoleRepository};
use crate::domain::role::Role;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Sqlite};

#[derive(Clone)]
pub struct SqliteRoleRepository {
    pool: Pool<Sqlite>,
}

impl SqliteRoleRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleRepository for SqliteRoleRepository {
    async fn create(&self, role: &Role) -> Result<Role, RepositoryError> {
        let result = sqlx::query(
            r#"
            INSERT INTO roles (name, description, status, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&role.name)
        .bind(&role.description)
        .bind(role.status)
        .bind(role.created_at)
        .bind(role.updated_at)
        .execute(&self.pool)
        .await?;

        self.get_by_id(result.last_insert_rowid()).await
    }

    async fn update(&self, role: &Role) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE roles
            SET name = ?, description = ?, status = ?, updated_at = ?
            WHERE id = ? AND deleted_at IS NULL
            "#,
        )
        .bind(&role.name)
        .bind(&role.description)
        .bind(role.status)
        .bind(Utc::now())
        .bind(role.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("Role {} not found", role.id)));
        }

        Ok(())
    }

    async fn get_by_id(&self, id: i64) -> Result<Role, RepositoryError> {
        let role = sqlx::query_as::<_, Role>(
            r#"
            SELECT id, name, description, status, created_at, updated_at
            FROM roles WHERE id = ? AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(role)
    }

    async fn get_all(&self) -> Result<Vec<Role>, RepositoryError> {
        let roles = sqlx::query_as::<_, Role>(
            r#"
            SELECT id, name, description, status, created_at, updated_at
            FROM roles WHERE deleted_at IS NULL ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(roles)
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let result =
            sqlx::query("UPDATE roles SET deleted_at = ? WHERE id = ? AND deleted_at IS NULL")
                .bind(Utc::now())
                .bind(id)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("Role {} not found", id)));
        }

        Ok(())
    }
}
