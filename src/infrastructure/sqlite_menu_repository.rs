use crate::domain::menu::Menu;
use crate::domain::repositories::{MenuRepository, RepositoryError};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Sqlite};

const MENU_COLUMNS: &str =
    "id, name, path, component, icon, sort, parent_id, status, created_at, updated_at";

#[derive(Clone)]
pub struct SqliteMenuRepository {
    pool: Pool<Sqlite>,
}

impl SqliteMenuRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MenuRepository for SqliteMenuRepository {
    async fn create(&self, menu: &Menu) -> Result<Menu, RepositoryError> {
        let result = sqlx::query(
            r#"
            INSERT INTO menus (
                name, path, component, icon, sort, parent_id, status, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&menu.name)
        .bind(&menu.path)
        .bind(&menu.component)
        .bind(&menu.icon)
        .bind(menu.sort)
        .bind(menu.parent_id)
        .bind(menu.status)
        .bind(menu.created_at)
        .bind(menu.updated_at)
        .execute(&self.pool)
        .await?;

        self.get_by_id(result.last_insert_rowid()).await
    }

    async fn update(&self, menu: &Menu) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE menus
            SET name = ?, path = ?, component = ?, icon = ?, sort = ?,
                parent_id = ?, status = ?, updated_at = ?
            WHERE id = ? AND deleted_at IS NULL
            "#,
        )
        .bind(&menu.name)
        .bind(&menu.path)
        .bind(&menu.component)
        .bind(&menu.icon)
        .bind(menu.sort)
        .bind(menu.parent_id)
        .bind(menu.status)
        .bind(Utc::now())
        .bind(menu.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("Menu {} not found", menu.id)));
        }

        Ok(())
    }

    async fn get_by_id(&self, id: i64) -> Result<Menu, RepositoryError> {
        let menu = sqlx::query_as::<_, Menu>(&format!(
            "SELECT {} FROM menus WHERE id = ? AND deleted_at IS NULL",
            MENU_COLUMNS
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(menu)
    }

    async fn get_all(&self) -> Result<Vec<Menu>, RepositoryError> {
        let menus = sqlx::query_as::<_, Menu>(&format!(
            "SELECT {} FROM menus WHERE deleted_at IS NULL ORDER BY sort, id",
            MENU_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(menus)
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let result =
            sqlx::query("UPDATE menus SET deleted_at = ? WHERE id = ? AND deleted_at IS NULL")
                .bind(Utc::now())
                .bind(id)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("Menu {} not found", id)));
        }

        Ok(())
    }
}
