use crate::domain::repositories::{
    MenuRepository, RepositoryError, RoleRepository, UserRepository,
};
use crate::infrastructure::sqlite_menu_repository::SqliteMenuRepository;
use crate::infrastructure::sqlite_role_repository::SqliteRoleRepository;
use crate::infrastructure::sqlite_user_repository::SqliteUserRepository;
use sqlx::{Error as SqlxError, Pool, Sqlite};
use std::sync::Arc;

pub fn create_user_repository(pool: Pool<Sqlite>) -> Arc<dyn UserRepository> {
    Arc::new(SqliteUserRepository::new(pool))
}

pub fn create_role_repository(pool: Pool<Sqlite>) -> Arc<dyn RoleRepository> {
    Arc::new(SqliteRoleRepository::new(pool))
}

pub fn create_menu_repository(pool: Pool<Sqlite>) -> Arc<dyn MenuRepository> {
    Arc::new(SqliteMenuRepository::new(pool))
}

impl From<SqlxError> for RepositoryError {
    fn from(error: SqlxError) -> Self {
        match error {
            SqlxError::RowNotFound => RepositoryError::NotFound("Entity not found".to_string()),
            SqlxError::Database(ref db) if db.is_unique_violation() => {
                RepositoryError::Conflict(db.message().to_string())
            }
            _ => RepositoryError::Database(error),
        }
    }
}
