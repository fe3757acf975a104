use crate::domain::menu::Menu;
use crate::domain::role::Role;
use crate::domain::user::User;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("{0}")]
    NotFound(String),
    #[error("Conflict error: {0}")]
    Conflict(String),
    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),
}

/// Record store access for users. Every query ignores soft-deleted rows.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<User, RepositoryError>;
    async fn update(&self, user: &User) -> Result<(), RepositoryError>;
    async fn get_by_id(&self, id: i64) -> Result<User, RepositoryError>;
    async fn get_by_username(&self, username: &str) -> Result<User, RepositoryError>;
    async fn count_by_username(&self, username: &str) -> Result<i64, RepositoryError>;
    async fn find_all(
        &self,
        page: i64,
        page_size: i64,
        search: Option<&str>,
    ) -> Result<(Vec<User>, i64), RepositoryError>;
    async fn delete(&self, id: i64) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait RoleRepository: Send + Sync {
    async fn create(&self, role: &Role) -> Result<Role, RepositoryError>;
    async fn update(&self, role: &Role) -> Result<(), RepositoryError>;
    async fn get_by_id(&self, id: i64) -> Result<Role, RepositoryError>;
    async fn get_all(&self) -> Result<Vec<Role>, RepositoryError>;
    async fn delete(&self, id: i64) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait MenuRepository: Send + Sync {
    async fn create(&self, menu: &Menu) -> Result<Menu, RepositoryError>;
    async fn update(&self, menu: &Menu) -> Result<(), RepositoryError>;
    async fn get_by_id(&self, id: i64) -> Result<Menu, RepositoryError>;
    /// Ordered by `sort`, then id.
    async fn get_all(&self) -> Result<Vec<Menu>, RepositoryError>;
    async fn delete(&self, id: i64) -> Result<(), RepositoryError>;
}
