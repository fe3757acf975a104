use crate::application::service::event_emitter::EventEmitter;
use crate::application::worker_pool::{BatchWorkerPool, ItemAborted};
use crate::domain::crypto::SchemeAwareHasher;
use crate::domain::error::UserError;
use crate::domain::repositories::{RepositoryError, UserRepository};
use crate::domain::user::{STATUS_ENABLED, User, UserChanges};
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Error)]
pub enum UserServiceError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Username already taken")]
    UsernameTaken,
    #[error("User not found")]
    NotFound,
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error(transparent)]
    Repository(RepositoryError),
    #[error(transparent)]
    BatchItem(#[from] ItemAborted),
}

impl From<UserError> for UserServiceError {
    fn from(error: UserError) -> Self {
        UserServiceError::InvalidInput(error.to_string())
    }
}

impl From<RepositoryError> for UserServiceError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::NotFound(_) => UserServiceError::NotFound,
            RepositoryError::Conflict(message) => UserServiceError::Conflict(message),
            e => UserServiceError::Repository(e),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub email: String,
    pub nickname: Option<String>,
    pub avatar: Option<String>,
    pub role_id: Option<i64>,
    pub status: Option<i32>,
}

/// User records plus the events describing their lifecycle.
///
/// Writes hold one lock across the record change and its event emission, so two writes
/// never interleave their events.
#[derive(Clone)]
pub struct UserService {
    user_repository: Arc<dyn UserRepository>,
    hasher: SchemeAwareHasher,
    events: EventEmitter,
    default_role_id: i64,
    pool: BatchWorkerPool,
    write_lock: Arc<Mutex<()>>,
}

impl UserService {
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        hasher: SchemeAwareHasher,
        events: EventEmitter,
        default_role_id: i64,
    ) -> Self {
        UserService {
            user_repository,
            hasher,
            events,
            default_role_id,
            pool: BatchWorkerPool::default(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn with_pool(mut self, pool: BatchWorkerPool) -> Self {
        self.pool = pool;
        self
    }

    pub async fn register(
        &self,
        username: &str,
        password: &str,
        email: &str,
    ) -> Result<User, UserServiceError> {
        self.create_user(NewUser {
            username: username.to_string(),
            password: password.to_string(),
            email: email.to_string(),
            nickname: None,
            avatar: None,
            role_id: None,
            status: None,
        })
        .await
    }

    pub async fn create_user(&self, new_user: NewUser) -> Result<User, UserServiceError> {
        let username = new_user.username.trim().to_string();
        let email = new_user.email.trim().to_string();
        if username.is_empty() || new_user.password.is_empty() || email.is_empty() {
            return Err(UserServiceError::InvalidInput(
                "username, password and email are required".to_string(),
            ));
        }

        let user = User::now_with_credentials(
            username,
            &new_user.password,
            email,
            new_user.role_id.unwrap_or(self.default_role_id),
            &self.hasher,
        )?
        .with_profile(new_user.nickname, new_user.avatar)
        .with_status(new_user.status.unwrap_or(STATUS_ENABLED));

        let _guard = self.write_lock.lock().await;

        if self.user_repository.count_by_username(&user.username).await? > 0 {
            return Err(UserServiceError::UsernameTaken);
        }

        let user = self.user_repository.create(&user).await?;
        self.events.user_register(user.id, &user.username, &user.email);
        tracing::info!(user_id = user.id, "User {} created", user.username);

        Ok(user)
    }

    pub async fn get_user(&self, id: i64) -> Result<User, UserServiceError> {
        Ok(self.user_repository.get_by_id(id).await?)
    }

    pub async fn get_profile(&self, id: i64) -> Result<User, UserServiceError> {
        self.get_user(id).await
    }

    /// Returns one page of users plus the total number of matches.
    pub async fn list_users(
        &self,
        page: i64,
        page_size: i64,
        search: Option<&str>,
    ) -> Result<(Vec<User>, i64), UserServiceError> {
        let page = page.max(1);
        let page_size = if page_size < 1 {
            DEFAULT_PAGE_SIZE
        } else {
            page_size.min(MAX_PAGE_SIZE)
        };
        let search = search.map(str::trim).filter(|s| !s.is_empty());

        Ok(self
            .user_repository
            .find_all(page, page_size, search)
            .await?)
    }

    pub async fn update_user(
        &self,
        id: i64,
        changes: UserChanges,
    ) -> Result<User, UserServiceError> {
        let _guard = self.write_lock.lock().await;

        let mut user = self.user_repository.get_by_id(id).await?;
        let fields = user.apply(changes, &self.hasher)?;
        self.user_repository.update(&user).await?;

        self.events.user_update(user.id, &user.username, fields);
        tracing::info!(user_id = user.id, "User {} updated", user.username);

        Ok(user)
    }

    pub async fn delete_user(&self, id: i64) -> Result<(), UserServiceError> {
        let _guard = self.write_lock.lock().await;

        let user = self.user_repository.get_by_id(id).await?;
        self.user_repository.delete(id).await?;

        self.events.user_delete(user.id, &user.username);
        tracing::info!(user_id = user.id, "User {} deleted", user.username);

        Ok(())
    }

    /// Loads every user in `ids` and runs `processor` on it through the worker pool.
    /// All ids are attempted; the first failure is returned.
    pub async fn batch_process_users<P, PF>(
        &self,
        ids: Vec<i64>,
        processor: P,
    ) -> Result<(), UserServiceError>
    where
        P: Fn(User) -> PF + Send + Sync + 'static,
        PF: Future<Output = Result<(), UserServiceError>> + Send + 'static,
    {
        let repository = self.user_repository.clone();

        self.pool
            .run(
                ids,
                move |id| {
                    let repository = repository.clone();
                    async move { Ok::<User, UserServiceError>(repository.get_by_id(id).await?) }
                },
                processor,
            )
            .await
    }
}
