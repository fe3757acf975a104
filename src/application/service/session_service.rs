use crate::application::service::event_emitter::EventEmitter;
use crate::domain::crypto::{Hasher, SchemeAwareHasher};
use crate::domain::repositories::{RepositoryError, UserRepository};
use crate::domain::session::{SessionStore, SessionStoreError};
use crate::domain::token::{IssuedToken, TokenCodec, TokenError};
use crate::domain::user::User;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("User not found")]
    UserNotFound,
    #[error("Invalid credentials")]
    BadCredentials,
    #[error("User is disabled")]
    UserDisabled,
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error("Session expired")]
    SessionExpired,
    #[error(transparent)]
    Store(#[from] SessionStoreError),
    #[error(transparent)]
    Repository(RepositoryError),
}

/// Login, logout and token validation.
///
/// The session store entry is authoritative: a token passes validation only while the entry
/// for its subject holds that exact token, so logout or a later login revokes it.
#[derive(Clone)]
pub struct SessionService {
    user_repository: Arc<dyn UserRepository>,
    session_store: Arc<dyn SessionStore>,
    token_codec: TokenCodec,
    hasher: SchemeAwareHasher,
    events: EventEmitter,
}

impl SessionService {
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        session_store: Arc<dyn SessionStore>,
        token_codec: TokenCodec,
        hasher: SchemeAwareHasher,
        events: EventEmitter,
    ) -> Self {
        SessionService {
            user_repository,
            session_store,
            token_codec,
            hasher,
            events,
        }
    }

    pub async fn login(
        &self,
        username: &str,
        password: &str,
        client_ip: &str,
    ) -> Result<(IssuedToken, User), SessionError> {
        let user = match self.user_repository.get_by_username(username).await {
            Ok(user) => user,
            Err(RepositoryError::NotFound(_)) => {
                tracing::debug!("Login rejected, unknown user {}", username);
                return Err(SessionError::UserNotFound);
            }
            Err(e) => return Err(SessionError::Repository(e)),
        };

        if !user.verify_password(&self.hasher, password) {
            tracing::debug!("Login rejected, bad credentials for {}", username);
            return Err(SessionError::BadCredentials);
        }

        if !user.is_enabled() {
            return Err(SessionError::UserDisabled);
        }

        if self.hasher.is_outdated(&user.password_hash) {
            self.upgrade_password_hash(&user, password).await;
        }

        let token = self.token_codec.issue(user.id)?;
        self.session_store
            .put(user.id, &token.value, self.session_ttl())
            .await?;

        self.events.user_login(user.id, &user.username, client_ip);
        tracing::info!(user_id = user.id, ip = client_ip, "User {} logged in", user.username);

        Ok((token, user))
    }

    pub async fn logout(&self, subject_id: i64, username: &str) -> Result<(), SessionError> {
        self.session_store.delete(subject_id).await?;

        self.events.user_logout(subject_id, username);
        tracing::info!(user_id = subject_id, "User {} logged out", username);

        Ok(())
    }

    pub async fn validate(&self, token: &str) -> Result<i64, SessionError> {
        let subject_id = self.token_codec.verify(token)?;

        match self.session_store.get(subject_id).await? {
            Some(live_token) if live_token == token => Ok(subject_id),
            _ => Err(SessionError::SessionExpired),
        }
    }

    /// Re-hashes a verified password with the current scheme. Failures keep the old hash.
    async fn upgrade_password_hash(&self, user: &User, password: &str) {
        let password_hash = match self.hasher.hash_password(password) {
            Ok(hash) => hash,
            Err(e) => {
                tracing::warn!(user_id = user.id, "Failed to re-hash password: {}", e);
                return;
            }
        };

        let mut upgraded = user.clone();
        upgraded.password_hash = password_hash;

        match self.user_repository.update(&upgraded).await {
            Ok(()) => tracing::info!(
                user_id = user.id,
                scheme = %self.hasher.current_scheme(),
                "Upgraded password hash"
            ),
            Err(e) => tracing::warn!(
                user_id = user.id,
                "Failed to store upgraded password hash: {}",
                e
            ),
        }
    }

    fn session_ttl(&self) -> Duration {
        self.token_codec.ttl().to_std().unwrap_or_default()
    }
}
