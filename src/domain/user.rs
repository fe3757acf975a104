use crate::domain::crypto::Hasher;
use crate::domain::error::UserError;
use chrono::{DateTime, Utc};
use lazy_regex::regex_is_match;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

pub const STATUS_DISABLED: i32 = 0;
pub const STATUS_ENABLED: i32 = 1;

const MAX_USERNAME_LENGTH: usize = 50;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub email: String,
    pub nickname: String,
    pub avatar: String,
    pub status: i32,
    pub role_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Builds a not yet persisted user, validating input and hashing the password.
    pub fn now_with_credentials(
        username: String,
        password: &str,
        email: String,
        role_id: i64,
        hasher: &impl Hasher,
    ) -> Result<Self, UserError> {
        Self::validate_username(&username)?;
        Self::validate_email(&email)?;
        if password.is_empty() {
            return Err(UserError::EmptyPassword);
        }

        let now = Utc::now();

        Ok(User {
            id: 0,
            username,
            password_hash: hasher.hash_password(password)?,
            email,
            nickname: String::new(),
            avatar: String::new(),
            status: STATUS_ENABLED,
            role_id,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn with_profile(mut self, nickname: Option<String>, avatar: Option<String>) -> Self {
        self.nickname = nickname.unwrap_or_default();
        self.avatar = avatar.unwrap_or_default();
        self
    }

    pub fn with_status(mut self, status: i32) -> Self {
        self.status = status;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.status == STATUS_ENABLED
    }

    pub fn verify_password(&self, hasher: &impl Hasher, password: &str) -> bool {
        hasher.verify_password(password, &self.password_hash)
    }

    /// Applies the changes in place and returns the names and new values of the fields that
    /// were touched. The password never appears in the returned map.
    pub fn apply(
        &mut self,
        changes: UserChanges,
        hasher: &impl Hasher,
    ) -> Result<Map<String, Value>, UserError> {
        let mut fields = Map::new();

        if let Some(email) = changes.email {
            Self::validate_email(&email)?;
            fields.insert("email".to_string(), Value::from(email.clone()));
            self.email = email;
        }
        if let Some(nickname) = changes.nickname {
            fields.insert("nickname".to_string(), Value::from(nickname.clone()));
            self.nickname = nickname;
        }
        if let Some(avatar) = changes.avatar {
            fields.insert("avatar".to_string(), Value::from(avatar.clone()));
            self.avatar = avatar;
        }
        if let Some(status) = changes.status {
            fields.insert("status".to_string(), Value::from(status));
            self.status = status;
        }
        if let Some(role_id) = changes.role_id {
            fields.insert("role_id".to_string(), Value::from(role_id));
            self.role_id = role_id;
        }
        if let Some(password) = changes.password {
            if password.is_empty() {
                return Err(UserError::EmptyPassword);
            }
            self.password_hash = hasher.hash_password(&password)?;
        }

        self.updated_at = Utc::now();

        Ok(fields)
    }

    fn validate_username(username: &str) -> Result<(), UserError> {
        if username.trim().is_empty() {
            return Err(UserError::InvalidUsername {
                reason: "must not be empty".to_string(),
            });
        }
        if username.chars().count() > MAX_USERNAME_LENGTH {
            return Err(UserError::InvalidUsername {
                reason: format!("must be at most {} characters", MAX_USERNAME_LENGTH),
            });
        }

        Ok(())
    }

    fn validate_email(email: &str) -> Result<(), UserError> {
        if regex_is_match!(r"^[^@\s]+@[^@\s]+\.[^@\s]+$", email) {
            Ok(())
        } else {
            Err(UserError::InvalidEmail {
                email: email.to_string(),
            })
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct UserChanges {
    pub email: Option<String>,
    pub nickname: Option<String>,
    pub avatar: Option<String>,
    pub status: Option<i32>,
    pub role_id: Option<i64>,
    pub password: Option<String>,
}
