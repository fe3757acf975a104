use crate::domain::user::STATUS_ENABLED;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Role {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub status: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Role {
    pub fn now(name: String, description: Option<String>) -> Self {
        let now = Utc::now();

        Role {
            id: 0,
            name,
            description: description.unwrap_or_default(),
            status: STATUS_ENABLED,
            created_at: now,
            updated_at: now,
        }
    }
}
