use crate::domain::user::STATUS_ENABLED;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Menu {
    pub id: i64,
    pub name: String,
    pub path: String,
    pub component: String,
    pub icon: String,
    pub sort: i32,
    pub parent_id: Option<i64>,
    pub status: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Menu {
    pub fn now(name: String) -> Self {
        let now = Utc::now();

        Menu {
            id: 0,
            name,
            path: String::new(),
            component: String::new(),
            icon: String::new(),
            sort: 0,
            parent_id: None,
            status: STATUS_ENABLED,
            created_at: now,
            updated_at: now,
        }
    }
}
