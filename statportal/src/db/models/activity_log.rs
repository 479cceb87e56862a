//! Database models for the activity log.

use crate::types::{ActivityId, UserId};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Database request for recording an activity entry
#[derive(Debug, Clone)]
pub struct ActivityCreateDBRequest {
    pub user_id: UserId,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Option<Uuid>,
    pub detail: Option<serde_json::Value>,
}

impl ActivityCreateDBRequest {
    pub fn new(user_id: UserId, action: &str, entity_type: &str, entity_id: Option<Uuid>) -> Self {
        Self {
            user_id,
            action: action.to_string(),
            entity_type: entity_type.to_string(),
            entity_id,
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.detail = Some(detail);
        self
    }
}

/// Database response for an activity entry
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ActivityDBResponse {
    pub id: ActivityId,
    pub user_id: UserId,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Option<Uuid>,
    pub detail: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}
