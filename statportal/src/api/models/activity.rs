//! API models for the activity log.

use super::pagination::Pagination;
use crate::db::models::activity_log::ActivityDBResponse;
use crate::types::{ActivityId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ActivityResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: ActivityId,
    #[schema(value_type = String, format = "uuid")]
    pub user_id: UserId,
    pub action: String,
    pub entity_type: String,
    #[schema(value_type = Option<String>, format = "uuid")]
    pub entity_id: Option<Uuid>,
    pub detail: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

/// Query parameters for listing activity entries
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ListActivityQuery {
    /// Pagination parameters
    #[serde(flatten)]
    #[param(inline)]
    pub pagination: Pagination,

    /// Restrict to one user's entries
    pub user_id: Option<UserId>,
}

impl From<ActivityDBResponse> for ActivityResponse {
    fn from(db: ActivityDBResponse) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            action: db.action,
            entity_type: db.entity_type,
            entity_id: db.entity_id,
            detail: db.detail,
            created_at: db.created_at,
        }
    }
}
