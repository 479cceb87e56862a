//! Database repository for the append-only activity log.
//!
//! Entries are written inside the same transaction as the mutation they
//! describe (so a crash cannot orphan an audit entry), but a failed insert
//! must never sink the primary operation: call sites log the error and move
//! on. See the handler modules for the pattern.

use crate::db::{
    errors::Result,
    models::activity_log::{ActivityCreateDBRequest, ActivityDBResponse},
};
use crate::types::{UserId, abbrev_uuid};
use sqlx::PgConnection;
use tracing::instrument;
use uuid::Uuid;

/// Filter for listing activity entries.
#[derive(Debug, Clone)]
pub struct ActivityFilter {
    /// Restrict to one user's entries (None = all users)
    pub user_id: Option<UserId>,
    pub skip: i64,
    pub limit: i64,
}

impl ActivityFilter {
    pub fn new(skip: i64, limit: i64) -> Self {
        Self {
            user_id: None,
            skip,
            limit,
        }
    }

    pub fn for_user(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }
}

pub struct ActivityLog<'c> {
    db: &'c mut PgConnection,
}

impl<'c> ActivityLog<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Append one entry.
    #[instrument(skip(self, request), fields(user_id = %abbrev_uuid(&request.user_id), action = %request.action), err)]
    pub async fn record(&mut self, request: &ActivityCreateDBRequest) -> Result<ActivityDBResponse> {
        let entry = sqlx::query_as::<_, ActivityDBResponse>(
            r#"
            INSERT INTO activity_log (id, user_id, action, entity_type, entity_id, detail)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.user_id)
        .bind(&request.action)
        .bind(&request.entity_type)
        .bind(request.entity_id)
        .bind(&request.detail)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(entry)
    }

    /// Recent entries, newest first.
    #[instrument(skip(self, filter), fields(limit = filter.limit, skip = filter.skip), err)]
    pub async fn list(&mut self, filter: &ActivityFilter) -> Result<Vec<ActivityDBResponse>> {
        let entries = sqlx::query_as::<_, ActivityDBResponse>(
            r#"
            SELECT * FROM activity_log
            WHERE ($1::uuid IS NULL OR user_id = $1)
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(filter.user_id)
        .bind(filter.limit)
        .bind(filter.skip)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(entries)
    }
}
