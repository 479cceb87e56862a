//! Database models for FAQ entries.

use crate::api::models::faqs::FaqStatus;
use crate::types::{FaqId, UserId};
use chrono::{DateTime, Utc};

/// Database request for creating a FAQ entry
#[derive(Debug, Clone)]
pub struct FaqCreateDBRequest {
    pub question: String,
    pub answer: Option<String>,
    pub status: FaqStatus,
    pub submitted_by_email: Option<String>,
    pub answered_by: Option<UserId>,
}

/// Database request for updating a FAQ entry
#[derive(Debug, Clone, Default)]
pub struct FaqUpdateDBRequest {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub status: Option<FaqStatus>,
    pub answered_by: Option<UserId>,
}

/// Database response for a FAQ entry
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FaqDBResponse {
    pub id: FaqId,
    pub question: String,
    pub answer: Option<String>,
    pub status: FaqStatus,
    pub submitted_by_email: Option<String>,
    pub answered_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
