//! API request/response models for FAQ entries.

use super::pagination::Pagination;
use crate::db::models::faqs::FaqDBResponse;
use crate::types::FaqId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Triage state of a FAQ entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, Hash, ToSchema)]
#[sqlx(type_name = "faq_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FaqStatus {
    /// Submitted, awaiting an answer
    Pending,
    /// Answered internally, not yet on the public surface
    Answered,
    /// Visible on the public surface
    Published,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FaqCreate {
    pub question: String,
    pub answer: Option<String>,
    /// Email of the submitter, for public submissions routed through staff
    pub submitted_by_email: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct FaqUpdate {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub status: Option<FaqStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FaqResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: FaqId,
    pub question: String,
    pub answer: Option<String>,
    pub status: FaqStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Query parameters for listing FAQ entries
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ListFaqsQuery {
    /// Pagination parameters
    #[serde(flatten)]
    #[param(inline)]
    pub pagination: Pagination,

    /// Restrict to one triage status. Ignored on the public surface, which
    /// always serves `published` entries only.
    pub status: Option<FaqStatus>,
}

impl From<FaqDBResponse> for FaqResponse {
    fn from(db: FaqDBResponse) -> Self {
        Self {
            id: db.id,
            question: db.question,
            answer: db.answer,
            status: db.status,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
