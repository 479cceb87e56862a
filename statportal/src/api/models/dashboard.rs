//! API models for the admin dashboard.

use crate::api::models::{activity::ActivityResponse, categories::Category};
use crate::db::handlers::dashboard::{CategoryCounts, ContentCounts};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Aggregates for one visible category.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategorySummary {
    pub category: Category,
    pub indicator_count: i64,
    pub data_point_count: i64,
    /// Rows not yet verified (status other than `final`)
    pub unverified_count: i64,
}

/// Editorial totals.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContentSummary {
    pub article_count: i64,
    pub published_article_count: i64,
    pub faq_count: i64,
    pub pending_faq_count: i64,
}

/// The dashboard payload: category aggregates limited to what the caller may
/// see, editorial totals, and the caller's recent activity.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardResponse {
    pub categories: Vec<CategorySummary>,
    pub content: ContentSummary,
    pub recent_activity: Vec<ActivityResponse>,
}

impl From<CategoryCounts> for CategorySummary {
    fn from(db: CategoryCounts) -> Self {
        Self {
            category: db.category,
            indicator_count: db.indicator_count,
            data_point_count: db.data_point_count,
            unverified_count: db.unverified_count,
        }
    }
}

impl From<ContentCounts> for ContentSummary {
    fn from(db: ContentCounts) -> Self {
        Self {
            article_count: db.article_count,
            published_article_count: db.published_article_count,
            faq_count: db.faq_count,
            pending_faq_count: db.pending_faq_count,
        }
    }
}
