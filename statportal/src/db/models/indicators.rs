//! Database models for statistical indicators.

use crate::api::models::categories::Category;
use crate::types::{IndicatorId, UserId};
use chrono::{DateTime, Utc};

/// Database request for creating an indicator
#[derive(Debug, Clone)]
pub struct IndicatorCreateDBRequest {
    pub name: String,
    pub description: Option<String>,
    pub category: Category,
    pub unit: Option<String>,
    pub source: Option<String>,
    pub created_by: UserId,
}

/// Database request for updating an indicator.
/// `category` moves the indicator between categories — callers must have
/// checked access against both the existing and the target category first.
#[derive(Debug, Clone, Default)]
pub struct IndicatorUpdateDBRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub unit: Option<String>,
    pub source: Option<String>,
}

/// Database response for an indicator
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct IndicatorDBResponse {
    pub id: IndicatorId,
    pub name: String,
    pub description: Option<String>,
    pub category: Category,
    pub unit: Option<String>,
    pub source: Option<String>,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
