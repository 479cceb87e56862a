//! API request/response models for indicators.

use super::pagination::Pagination;
use crate::api::models::{categories::Category, data_points::DataPointResponse};
use crate::db::models::indicators::IndicatorDBResponse;
use crate::types::IndicatorId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IndicatorCreate {
    pub name: String,
    pub description: Option<String>,
    pub category: Category,
    pub unit: Option<String>,
    pub source: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct IndicatorUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    /// Moving an indicator to another category requires access to both the
    /// current and the target category.
    pub category: Option<Category>,
    pub unit: Option<String>,
    pub source: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IndicatorResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: IndicatorId,
    pub name: String,
    pub description: Option<String>,
    pub category: Category,
    pub unit: Option<String>,
    pub source: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Query parameters for listing indicators
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ListIndicatorsQuery {
    /// Pagination parameters
    #[serde(flatten)]
    #[param(inline)]
    pub pagination: Pagination,

    /// Restrict to one category. On the admin surface this is intersected
    /// with the caller's accessible set (403 when outside it).
    pub category: Option<Category>,

    /// Filter indicators by name (case-insensitive substring match)
    pub search: Option<String>,
}

/// Full dataset of one indicator, as served by the export endpoint.
/// Spreadsheet rendering is a frontend concern; this is the flat data.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IndicatorExportResponse {
    pub indicator: IndicatorResponse,
    pub data: Vec<DataPointResponse>,
}

impl From<IndicatorDBResponse> for IndicatorResponse {
    fn from(db: IndicatorDBResponse) -> Self {
        Self {
            id: db.id,
            name: db.name,
            description: db.description,
            category: db.category,
            unit: db.unit,
            source: db.source,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
