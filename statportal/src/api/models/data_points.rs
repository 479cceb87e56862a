//! API request/response models for indicator data points.

use super::pagination::Pagination;
use crate::db::models::data_points::DataPointDBResponse;
use crate::types::{DataPointId, IndicatorId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Publication status of a data point.
///
/// `final` is the canonical "verified" state: it is only reachable through
/// the verify operation, which stamps `verified_by`/`verified_at`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, Hash, ToSchema)]
#[sqlx(type_name = "data_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DataStatus {
    Draft,
    Preliminary,
    Final,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DataPointCreate {
    pub year: i32,
    pub value: f64,
    /// Initial status; `final` is rejected here — rows become final through
    /// verification only.
    pub status: Option<DataStatus>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct DataPointUpdate {
    pub year: Option<i32>,
    pub value: Option<f64>,
    /// `draft` or `preliminary`; promotion to `final` goes through the
    /// verify endpoint. Any update demotes the row out of `final`.
    pub status: Option<DataStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DataPointResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: DataPointId,
    #[schema(value_type = String, format = "uuid")]
    pub indicator_id: IndicatorId,
    pub year: i32,
    pub value: f64,
    pub status: DataStatus,
    #[schema(value_type = Option<String>, format = "uuid")]
    pub verified_by: Option<UserId>,
    pub verified_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Query parameters for listing data points
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ListDataPointsQuery {
    /// Pagination parameters
    #[serde(flatten)]
    #[param(inline)]
    pub pagination: Pagination,

    /// Restrict to one status. Ignored on the public surface, which always
    /// serves `final` rows only.
    pub status: Option<DataStatus>,
}

impl From<DataPointDBResponse> for DataPointResponse {
    fn from(db: DataPointDBResponse) -> Self {
        Self {
            id: db.id,
            indicator_id: db.indicator_id,
            year: db.year,
            value: db.value,
            status: db.status,
            verified_by: db.verified_by,
            verified_at: db.verified_at,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
