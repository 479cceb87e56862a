//! Database models for indicator time-series data points.

use crate::api::models::data_points::DataStatus;
use crate::types::{DataPointId, IndicatorId, UserId};
use chrono::{DateTime, Utc};

/// Database request for creating a data point
#[derive(Debug, Clone)]
pub struct DataPointCreateDBRequest {
    pub indicator_id: IndicatorId,
    pub year: i32,
    pub value: f64,
    pub status: DataStatus,
}

/// Database request for updating a data point.
///
/// `status` here only ever carries `draft` or `preliminary` — promotion to
/// `final` goes through [`DataPoints::verify`](crate::db::handlers::DataPoints::verify),
/// which stamps the verifying user in the same statement.
#[derive(Debug, Clone, Default)]
pub struct DataPointUpdateDBRequest {
    pub year: Option<i32>,
    pub value: Option<f64>,
    pub status: Option<DataStatus>,
}

/// Database response for a data point
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DataPointDBResponse {
    pub id: DataPointId,
    pub indicator_id: IndicatorId,
    pub year: i32,
    pub value: f64,
    pub status: DataStatus,
    pub verified_by: Option<UserId>,
    pub verified_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DataPointDBResponse {
    /// The one canonical definition of "verified": the row reached `final`.
    /// The verify operation and a CHECK constraint guarantee `verified_by`
    /// is set whenever this holds.
    pub fn is_verified(&self) -> bool {
        self.status == DataStatus::Final
    }
}
