//! Database repository for indicator time-series data points.

use crate::api::models::data_points::DataStatus;
use crate::db::{
    errors::{DbError, Result},
    handlers::repository::Repository,
    models::data_points::{DataPointCreateDBRequest, DataPointDBResponse, DataPointUpdateDBRequest},
};
use crate::types::{DataPointId, IndicatorId, UserId, abbrev_uuid};
use sqlx::PgConnection;
use tracing::instrument;
use uuid::Uuid;

/// Filter for listing data points of one indicator.
#[derive(Debug, Clone)]
pub struct DataPointFilter {
    pub indicator_id: IndicatorId,
    pub status: Option<DataStatus>,
    pub skip: i64,
    pub limit: i64,
}

impl DataPointFilter {
    pub fn new(indicator_id: IndicatorId, skip: i64, limit: i64) -> Self {
        Self {
            indicator_id,
            status: None,
            skip,
            limit,
        }
    }

    pub fn with_status(mut self, status: Option<DataStatus>) -> Self {
        self.status = status;
        self
    }
}

pub struct DataPoints<'c> {
    db: &'c mut PgConnection,
}

#[async_trait::async_trait]
impl<'c> Repository for DataPoints<'c> {
    type CreateRequest = DataPointCreateDBRequest;
    type UpdateRequest = DataPointUpdateDBRequest;
    type Response = DataPointDBResponse;
    type Id = DataPointId;
    type Filter = DataPointFilter;

    #[instrument(skip(self, request), fields(indicator_id = %abbrev_uuid(&request.indicator_id), year = request.year), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let data_point = sqlx::query_as::<_, DataPointDBResponse>(
            r#"
            INSERT INTO indicator_data (id, indicator_id, year, value, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.indicator_id)
        .bind(request.year)
        .bind(request.value)
        .bind(request.status)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(data_point)
    }

    #[instrument(skip(self), fields(data_point_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let data_point = sqlx::query_as::<_, DataPointDBResponse>("SELECT * FROM indicator_data WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(data_point)
    }

    #[instrument(skip(self, filter), fields(indicator_id = %abbrev_uuid(&filter.indicator_id)), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let data_points = sqlx::query_as::<_, DataPointDBResponse>(
            r#"
            SELECT * FROM indicator_data
            WHERE indicator_id = $1
              AND ($2::data_status IS NULL OR status = $2)
            ORDER BY year ASC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(filter.indicator_id)
        .bind(filter.status)
        .bind(filter.limit)
        .bind(filter.skip)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(data_points)
    }

    #[instrument(skip(self), fields(data_point_id = %abbrev_uuid(&id)), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM indicator_data WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Partial update of year/value/status.
    ///
    /// Any edit clears the verification stamp: a changed value is no longer
    /// the value somebody verified. Promotion back to `final` must go
    /// through [`DataPoints::verify`].
    #[instrument(skip(self, request), fields(data_point_id = %abbrev_uuid(&id)), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let data_point = sqlx::query_as::<_, DataPointDBResponse>(
            r#"
            UPDATE indicator_data SET
                year = COALESCE($2, year),
                value = COALESCE($3, value),
                status = COALESCE($4, 'draft'),
                verified_by = NULL,
                verified_at = NULL,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.year)
        .bind(request.value)
        .bind(request.status)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(data_point)
    }
}

impl<'c> DataPoints<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Promote a data point to `final`, stamping the verifying user.
    ///
    /// This is the only path to `final` status; together with the
    /// `final ⇒ verified_by` CHECK constraint it keeps the "verified"
    /// definition canonical.
    #[instrument(skip(self), fields(data_point_id = %abbrev_uuid(&id), verified_by = %abbrev_uuid(&verified_by)), err)]
    pub async fn verify(&mut self, id: DataPointId, verified_by: UserId) -> Result<DataPointDBResponse> {
        let data_point = sqlx::query_as::<_, DataPointDBResponse>(
            r#"
            UPDATE indicator_data SET
                status = 'final',
                verified_by = $2,
                verified_at = NOW(),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(verified_by)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(data_point)
    }

    /// All rows of one indicator, for the export endpoint. No pagination:
    /// an indicator's series is small (one row per year).
    #[instrument(skip(self), fields(indicator_id = %abbrev_uuid(&indicator_id)), err)]
    pub async fn list_all_for_indicator(&mut self, indicator_id: IndicatorId) -> Result<Vec<DataPointDBResponse>> {
        let data_points = sqlx::query_as::<_, DataPointDBResponse>(
            "SELECT * FROM indicator_data WHERE indicator_id = $1 ORDER BY year ASC",
        )
        .bind(indicator_id)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(data_points)
    }
}
