use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::json;

use crate::{
    AppState,
    api::models::{
        data_points::{DataPointCreate, DataPointResponse, DataPointUpdate, DataStatus, ListDataPointsQuery},
        users::Identity,
    },
    auth::{
        permissions::{RequiresPermission, operation, resource},
        policy,
    },
    db::{
        handlers::{DataPoints, Indicators, Repository, data_points::DataPointFilter},
        models::{
            activity_log::ActivityCreateDBRequest,
            data_points::{DataPointCreateDBRequest, DataPointDBResponse, DataPointUpdateDBRequest},
            indicators::IndicatorDBResponse,
        },
    },
    errors::{Error, Result},
    types::{DataPointId, IndicatorId},
};

/// Plausible bounds for a statistical reference year.
const YEAR_MIN: i32 = 1900;
const YEAR_MAX: i32 = 2100;

fn validate_year(year: i32) -> Result<()> {
    if !(YEAR_MIN..=YEAR_MAX).contains(&year) {
        return Err(Error::BadRequest {
            message: format!("year must be between {YEAR_MIN} and {YEAR_MAX}"),
        });
    }
    Ok(())
}

/// Load the indicator and check the caller's access to its category.
/// Every data-point operation goes through this first.
async fn load_indicator_checked(
    db: &mut sqlx::PgConnection,
    indicator_id: IndicatorId,
    identity: &Identity,
) -> Result<IndicatorDBResponse> {
    let mut repo = Indicators::new(db);
    let indicator = repo.get_by_id(indicator_id).await?.ok_or_else(|| Error::NotFound {
        resource: "Indicator".to_string(),
        id: indicator_id.to_string(),
    })?;
    policy::ensure_category_access(identity, indicator.category)?;
    Ok(indicator)
}

/// Load a data point and make sure it belongs to the routed indicator.
async fn load_data_point(db: &mut sqlx::PgConnection, indicator_id: IndicatorId, data_id: DataPointId) -> Result<DataPointDBResponse> {
    let mut repo = DataPoints::new(db);
    let data_point = repo.get_by_id(data_id).await?.filter(|d| d.indicator_id == indicator_id);
    data_point.ok_or_else(|| Error::NotFound {
        resource: "Data point".to_string(),
        id: data_id.to_string(),
    })
}

#[utoipa::path(
    get,
    path = "/indicators/{indicator_id}/data",
    tag = "indicator-data",
    summary = "List data points",
    responses(
        (status = 200, description = "Data points for the indicator", body = Vec<DataPointResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Indicator outside the caller's categories"),
        (status = 404, description = "Indicator not found"),
    ),
    params(
        ("indicator_id" = uuid::Uuid, Path, description = "Indicator ID"),
        ListDataPointsQuery,
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn list_data_points(
    State(state): State<AppState>,
    Path(indicator_id): Path<IndicatorId>,
    Query(query): Query<ListDataPointsQuery>,
    identity: RequiresPermission<resource::IndicatorData, operation::Read>,
) -> Result<Json<Vec<DataPointResponse>>> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    load_indicator_checked(&mut pool_conn, indicator_id, &identity).await?;

    let (skip, limit) = query.pagination.params();
    let mut repo = DataPoints::new(&mut pool_conn);
    let data_points = repo
        .list(&DataPointFilter::new(indicator_id, skip, limit).with_status(query.status))
        .await?;

    Ok(Json(data_points.into_iter().map(DataPointResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/indicators/{indicator_id}/data",
    tag = "indicator-data",
    summary = "Create data point",
    request_body = DataPointCreate,
    responses(
        (status = 201, description = "Data point created successfully", body = DataPointResponse),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Indicator outside the caller's categories"),
        (status = 404, description = "Indicator not found"),
        (status = 409, description = "Year already present for this indicator"),
    ),
    params(("indicator_id" = uuid::Uuid, Path, description = "Indicator ID")),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn create_data_point(
    State(state): State<AppState>,
    Path(indicator_id): Path<IndicatorId>,
    current_user: RequiresPermission<resource::IndicatorData, operation::Create>,
    Json(create): Json<DataPointCreate>,
) -> Result<(StatusCode, Json<DataPointResponse>)> {
    validate_year(create.year)?;
    let status = create.status.unwrap_or(DataStatus::Draft);
    if status == DataStatus::Final {
        return Err(Error::BadRequest {
            message: "Data points are created as draft or preliminary; use the verify endpoint to finalize".to_string(),
        });
    }

    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;
    load_indicator_checked(&mut tx, indicator_id, &current_user).await?;

    let data_point;
    {
        let mut repo = DataPoints::new(&mut tx);
        data_point = repo
            .create(&DataPointCreateDBRequest {
                indicator_id,
                year: create.year,
                value: create.value,
                status,
            })
            .await?;
    }
    super::record_activity(
        &mut tx,
        ActivityCreateDBRequest::new(current_user.id, "create", "data_point", Some(data_point.id))
            .with_detail(json!({"indicator_id": indicator_id, "year": create.year})),
    )
    .await;
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok((StatusCode::CREATED, Json(DataPointResponse::from(data_point))))
}

#[utoipa::path(
    patch,
    path = "/indicators/{indicator_id}/data/{data_id}",
    tag = "indicator-data",
    summary = "Update data point",
    request_body = DataPointUpdate,
    responses(
        (status = 200, description = "Data point updated successfully", body = DataPointResponse),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Indicator outside the caller's categories"),
        (status = 404, description = "Data point not found"),
    ),
    params(
        ("indicator_id" = uuid::Uuid, Path, description = "Indicator ID"),
        ("data_id" = uuid::Uuid, Path, description = "Data point ID"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn update_data_point(
    State(state): State<AppState>,
    Path((indicator_id, data_id)): Path<(IndicatorId, DataPointId)>,
    current_user: RequiresPermission<resource::IndicatorData, operation::Update>,
    Json(update): Json<DataPointUpdate>,
) -> Result<Json<DataPointResponse>> {
    if let Some(year) = update.year {
        validate_year(year)?;
    }
    if update.status == Some(DataStatus::Final) {
        return Err(Error::BadRequest {
            message: "Use the verify endpoint to finalize a data point".to_string(),
        });
    }

    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;
    load_indicator_checked(&mut tx, indicator_id, &current_user).await?;
    load_data_point(&mut tx, indicator_id, data_id).await?;

    let data_point;
    {
        let mut repo = DataPoints::new(&mut tx);
        data_point = repo
            .update(
                data_id,
                &DataPointUpdateDBRequest {
                    year: update.year,
                    value: update.value,
                    status: update.status,
                },
            )
            .await?;
    }
    super::record_activity(
        &mut tx,
        ActivityCreateDBRequest::new(current_user.id, "update", "data_point", Some(data_id))
            .with_detail(json!({"indicator_id": indicator_id})),
    )
    .await;
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok(Json(DataPointResponse::from(data_point)))
}

#[utoipa::path(
    delete,
    path = "/indicators/{indicator_id}/data/{data_id}",
    tag = "indicator-data",
    summary = "Delete data point",
    responses(
        (status = 204, description = "Data point deleted successfully"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Data point not found"),
    ),
    params(
        ("indicator_id" = uuid::Uuid, Path, description = "Indicator ID"),
        ("data_id" = uuid::Uuid, Path, description = "Data point ID"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn delete_data_point(
    State(state): State<AppState>,
    Path((indicator_id, data_id)): Path<(IndicatorId, DataPointId)>,
    current_user: RequiresPermission<resource::IndicatorData, operation::Delete>,
) -> Result<StatusCode> {
    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;
    load_indicator_checked(&mut tx, indicator_id, &current_user).await?;
    load_data_point(&mut tx, indicator_id, data_id).await?;

    {
        let mut repo = DataPoints::new(&mut tx);
        repo.delete(data_id).await?;
    }
    super::record_activity(&mut tx, ActivityCreateDBRequest::new(current_user.id, "delete", "data_point", Some(data_id))).await;
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok(StatusCode::NO_CONTENT)
}

/// Promote a data point to `final`, stamping the verifying user.
#[utoipa::path(
    post,
    path = "/indicators/{indicator_id}/data/{data_id}/verify",
    tag = "indicator-data",
    summary = "Verify data point",
    responses(
        (status = 200, description = "Data point verified", body = DataPointResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Indicator outside the caller's categories"),
        (status = 404, description = "Data point not found"),
    ),
    params(
        ("indicator_id" = uuid::Uuid, Path, description = "Indicator ID"),
        ("data_id" = uuid::Uuid, Path, description = "Data point ID"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn verify_data_point(
    State(state): State<AppState>,
    Path((indicator_id, data_id)): Path<(IndicatorId, DataPointId)>,
    current_user: RequiresPermission<resource::IndicatorData, operation::Verify>,
) -> Result<Json<DataPointResponse>> {
    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;
    load_indicator_checked(&mut tx, indicator_id, &current_user).await?;
    load_data_point(&mut tx, indicator_id, data_id).await?;

    let data_point;
    {
        let mut repo = DataPoints::new(&mut tx);
        data_point = repo.verify(data_id, current_user.id).await?;
    }
    super::record_activity(
        &mut tx,
        ActivityCreateDBRequest::new(current_user.id, "verify", "data_point", Some(data_id))
            .with_detail(json!({"indicator_id": indicator_id, "year": data_point.year})),
    )
    .await;
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok(Json(DataPointResponse::from(data_point)))
}
