use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::json;

use crate::{
    AppState,
    api::models::indicators::{IndicatorCreate, IndicatorExportResponse, IndicatorResponse, IndicatorUpdate, ListIndicatorsQuery},
    auth::{
        permissions::{RequiresPermission, operation, resource},
        policy,
    },
    db::{
        handlers::{DataPoints, Indicators, Repository, indicators::IndicatorFilter},
        models::{
            activity_log::ActivityCreateDBRequest,
            indicators::{IndicatorCreateDBRequest, IndicatorUpdateDBRequest},
        },
    },
    errors::{Error, Result},
    types::IndicatorId,
};

#[utoipa::path(
    get,
    path = "/indicators",
    tag = "indicators",
    summary = "List indicators",
    responses(
        (status = 200, description = "Indicators in the caller's visible categories", body = Vec<IndicatorResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Requested category outside the accessible set"),
    ),
    params(ListIndicatorsQuery),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn list_indicators(
    State(state): State<AppState>,
    Query(query): Query<ListIndicatorsQuery>,
    identity: RequiresPermission<resource::Indicators, operation::Read>,
) -> Result<Json<Vec<IndicatorResponse>>> {
    // A client-supplied category is intersected with the accessible set,
    // never substituted for it; a disjoint request is a 403.
    let categories = policy::visible_categories(&identity, query.category)?;

    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Indicators::new(&mut pool_conn);

    let (skip, limit) = query.pagination.params();
    let indicators = repo
        .list(&IndicatorFilter::new(categories, skip, limit).with_search(query.search))
        .await?;

    Ok(Json(indicators.into_iter().map(IndicatorResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/indicators",
    tag = "indicators",
    summary = "Create indicator",
    request_body = IndicatorCreate,
    responses(
        (status = 201, description = "Indicator created successfully", body = IndicatorResponse),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn create_indicator(
    State(state): State<AppState>,
    current_user: RequiresPermission<resource::Indicators, operation::Create>,
    Json(create): Json<IndicatorCreate>,
) -> Result<(StatusCode, Json<IndicatorResponse>)> {
    if create.name.trim().is_empty() {
        return Err(Error::BadRequest {
            message: "name is required".to_string(),
        });
    }
    // Creating is superadmin-only by the action table, but the category gate
    // still runs: one policy source, no handler-local exceptions.
    policy::ensure_category_access(&current_user, create.category)?;

    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;
    let indicator;
    {
        let mut repo = Indicators::new(&mut tx);
        indicator = repo
            .create(&IndicatorCreateDBRequest {
                name: create.name,
                description: create.description,
                category: create.category,
                unit: create.unit,
                source: create.source,
                created_by: current_user.id,
            })
            .await?;
    }
    super::record_activity(
        &mut tx,
        ActivityCreateDBRequest::new(current_user.id, "create", "indicator", Some(indicator.id))
            .with_detail(json!({"category": indicator.category})),
    )
    .await;
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok((StatusCode::CREATED, Json(IndicatorResponse::from(indicator))))
}

#[utoipa::path(
    get,
    path = "/indicators/{id}",
    tag = "indicators",
    summary = "Get indicator",
    responses(
        (status = 200, description = "Indicator details", body = IndicatorResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Indicator outside the caller's categories"),
        (status = 404, description = "Indicator not found"),
    ),
    params(("id" = uuid::Uuid, Path, description = "Indicator ID")),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn get_indicator(
    State(state): State<AppState>,
    Path(id): Path<IndicatorId>,
    identity: RequiresPermission<resource::Indicators, operation::Read>,
) -> Result<Json<IndicatorResponse>> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Indicators::new(&mut pool_conn);

    let indicator = repo.get_by_id(id).await?.ok_or_else(|| Error::NotFound {
        resource: "Indicator".to_string(),
        id: id.to_string(),
    })?;
    policy::ensure_category_access(&identity, indicator.category)?;

    Ok(Json(IndicatorResponse::from(indicator)))
}

#[utoipa::path(
    patch,
    path = "/indicators/{id}",
    tag = "indicators",
    summary = "Update indicator",
    request_body = IndicatorUpdate,
    responses(
        (status = 200, description = "Indicator updated successfully", body = IndicatorResponse),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Existing or target category not permitted"),
        (status = 404, description = "Indicator not found"),
    ),
    params(("id" = uuid::Uuid, Path, description = "Indicator ID")),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn update_indicator(
    State(state): State<AppState>,
    Path(id): Path<IndicatorId>,
    current_user: RequiresPermission<resource::Indicators, operation::Update>,
    Json(update): Json<IndicatorUpdate>,
) -> Result<Json<IndicatorResponse>> {
    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;
    let indicator;
    {
        let mut repo = Indicators::new(&mut tx);

        // Access is checked on the row as it exists, and - when the request
        // re-categorizes - on the target category as well.
        let existing = repo.get_by_id(id).await?.ok_or_else(|| Error::NotFound {
            resource: "Indicator".to_string(),
            id: id.to_string(),
        })?;
        let target = update.category.unwrap_or(existing.category);
        policy::ensure_recategorize(&current_user, existing.category, target)?;

        indicator = repo
            .update(
                id,
                &IndicatorUpdateDBRequest {
                    name: update.name,
                    description: update.description,
                    category: update.category,
                    unit: update.unit,
                    source: update.source,
                },
            )
            .await?;
    }
    super::record_activity(
        &mut tx,
        ActivityCreateDBRequest::new(current_user.id, "update", "indicator", Some(id)).with_detail(json!({"category": indicator.category})),
    )
    .await;
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok(Json(IndicatorResponse::from(indicator)))
}

#[utoipa::path(
    delete,
    path = "/indicators/{id}",
    tag = "indicators",
    summary = "Delete indicator",
    responses(
        (status = 204, description = "Indicator deleted successfully"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Indicator not found"),
    ),
    params(("id" = uuid::Uuid, Path, description = "Indicator ID")),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn delete_indicator(
    State(state): State<AppState>,
    Path(id): Path<IndicatorId>,
    current_user: RequiresPermission<resource::Indicators, operation::Delete>,
) -> Result<StatusCode> {
    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;
    {
        let mut repo = Indicators::new(&mut tx);

        let existing = repo.get_by_id(id).await?.ok_or_else(|| Error::NotFound {
            resource: "Indicator".to_string(),
            id: id.to_string(),
        })?;
        policy::ensure_category_access(&current_user, existing.category)?;

        repo.delete(id).await?;
    }
    super::record_activity(&mut tx, ActivityCreateDBRequest::new(current_user.id, "delete", "indicator", Some(id))).await;
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok(StatusCode::NO_CONTENT)
}

/// Export one indicator with its full time series as a flat dataset.
/// Spreadsheet formatting is the frontend's concern.
#[utoipa::path(
    get,
    path = "/indicators/{id}/export",
    tag = "indicators",
    summary = "Export indicator dataset",
    responses(
        (status = 200, description = "Indicator with all data rows", body = IndicatorExportResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Indicator outside the caller's categories"),
        (status = 404, description = "Indicator not found"),
    ),
    params(("id" = uuid::Uuid, Path, description = "Indicator ID")),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn export_indicator(
    State(state): State<AppState>,
    Path(id): Path<IndicatorId>,
    identity: RequiresPermission<resource::Indicators, operation::Read>,
) -> Result<Json<IndicatorExportResponse>> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let indicator = {
        let mut repo = Indicators::new(&mut pool_conn);
        repo.get_by_id(id).await?.ok_or_else(|| Error::NotFound {
            resource: "Indicator".to_string(),
            id: id.to_string(),
        })?
    };
    policy::ensure_category_access(&identity, indicator.category)?;

    let data = {
        let mut repo = DataPoints::new(&mut pool_conn);
        repo.list_all_for_indicator(id).await?
    };

    Ok(Json(IndicatorExportResponse {
        indicator: IndicatorResponse::from(indicator),
        data: data.into_iter().map(Into::into).collect(),
    }))
}
