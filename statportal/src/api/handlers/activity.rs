use axum::{
    Json,
    extract::{Query, State},
};

use crate::{
    AppState,
    api::models::activity::{ActivityResponse, ListActivityQuery},
    auth::permissions::{RequiresPermission, operation, resource},
    db::handlers::{ActivityLog, activity_log::ActivityFilter},
    errors::{Error, Result},
};

/// Recent audit entries, newest first. Superadmin only.
#[utoipa::path(
    get,
    path = "/activity",
    tag = "activity",
    summary = "List activity log entries",
    responses(
        (status = 200, description = "Activity entries", body = Vec<ActivityResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
    ),
    params(ListActivityQuery),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn list_activity(
    State(state): State<AppState>,
    Query(query): Query<ListActivityQuery>,
    _: RequiresPermission<resource::ActivityLog, operation::Read>,
) -> Result<Json<Vec<ActivityResponse>>> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = ActivityLog::new(&mut pool_conn);

    let (skip, limit) = query.pagination.params();
    let mut filter = ActivityFilter::new(skip, limit);
    if let Some(user_id) = query.user_id {
        filter = filter.for_user(user_id);
    }

    let entries = repo.list(&filter).await?;
    Ok(Json(entries.into_iter().map(ActivityResponse::from).collect()))
}
