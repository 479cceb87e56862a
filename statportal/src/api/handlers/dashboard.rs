use axum::{Json, extract::State};

use crate::{
    AppState,
    api::models::dashboard::{CategorySummary, ContentSummary, DashboardResponse},
    auth::{
        permissions::{RequiresPermission, operation, resource},
        policy,
    },
    db::handlers::{Dashboard, activity_log::ActivityFilter, ActivityLog},
    errors::{Error, Result},
};

/// Number of recent activity entries included in the dashboard payload.
const RECENT_ACTIVITY_LIMIT: i64 = 10;

/// Admin dashboard: aggregates for the caller's visible categories,
/// editorial totals, and the caller's recent activity.
#[utoipa::path(
    get,
    path = "/dashboard",
    tag = "dashboard",
    summary = "Admin dashboard aggregates",
    responses(
        (status = 200, description = "Dashboard aggregates", body = DashboardResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn get_dashboard(
    State(state): State<AppState>,
    identity: RequiresPermission<resource::Dashboard, operation::Read>,
) -> Result<Json<DashboardResponse>> {
    let visible = policy::categories_visible_to(identity.role);

    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let (category_counts, content_counts) = {
        let mut repo = Dashboard::new(&mut pool_conn);
        (repo.category_counts(visible).await?, repo.content_counts().await?)
    };

    let recent_activity = {
        let mut repo = ActivityLog::new(&mut pool_conn);
        repo.list(&ActivityFilter::new(0, RECENT_ACTIVITY_LIMIT).for_user(identity.id)).await?
    };

    Ok(Json(DashboardResponse {
        categories: category_counts.into_iter().map(CategorySummary::from).collect(),
        content: ContentSummary::from(content_counts),
        recent_activity: recent_activity.into_iter().map(Into::into).collect(),
    }))
}
