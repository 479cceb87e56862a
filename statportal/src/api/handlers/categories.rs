use axum::{Json, extract::State};

use crate::{
    AppState,
    api::models::categories::CategoryResponse,
    auth::{
        permissions::{RequiresPermission, operation, resource},
        policy,
    },
    db::handlers::Indicators,
    errors::{Error, Result},
};

/// The caller's visible categories, with indicator counts.
///
/// A scoped admin sees only their own category here; `superadmin` all three.
/// This is the endpoint admin UIs build their navigation from, so it must
/// come from the policy table, not from the data.
#[utoipa::path(
    get,
    path = "/categories",
    tag = "categories",
    summary = "List visible categories",
    responses(
        (status = 200, description = "Visible categories with indicator counts", body = Vec<CategoryResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn list_categories(
    State(state): State<AppState>,
    identity: RequiresPermission<resource::Categories, operation::Read>,
) -> Result<Json<Vec<CategoryResponse>>> {
    let visible = policy::categories_visible_to(identity.role);

    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Indicators::new(&mut pool_conn);
    let counts = repo.count_by_category(visible).await?;

    // Keep every visible category present, zeroing the empty ones
    let response = visible
        .iter()
        .map(|&category| CategoryResponse {
            category,
            indicator_count: counts.iter().find(|(c, _)| *c == category).map(|(_, n)| *n).unwrap_or(0),
        })
        .collect();

    Ok(Json(response))
}
