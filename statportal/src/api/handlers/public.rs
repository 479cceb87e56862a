//! The unauthenticated read-only surface.
//!
//! No authentication, no authorization — and therefore a hardcoded
//! publication predicate in every query: data points only at `final`
//! status, articles only when published, FAQ entries only when published.
//! Client-supplied status filters are ignored, not merged: an anonymous
//! caller cannot widen what these endpoints serve.

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::{
    AppState,
    api::models::{
        articles::{ArticleResponse, ListArticlesQuery},
        categories::{Category, CategoryResponse},
        data_points::{DataPointResponse, DataStatus, ListDataPointsQuery},
        faqs::{FaqResponse, FaqStatus, ListFaqsQuery},
        indicators::{IndicatorResponse, ListIndicatorsQuery},
    },
    db::handlers::{
        Articles, DataPoints, Faqs, Indicators, Repository, articles::ArticleFilter, data_points::DataPointFilter,
        faqs::FaqFilter, indicators::IndicatorFilter,
    },
    errors::{Error, Result},
    types::IndicatorId,
};

#[utoipa::path(
    get,
    path = "/public/api/v1/categories",
    tag = "public",
    summary = "List all categories",
    responses((status = 200, description = "All categories with indicator counts", body = Vec<CategoryResponse>))
)]
#[tracing::instrument(skip_all)]
pub async fn list_categories(State(state): State<AppState>) -> Result<Json<Vec<CategoryResponse>>> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Indicators::new(&mut pool_conn);
    let counts = repo.count_by_category(&Category::ALL).await?;

    let response = Category::ALL
        .iter()
        .map(|&category| CategoryResponse {
            category,
            indicator_count: counts.iter().find(|(c, _)| *c == category).map(|(_, n)| *n).unwrap_or(0),
        })
        .collect();

    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/public/api/v1/indicators",
    tag = "public",
    summary = "List indicators",
    responses((status = 200, description = "Indicator catalog", body = Vec<IndicatorResponse>)),
    params(ListIndicatorsQuery)
)]
#[tracing::instrument(skip_all)]
pub async fn list_indicators(
    State(state): State<AppState>,
    Query(query): Query<ListIndicatorsQuery>,
) -> Result<Json<Vec<IndicatorResponse>>> {
    // Indicator metadata is public; the category parameter is a plain
    // filter here, not an access decision.
    let categories = match query.category {
        Some(category) => vec![category],
        None => Category::ALL.to_vec(),
    };

    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Indicators::new(&mut pool_conn);

    let (skip, limit) = query.pagination.params();
    let indicators = repo
        .list(&IndicatorFilter::new(categories, skip, limit).with_search(query.search))
        .await?;

    Ok(Json(indicators.into_iter().map(IndicatorResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/public/api/v1/indicators/{id}",
    tag = "public",
    summary = "Get indicator",
    responses(
        (status = 200, description = "Indicator details", body = IndicatorResponse),
        (status = 404, description = "Indicator not found"),
    ),
    params(("id" = uuid::Uuid, Path, description = "Indicator ID"))
)]
#[tracing::instrument(skip_all)]
pub async fn get_indicator(State(state): State<AppState>, Path(id): Path<IndicatorId>) -> Result<Json<IndicatorResponse>> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Indicators::new(&mut pool_conn);

    match repo.get_by_id(id).await? {
        Some(indicator) => Ok(Json(IndicatorResponse::from(indicator))),
        None => Err(Error::NotFound {
            resource: "Indicator".to_string(),
            id: id.to_string(),
        }),
    }
}

/// Final data only. A `status` query parameter is accepted for URL
/// compatibility with the admin surface but never honored: draft and
/// preliminary rows do not exist to anonymous callers.
#[utoipa::path(
    get,
    path = "/public/api/v1/indicators/{id}/data",
    tag = "public",
    summary = "List published data points",
    responses(
        (status = 200, description = "Final data points for the indicator", body = Vec<DataPointResponse>),
        (status = 404, description = "Indicator not found"),
    ),
    params(
        ("id" = uuid::Uuid, Path, description = "Indicator ID"),
        ListDataPointsQuery,
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_indicator_data(
    State(state): State<AppState>,
    Path(id): Path<IndicatorId>,
    Query(query): Query<ListDataPointsQuery>,
) -> Result<Json<Vec<DataPointResponse>>> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    {
        let mut repo = Indicators::new(&mut pool_conn);
        repo.get_by_id(id).await?.ok_or_else(|| Error::NotFound {
            resource: "Indicator".to_string(),
            id: id.to_string(),
        })?;
    }

    let (skip, limit) = query.pagination.params();
    let mut repo = DataPoints::new(&mut pool_conn);
    let data_points = repo
        .list(&DataPointFilter::new(id, skip, limit).with_status(Some(DataStatus::Final)))
        .await?;

    Ok(Json(data_points.into_iter().map(DataPointResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/public/api/v1/articles",
    tag = "public",
    summary = "List published articles",
    responses((status = 200, description = "Published articles", body = Vec<ArticleResponse>)),
    params(ListArticlesQuery)
)]
#[tracing::instrument(skip_all)]
pub async fn list_articles(
    State(state): State<AppState>,
    Query(query): Query<ListArticlesQuery>,
) -> Result<Json<Vec<ArticleResponse>>> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Articles::new(&mut pool_conn);

    let (skip, limit) = query.pagination.params();
    let articles = repo.list(&ArticleFilter::new(skip, limit).published_only()).await?;

    Ok(Json(articles.into_iter().map(ArticleResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/public/api/v1/articles/{slug}",
    tag = "public",
    summary = "Get published article by slug",
    responses(
        (status = 200, description = "Article details", body = ArticleResponse),
        (status = 404, description = "No published article with this slug"),
    ),
    params(("slug" = String, Path, description = "Article slug"))
)]
#[tracing::instrument(skip_all)]
pub async fn get_article(State(state): State<AppState>, Path(slug): Path<String>) -> Result<Json<ArticleResponse>> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Articles::new(&mut pool_conn);

    match repo.get_published_by_slug(&slug).await? {
        Some(article) => Ok(Json(ArticleResponse::from(article))),
        None => Err(Error::NotFound {
            resource: "Article".to_string(),
            id: slug,
        }),
    }
}

#[utoipa::path(
    get,
    path = "/public/api/v1/faqs",
    tag = "public",
    summary = "List published FAQ entries",
    responses((status = 200, description = "Published FAQ entries", body = Vec<FaqResponse>)),
    params(ListFaqsQuery)
)]
#[tracing::instrument(skip_all)]
pub async fn list_faqs(State(state): State<AppState>, Query(query): Query<ListFaqsQuery>) -> Result<Json<Vec<FaqResponse>>> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Faqs::new(&mut pool_conn);

    // The status parameter is ignored: only published entries are served
    let (skip, limit) = query.pagination.params();
    let faqs = repo.list(&FaqFilter::new(skip, limit).with_status(Some(FaqStatus::Published))).await?;

    Ok(Json(faqs.into_iter().map(FaqResponse::from).collect()))
}
