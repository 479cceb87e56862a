use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::json;

use crate::{
    AppState,
    api::models::articles::{ArticleCreate, ArticleResponse, ArticleUpdate, ListArticlesQuery, slugify},
    auth::permissions::{RequiresPermission, operation, resource},
    db::{
        handlers::{Articles, Repository, articles::ArticleFilter},
        models::{
            activity_log::ActivityCreateDBRequest,
            articles::{ArticleCreateDBRequest, ArticleUpdateDBRequest},
        },
    },
    errors::{Error, Result},
    types::ArticleId,
};

#[utoipa::path(
    get,
    path = "/articles",
    tag = "articles",
    summary = "List articles",
    responses(
        (status = 200, description = "All articles, drafts included", body = Vec<ArticleResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
    ),
    params(ListArticlesQuery),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn list_articles(
    State(state): State<AppState>,
    Query(query): Query<ListArticlesQuery>,
    _: RequiresPermission<resource::Articles, operation::Read>,
) -> Result<Json<Vec<ArticleResponse>>> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Articles::new(&mut pool_conn);

    let (skip, limit) = query.pagination.params();
    let articles = repo.list(&ArticleFilter::new(skip, limit)).await?;

    Ok(Json(articles.into_iter().map(ArticleResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/articles",
    tag = "articles",
    summary = "Create article",
    request_body = ArticleCreate,
    responses(
        (status = 201, description = "Article created successfully", body = ArticleResponse),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 409, description = "Slug already in use"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn create_article(
    State(state): State<AppState>,
    current_user: RequiresPermission<resource::Articles, operation::Create>,
    Json(create): Json<ArticleCreate>,
) -> Result<(StatusCode, Json<ArticleResponse>)> {
    if create.title.trim().is_empty() {
        return Err(Error::BadRequest {
            message: "title is required".to_string(),
        });
    }
    if create.body.trim().is_empty() {
        return Err(Error::BadRequest {
            message: "body is required".to_string(),
        });
    }

    let slug = match create.slug {
        Some(slug) if !slug.trim().is_empty() => slug,
        _ => slugify(&create.title),
    };
    if slug.is_empty() {
        return Err(Error::BadRequest {
            message: "could not derive a slug from the title; provide one explicitly".to_string(),
        });
    }

    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;
    let article;
    {
        let mut repo = Articles::new(&mut tx);
        article = repo
            .create(&ArticleCreateDBRequest {
                title: create.title,
                slug,
                body: create.body,
                excerpt: create.excerpt,
                author_id: current_user.id,
            })
            .await?;
    }
    super::record_activity(
        &mut tx,
        ActivityCreateDBRequest::new(current_user.id, "create", "article", Some(article.id)).with_detail(json!({"slug": article.slug})),
    )
    .await;
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok((StatusCode::CREATED, Json(ArticleResponse::from(article))))
}

#[utoipa::path(
    get,
    path = "/articles/{id}",
    tag = "articles",
    summary = "Get article",
    responses(
        (status = 200, description = "Article details", body = ArticleResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Article not found"),
    ),
    params(("id" = uuid::Uuid, Path, description = "Article ID")),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn get_article(
    State(state): State<AppState>,
    Path(id): Path<ArticleId>,
    _: RequiresPermission<resource::Articles, operation::Read>,
) -> Result<Json<ArticleResponse>> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Articles::new(&mut pool_conn);

    match repo.get_by_id(id).await? {
        Some(article) => Ok(Json(ArticleResponse::from(article))),
        None => Err(Error::NotFound {
            resource: "Article".to_string(),
            id: id.to_string(),
        }),
    }
}

#[utoipa::path(
    patch,
    path = "/articles/{id}",
    tag = "articles",
    summary = "Update article",
    request_body = ArticleUpdate,
    responses(
        (status = 200, description = "Article updated successfully", body = ArticleResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Article not found"),
    ),
    params(("id" = uuid::Uuid, Path, description = "Article ID")),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn update_article(
    State(state): State<AppState>,
    Path(id): Path<ArticleId>,
    current_user: RequiresPermission<resource::Articles, operation::Update>,
    Json(update): Json<ArticleUpdate>,
) -> Result<Json<ArticleResponse>> {
    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;
    let article;
    {
        let mut repo = Articles::new(&mut tx);
        article = repo
            .update(
                id,
                &ArticleUpdateDBRequest {
                    title: update.title,
                    slug: update.slug,
                    body: update.body,
                    excerpt: update.excerpt,
                },
            )
            .await?;
    }
    super::record_activity(&mut tx, ActivityCreateDBRequest::new(current_user.id, "update", "article", Some(id))).await;
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok(Json(ArticleResponse::from(article)))
}

/// Publish an article, making it visible on the public surface.
#[utoipa::path(
    post,
    path = "/articles/{id}/publish",
    tag = "articles",
    summary = "Publish article",
    responses(
        (status = 200, description = "Article published", body = ArticleResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Article not found"),
    ),
    params(("id" = uuid::Uuid, Path, description = "Article ID")),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn publish_article(
    State(state): State<AppState>,
    Path(id): Path<ArticleId>,
    current_user: RequiresPermission<resource::Articles, operation::Update>,
) -> Result<Json<ArticleResponse>> {
    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;
    let article;
    {
        let mut repo = Articles::new(&mut tx);
        article = repo.publish(id).await?;
    }
    super::record_activity(
        &mut tx,
        ActivityCreateDBRequest::new(current_user.id, "publish", "article", Some(id)).with_detail(json!({"slug": article.slug})),
    )
    .await;
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok(Json(ArticleResponse::from(article)))
}

#[utoipa::path(
    delete,
    path = "/articles/{id}",
    tag = "articles",
    summary = "Delete article",
    responses(
        (status = 204, description = "Article deleted successfully"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Article not found"),
    ),
    params(("id" = uuid::Uuid, Path, description = "Article ID")),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn delete_article(
    State(state): State<AppState>,
    Path(id): Path<ArticleId>,
    current_user: RequiresPermission<resource::Articles, operation::Delete>,
) -> Result<StatusCode> {
    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;
    let deleted;
    {
        let mut repo = Articles::new(&mut tx);
        deleted = repo.delete(id).await?;
    }
    if !deleted {
        return Err(Error::NotFound {
            resource: "Article".to_string(),
            id: id.to_string(),
        });
    }
    super::record_activity(&mut tx, ActivityCreateDBRequest::new(current_user.id, "delete", "article", Some(id))).await;
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok(StatusCode::NO_CONTENT)
}
