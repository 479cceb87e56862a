//! Database repository for articles.

use crate::db::{
    errors::{DbError, Result},
    handlers::repository::Repository,
    models::articles::{ArticleCreateDBRequest, ArticleDBResponse, ArticleUpdateDBRequest},
};
use crate::types::{ArticleId, abbrev_uuid};
use sqlx::PgConnection;
use tracing::instrument;
use uuid::Uuid;

/// Filter for listing articles.
#[derive(Debug, Clone)]
pub struct ArticleFilter {
    /// Restrict to published rows only (the public surface hardcodes true)
    pub published_only: bool,
    pub skip: i64,
    pub limit: i64,
}

impl ArticleFilter {
    pub fn new(skip: i64, limit: i64) -> Self {
        Self {
            published_only: false,
            skip,
            limit,
        }
    }

    pub fn published_only(mut self) -> Self {
        self.published_only = true;
        self
    }
}

pub struct Articles<'c> {
    db: &'c mut PgConnection,
}

#[async_trait::async_trait]
impl<'c> Repository for Articles<'c> {
    type CreateRequest = ArticleCreateDBRequest;
    type UpdateRequest = ArticleUpdateDBRequest;
    type Response = ArticleDBResponse;
    type Id = ArticleId;
    type Filter = ArticleFilter;

    #[instrument(skip(self, request), fields(slug = %request.slug), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let article = sqlx::query_as::<_, ArticleDBResponse>(
            r#"
            INSERT INTO articles (id, title, slug, body, excerpt, author_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&request.title)
        .bind(&request.slug)
        .bind(&request.body)
        .bind(&request.excerpt)
        .bind(request.author_id)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(article)
    }

    #[instrument(skip(self), fields(article_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let article = sqlx::query_as::<_, ArticleDBResponse>("SELECT * FROM articles WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(article)
    }

    #[instrument(skip(self, filter), fields(limit = filter.limit, skip = filter.skip), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let articles = sqlx::query_as::<_, ArticleDBResponse>(
            r#"
            SELECT * FROM articles
            WHERE (NOT $1 OR is_published)
            ORDER BY COALESCE(published_at, created_at) DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(filter.published_only)
        .bind(filter.limit)
        .bind(filter.skip)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(articles)
    }

    #[instrument(skip(self), fields(article_id = %abbrev_uuid(&id)), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, request), fields(article_id = %abbrev_uuid(&id)), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let article = sqlx::query_as::<_, ArticleDBResponse>(
            r#"
            UPDATE articles SET
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                body = COALESCE($4, body),
                excerpt = COALESCE($5, excerpt),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&request.title)
        .bind(&request.slug)
        .bind(&request.body)
        .bind(&request.excerpt)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(article)
    }
}

impl<'c> Articles<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Public lookup by slug. Only published rows are reachable this way.
    #[instrument(skip(self, slug), err)]
    pub async fn get_published_by_slug(&mut self, slug: &str) -> Result<Option<ArticleDBResponse>> {
        let article = sqlx::query_as::<_, ArticleDBResponse>("SELECT * FROM articles WHERE slug = $1 AND is_published")
            .bind(slug)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(article)
    }

    /// Mark an article published, stamping `published_at` on the first
    /// publication only.
    #[instrument(skip(self), fields(article_id = %abbrev_uuid(&id)), err)]
    pub async fn publish(&mut self, id: ArticleId) -> Result<ArticleDBResponse> {
        let article = sqlx::query_as::<_, ArticleDBResponse>(
            r#"
            UPDATE articles SET
                is_published = TRUE,
                published_at = COALESCE(published_at, NOW()),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(article)
    }
}
