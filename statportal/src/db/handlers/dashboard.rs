//! Aggregate queries behind the admin dashboard.
//!
//! All category-scoped aggregates take the caller's visible-category slice;
//! the repository never widens it.

use crate::api::models::categories::Category;
use crate::db::errors::Result;
use sqlx::PgConnection;
use tracing::instrument;

/// Per-category aggregate row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CategoryCounts {
    pub category: Category,
    pub indicator_count: i64,
    pub data_point_count: i64,
    pub unverified_count: i64,
}

/// Editorial totals (not category-scoped).
#[derive(Debug, Clone, Default, sqlx::FromRow)]
pub struct ContentCounts {
    pub article_count: i64,
    pub published_article_count: i64,
    pub faq_count: i64,
    pub pending_faq_count: i64,
}

pub struct Dashboard<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Dashboard<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Indicator / data-point / unverified counts for each visible category.
    /// Categories without any indicators still appear, zeroed.
    #[instrument(skip(self, categories), fields(count = categories.len()), err)]
    pub async fn category_counts(&mut self, categories: &[Category]) -> Result<Vec<CategoryCounts>> {
        let rows = sqlx::query_as::<_, CategoryCounts>(
            r#"
            SELECT
                c.category,
                COUNT(DISTINCT i.id) AS indicator_count,
                COUNT(d.id) AS data_point_count,
                COUNT(d.id) FILTER (WHERE d.status <> 'final') AS unverified_count
            FROM UNNEST($1::stat_category[]) AS c(category)
            LEFT JOIN indicators i ON i.category = c.category
            LEFT JOIN indicator_data d ON d.indicator_id = i.id
            GROUP BY c.category
            ORDER BY c.category
            "#,
        )
        .bind(categories)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(rows)
    }

    /// Article and FAQ totals.
    #[instrument(skip(self), err)]
    pub async fn content_counts(&mut self) -> Result<ContentCounts> {
        let counts = sqlx::query_as::<_, ContentCounts>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM articles) AS article_count,
                (SELECT COUNT(*) FROM articles WHERE is_published) AS published_article_count,
                (SELECT COUNT(*) FROM faqs) AS faq_count,
                (SELECT COUNT(*) FROM faqs WHERE status = 'pending') AS pending_faq_count
            "#,
        )
        .fetch_one(&mut *self.db)
        .await?;

        Ok(counts)
    }
}
