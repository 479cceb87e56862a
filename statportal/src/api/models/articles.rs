//! API request/response models for articles.

use super::pagination::Pagination;
use crate::db::models::articles::ArticleDBResponse;
use crate::types::ArticleId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ArticleCreate {
    pub title: String,
    /// URL slug; derived from the title when omitted
    pub slug: Option<String>,
    pub body: String,
    pub excerpt: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ArticleUpdate {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub body: Option<String>,
    pub excerpt: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ArticleResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: ArticleId,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub excerpt: Option<String>,
    pub is_published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Query parameters for listing articles
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ListArticlesQuery {
    /// Pagination parameters
    #[serde(flatten)]
    #[param(inline)]
    pub pagination: Pagination,
}

/// Derive a URL slug from a title: lowercase, alphanumerics kept, runs of
/// anything else collapsed to single dashes.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_dash = true; // suppress leading dash
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

impl From<ArticleDBResponse> for ArticleResponse {
    fn from(db: ArticleDBResponse) -> Self {
        Self {
            id: db.id,
            title: db.title,
            slug: db.slug,
            body: db.body,
            excerpt: db.excerpt,
            is_published: db.is_published,
            published_at: db.published_at,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Rilis Berita Resmi Statistik 2024"), "rilis-berita-resmi-statistik-2024");
        assert_eq!(slugify("  Inflasi & PDRB  "), "inflasi-pdrb");
        assert_eq!(slugify("---"), "");
        assert_eq!(slugify("Ekonomi"), "ekonomi");
    }
}
