//! Database models for articles.

use crate::types::{ArticleId, UserId};
use chrono::{DateTime, Utc};

/// Database request for creating an article
#[derive(Debug, Clone)]
pub struct ArticleCreateDBRequest {
    pub title: String,
    pub slug: String,
    pub body: String,
    pub excerpt: Option<String>,
    pub author_id: UserId,
}

/// Database request for updating an article
#[derive(Debug, Clone, Default)]
pub struct ArticleUpdateDBRequest {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub body: Option<String>,
    pub excerpt: Option<String>,
}

/// Database response for an article
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ArticleDBResponse {
    pub id: ArticleId,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub excerpt: Option<String>,
    pub is_published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub author_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
