//! Database repository for FAQ entries.

use crate::api::models::faqs::FaqStatus;
use crate::db::{
    errors::{DbError, Result},
    handlers::repository::Repository,
    models::faqs::{FaqCreateDBRequest, FaqDBResponse, FaqUpdateDBRequest},
};
use crate::types::{FaqId, abbrev_uuid};
use sqlx::PgConnection;
use tracing::instrument;
use uuid::Uuid;

/// Filter for listing FAQ entries.
#[derive(Debug, Clone)]
pub struct FaqFilter {
    pub status: Option<FaqStatus>,
    pub skip: i64,
    pub limit: i64,
}

impl FaqFilter {
    pub fn new(skip: i64, limit: i64) -> Self {
        Self {
            status: None,
            skip,
            limit,
        }
    }

    pub fn with_status(mut self, status: Option<FaqStatus>) -> Self {
        self.status = status;
        self
    }
}

pub struct Faqs<'c> {
    db: &'c mut PgConnection,
}

#[async_trait::async_trait]
impl<'c> Repository for Faqs<'c> {
    type CreateRequest = FaqCreateDBRequest;
    type UpdateRequest = FaqUpdateDBRequest;
    type Response = FaqDBResponse;
    type Id = FaqId;
    type Filter = FaqFilter;

    #[instrument(skip(self, request), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let faq = sqlx::query_as::<_, FaqDBResponse>(
            r#"
            INSERT INTO faqs (id, question, answer, status, submitted_by_email, answered_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&request.question)
        .bind(&request.answer)
        .bind(request.status)
        .bind(&request.submitted_by_email)
        .bind(request.answered_by)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(faq)
    }

    #[instrument(skip(self), fields(faq_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let faq = sqlx::query_as::<_, FaqDBResponse>("SELECT * FROM faqs WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(faq)
    }

    #[instrument(skip(self, filter), fields(limit = filter.limit, skip = filter.skip), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let faqs = sqlx::query_as::<_, FaqDBResponse>(
            r#"
            SELECT * FROM faqs
            WHERE ($1::faq_status IS NULL OR status = $1)
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(filter.status)
        .bind(filter.limit)
        .bind(filter.skip)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(faqs)
    }

    #[instrument(skip(self), fields(faq_id = %abbrev_uuid(&id)), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM faqs WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, request), fields(faq_id = %abbrev_uuid(&id)), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let faq = sqlx::query_as::<_, FaqDBResponse>(
            r#"
            UPDATE faqs SET
                question = COALESCE($2, question),
                answer = COALESCE($3, answer),
                status = COALESCE($4, status),
                answered_by = COALESCE($5, answered_by),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&request.question)
        .bind(&request.answer)
        .bind(request.status)
        .bind(request.answered_by)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(faq)
    }
}

impl<'c> Faqs<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }
}

#[cfg(test)]
mod tests {
    use super::super::repository::Repository;
    use super::*;
    use crate::api::models::users::Role;
    use crate::db::handlers::Users;
    use crate::db::models::users::UserCreateDBRequest;
    use sqlx::PgPool;

    fn create_request(question: &str) -> FaqCreateDBRequest {
        FaqCreateDBRequest {
            question: question.to_string(),
            answer: None,
            status: FaqStatus::Pending,
            submitted_by_email: Some("warga@example.com".to_string()),
            answered_by: None,
        }
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_pending_faq(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Faqs::new(&mut conn);

        let faq = repo.create(&create_request("Bagaimana cara mengakses data?")).await.unwrap();
        assert_eq!(faq.status, FaqStatus::Pending);
        assert!(faq.answer.is_none());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_answer_then_publish(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut users = Users::new(&mut conn);
        let admin = users
            .create(&UserCreateDBRequest {
                email: "faq-admin@example.com".to_string(),
                full_name: None,
                role: Role::AdminLingkungan,
                password_hash: None,
                is_active: true,
            })
            .await
            .unwrap();

        let mut repo = Faqs::new(&mut conn);
        let faq = repo.create(&create_request("Apa sumber data emisi?")).await.unwrap();

        let answered = repo
            .update(
                faq.id,
                &FaqUpdateDBRequest {
                    answer: Some("Inventarisasi gas rumah kaca tahunan.".to_string()),
                    status: Some(FaqStatus::Answered),
                    answered_by: Some(admin.id),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(answered.status, FaqStatus::Answered);
        assert_eq!(answered.answered_by, Some(admin.id));

        let published = repo
            .update(
                faq.id,
                &FaqUpdateDBRequest {
                    status: Some(FaqStatus::Published),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(published.status, FaqStatus::Published);
        // Answer survives the status-only update
        assert!(published.answer.is_some());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_status_filter(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Faqs::new(&mut conn);

        repo.create(&create_request("Pertanyaan pertama?")).await.unwrap();
        let second = repo.create(&create_request("Pertanyaan kedua?")).await.unwrap();
        repo.update(
            second.id,
            &FaqUpdateDBRequest {
                status: Some(FaqStatus::Published),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let pending = repo
            .list(&FaqFilter::new(0, 100).with_status(Some(FaqStatus::Pending)))
            .await
            .unwrap();
        assert_eq!(pending.len(), 1);

        let published = repo
            .list(&FaqFilter::new(0, 100).with_status(Some(FaqStatus::Published)))
            .await
            .unwrap();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].question, "Pertanyaan kedua?");
    }
}
