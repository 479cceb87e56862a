//! Database repository for statistical indicators.

use crate::api::models::categories::Category;
use crate::db::{
    errors::{DbError, Result},
    handlers::repository::Repository,
    models::indicators::{IndicatorCreateDBRequest, IndicatorDBResponse, IndicatorUpdateDBRequest},
};
use crate::types::{IndicatorId, abbrev_uuid};
use sqlx::PgConnection;
use tracing::instrument;
use uuid::Uuid;

/// Filter for listing indicators.
///
/// `categories` is always the already-authorized set computed by
/// [`crate::auth::policy::visible_categories`] — an empty slice yields an
/// empty result, never a full scan.
#[derive(Debug, Clone)]
pub struct IndicatorFilter {
    pub categories: Vec<Category>,
    pub skip: i64,
    pub limit: i64,
    pub search: Option<String>,
}

impl IndicatorFilter {
    pub fn new(categories: Vec<Category>, skip: i64, limit: i64) -> Self {
        Self {
            categories,
            skip,
            limit,
            search: None,
        }
    }

    pub fn with_search(mut self, search: Option<String>) -> Self {
        self.search = search;
        self
    }
}

pub struct Indicators<'c> {
    db: &'c mut PgConnection,
}

#[async_trait::async_trait]
impl<'c> Repository for Indicators<'c> {
    type CreateRequest = IndicatorCreateDBRequest;
    type UpdateRequest = IndicatorUpdateDBRequest;
    type Response = IndicatorDBResponse;
    type Id = IndicatorId;
    type Filter = IndicatorFilter;

    #[instrument(skip(self, request), fields(name = %request.name, category = %request.category), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let indicator = sqlx::query_as::<_, IndicatorDBResponse>(
            r#"
            INSERT INTO indicators (id, name, description, category, unit, source, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&request.name)
        .bind(&request.description)
        .bind(request.category)
        .bind(&request.unit)
        .bind(&request.source)
        .bind(request.created_by)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(indicator)
    }

    #[instrument(skip(self), fields(indicator_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let indicator = sqlx::query_as::<_, IndicatorDBResponse>("SELECT * FROM indicators WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(indicator)
    }

    #[instrument(skip(self, filter), fields(limit = filter.limit, skip = filter.skip), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let indicators = sqlx::query_as::<_, IndicatorDBResponse>(
            r#"
            SELECT * FROM indicators
            WHERE category = ANY($1)
              AND ($4::text IS NULL OR name ILIKE '%' || $4 || '%')
            ORDER BY name ASC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(&filter.categories)
        .bind(filter.limit)
        .bind(filter.skip)
        .bind(&filter.search)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(indicators)
    }

    #[instrument(skip(self), fields(indicator_id = %abbrev_uuid(&id)), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM indicators WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, request), fields(indicator_id = %abbrev_uuid(&id)), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let indicator = sqlx::query_as::<_, IndicatorDBResponse>(
            r#"
            UPDATE indicators SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                category = COALESCE($4, category),
                unit = COALESCE($5, unit),
                source = COALESCE($6, source),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&request.name)
        .bind(&request.description)
        .bind(request.category)
        .bind(&request.unit)
        .bind(&request.source)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(indicator)
    }
}

impl<'c> Indicators<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Indicator counts per category, for the category listing and dashboard.
    #[instrument(skip(self, categories), fields(count = categories.len()), err)]
    pub async fn count_by_category(&mut self, categories: &[Category]) -> Result<Vec<(Category, i64)>> {
        let rows = sqlx::query_as::<_, (Category, i64)>(
            r#"
            SELECT category, COUNT(*) FROM indicators
            WHERE category = ANY($1)
            GROUP BY category
            "#,
        )
        .bind(categories)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(rows)
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

    async fn seed_user(pool: &PgPool) -> uuid::Uuid {
        let mut conn = pool.acquire().await.unwrap();
        let mut users = Users::new(&mut conn);
        users
            .create(&UserCreateDBRequest {
                email: format!("seed_{}@example.com", Uuid::new_v4().simple()),
                full_name: None,
                role: Role::Superadmin,
                password_hash: None,
                is_active: true,
            })
            .await
            .unwrap()
            .id
    }

    fn create_request(name: &str, category: Category, created_by: uuid::Uuid) -> IndicatorCreateDBRequest {
        IndicatorCreateDBRequest {
            name: name.to_string(),
            description: Some("A test indicator".to_string()),
            category,
            unit: Some("persen".to_string()),
            source: Some("Survei Sosial Ekonomi".to_string()),
            created_by,
        }
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_and_get_indicator(pool: PgPool) {
        let user_id = seed_user(&pool).await;
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Indicators::new(&mut conn);

        let created = repo
            .create(&create_request("Laju Inflasi", Category::Ekonomi, user_id))
            .await
            .unwrap();
        assert_eq!(created.category, Category::Ekonomi);
        assert_eq!(created.unit, Some("persen".to_string()));

        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Laju Inflasi");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_list_filters_by_category_set(pool: PgPool) {
        let user_id = seed_user(&pool).await;
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Indicators::new(&mut conn);

        repo.create(&create_request("Laju Inflasi", Category::Ekonomi, user_id)).await.unwrap();
        repo.create(&create_request("Angka Harapan Hidup", Category::DemografiSosial, user_id))
            .await
            .unwrap();

        // Single-category filter sees only its own rows
        let ekonomi_only = repo
            .list(&IndicatorFilter::new(vec![Category::Ekonomi], 0, 100))
            .await
            .unwrap();
        assert_eq!(ekonomi_only.len(), 1);
        assert_eq!(ekonomi_only[0].category, Category::Ekonomi);

        // The empty set yields nothing, never everything
        let none = repo.list(&IndicatorFilter::new(vec![], 0, 100)).await.unwrap();
        assert!(none.is_empty());

        // All categories
        let all = repo.list(&IndicatorFilter::new(Category::ALL.to_vec(), 0, 100)).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_update_recategorizes(pool: PgPool) {
        let user_id = seed_user(&pool).await;
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Indicators::new(&mut conn);

        let indicator = repo
            .create(&create_request("Produksi Padi", Category::Ekonomi, user_id))
            .await
            .unwrap();

        let updated = repo
            .update(
                indicator.id,
                &IndicatorUpdateDBRequest {
                    category: Some(Category::LingkunganMultiDomain),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.category, Category::LingkunganMultiDomain);
        assert_eq!(updated.name, "Produksi Padi");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_count_by_category(pool: PgPool) {
        let user_id = seed_user(&pool).await;
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Indicators::new(&mut conn);

        repo.create(&create_request("A", Category::Ekonomi, user_id)).await.unwrap();
        repo.create(&create_request("B", Category::Ekonomi, user_id)).await.unwrap();
        repo.create(&create_request("C", Category::DemografiSosial, user_id)).await.unwrap();

        let counts = repo.count_by_category(&Category::ALL).await.unwrap();
        let ekonomi = counts.iter().find(|(c, _)| *c == Category::Ekonomi).unwrap();
        assert_eq!(ekonomi.1, 2);

        // Scoped count only covers the requested categories
        let scoped = repo.count_by_category(&[Category::DemografiSosial]).await.unwrap();
        assert_eq!(scoped.len(), 1);
        assert_eq!(scoped[0].1, 1);
    }
}
