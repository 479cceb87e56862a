//! # statportal: Statistics Publication & Administration Platform
//!
//! `statportal` is the backend for a statistics-publication portal: staff
//! manage categorized socio-economic indicators, their time-series data
//! points, articles and FAQ entries through an authenticated admin API,
//! while the public reads the published subset through an unauthenticated
//! read-only API.
//!
//! ## Overview
//!
//! Every indicator belongs to exactly one of three fixed statistical
//! categories (Demografi & Sosial, Ekonomi, Lingkungan Hidup &
//! Multi-Domain). Staff accounts carry one role: `superadmin` manages the
//! whole platform, the three `admin_*` roles each curate a single category,
//! and `viewer` accounts have no admin access at all. The role→category
//! mapping is defined exactly once, in [`auth::policy`], and every
//! category-scoped read or write consults it — the one cross-cutting
//! invariant in the system.
//!
//! ### Request Flow
//!
//! A request to the admin API carries `Authorization: Bearer <token>`. The
//! [`auth::identity`] extractor verifies the token's signature and expiry,
//! then re-fetches the user row — an account that has been deactivated
//! loses access on its next request, which is the revocation mechanism for
//! the otherwise stateless tokens. Authorization is two-dimensional: the
//! action table (what may this role do to this resource) is enforced by the
//! typed [`auth::permissions::RequiresPermission`] extractor in handler
//! signatures, and category scoping is checked per-row against the policy,
//! on the existing row and — for re-categorizations — on the target
//! category as well.
//!
//! Mutations and their audit-log entry share one transaction; public
//! endpoints skip authentication entirely and hardcode the
//! published/final predicate into their queries.
//!
//! ## Architecture
//!
//! Built on [Axum](https://github.com/tokio-rs/axum) for the HTTP layer
//! with PostgreSQL (via SQLx) for all persistence. The **API layer**
//! ([`api`]) holds the route handlers and wire models; the **auth layer**
//! ([`auth`]) holds password hashing, token issuance/verification and the
//! access policy; the **database layer** ([`db`]) uses the repository
//! pattern, one repository per table.
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use statportal::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = statportal::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     statportal::telemetry::init_telemetry()?;
//!
//!     let app = Application::new(config).await?;
//!     app.serve(async {
//!         tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
//!     })
//!     .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! See the [`config`] module for configuration options.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
pub mod openapi;
pub mod telemetry;
pub mod types;

#[cfg(test)]
pub mod test_utils;

use crate::{
    api::handlers,
    api::models::users::Role,
    auth::password,
    config::CorsOrigin,
    db::handlers::{Repository, Users},
    db::models::users::{UserCreateDBRequest, UserUpdateDBRequest},
    openapi::ApiDoc,
};
use axum::{
    Router,
    http::HeaderValue,
    routing::{delete, get, patch, post},
};
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, instrument, Level};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

pub use config::Config;
pub use types::{ArticleId, DataPointId, FaqId, IndicatorId, UserId};

/// Application state shared across all request handlers.
///
/// Holds the two process-wide values: the connection pool and the immutable
/// configuration (which carries the token signing secret — loaded once at
/// startup, read-only for the process lifetime).
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
}

/// Get the statportal database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// Create the initial superadmin user if it doesn't exist.
///
/// Idempotent: creates the account on first startup, or refreshes the
/// password of the existing account when one is configured. This guarantees
/// a deployment always has a working superadmin.
#[instrument(skip_all)]
pub async fn create_initial_superadmin(config: &Config, db: &PgPool) -> Result<UserId, errors::Error> {
    let password_hash = match config.admin_password.as_deref() {
        Some(pwd) => {
            let params = password::Argon2Params::from(&config.auth.password);
            Some(password::hash_string_with_params(pwd, Some(params))?)
        }
        None => None,
    };

    let mut tx = db.begin().await.map_err(|e| errors::Error::Database(e.into()))?;
    let mut user_repo = Users::new(&mut tx);

    if let Some(existing) = user_repo.get_user_by_email(&config.admin_email).await? {
        if password_hash.is_some() {
            user_repo
                .update(
                    existing.id,
                    &UserUpdateDBRequest {
                        password_hash,
                        ..Default::default()
                    },
                )
                .await?;
        }
        tx.commit().await.map_err(|e| errors::Error::Database(e.into()))?;
        return Ok(existing.id);
    }

    let created = user_repo
        .create(&UserCreateDBRequest {
            email: config.admin_email.clone(),
            full_name: Some("Superadmin".to_string()),
            role: Role::Superadmin,
            password_hash,
            is_active: true,
        })
        .await?;

    tx.commit().await.map_err(|e| errors::Error::Database(e.into()))?;
    info!("Created initial superadmin user {}", config.admin_email);
    Ok(created.id)
}

/// Create CORS layer from configuration
fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let mut origins = Vec::new();
    for origin in &config.auth.security.cors.allowed_origins {
        let header_value = match origin {
            CorsOrigin::Wildcard => "*".parse::<HeaderValue>()?,
            CorsOrigin::Url(url) => url.as_str().trim_end_matches('/').parse::<HeaderValue>()?,
        };
        origins.push(header_value);
    }

    let mut cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(config.auth.security.cors.allow_credentials)
        .allow_headers([axum::http::header::AUTHORIZATION, axum::http::header::CONTENT_TYPE])
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PATCH,
            axum::http::Method::DELETE,
        ]);

    if let Some(max_age) = config.auth.security.cors.max_age {
        cors = cors.max_age(std::time::Duration::from_secs(max_age));
    }

    Ok(cors)
}

/// Build the application router with all endpoints and middleware.
///
/// Three surfaces:
/// - `/authentication/*` — login, logout, password change
/// - `/admin/api/v1/*` — bearer-authenticated management API
/// - `/public/api/v1/*` — unauthenticated, published data only
#[instrument(skip_all)]
pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    let auth_routes = Router::new()
        .route("/authentication/login", post(handlers::auth::login))
        .route("/authentication/logout", post(handlers::auth::logout))
        .route("/authentication/password-change", post(handlers::auth::change_password))
        .with_state(state.clone());

    let api_routes = Router::new()
        .route("/me", get(handlers::users::me))
        // User management (superadmin)
        .route("/users", get(handlers::users::list_users))
        .route("/users", post(handlers::users::create_user))
        .route("/users/{id}", get(handlers::users::get_user))
        .route("/users/{id}", patch(handlers::users::update_user))
        .route("/users/{id}", delete(handlers::users::delete_user))
        // Categories visible to the caller
        .route("/categories", get(handlers::categories::list_categories))
        // Indicator catalog
        .route("/indicators", get(handlers::indicators::list_indicators))
        .route("/indicators", post(handlers::indicators::create_indicator))
        .route("/indicators/{id}", get(handlers::indicators::get_indicator))
        .route("/indicators/{id}", patch(handlers::indicators::update_indicator))
        .route("/indicators/{id}", delete(handlers::indicators::delete_indicator))
        .route("/indicators/{id}/export", get(handlers::indicators::export_indicator))
        // Time-series data per indicator
        .route("/indicators/{indicator_id}/data", get(handlers::data_points::list_data_points))
        .route("/indicators/{indicator_id}/data", post(handlers::data_points::create_data_point))
        .route(
            "/indicators/{indicator_id}/data/{data_id}",
            patch(handlers::data_points::update_data_point),
        )
        .route(
            "/indicators/{indicator_id}/data/{data_id}",
            delete(handlers::data_points::delete_data_point),
        )
        .route(
            "/indicators/{indicator_id}/data/{data_id}/verify",
            post(handlers::data_points::verify_data_point),
        )
        // Articles
        .route("/articles", get(handlers::articles::list_articles))
        .route("/articles", post(handlers::articles::create_article))
        .route("/articles/{id}", get(handlers::articles::get_article))
        .route("/articles/{id}", patch(handlers::articles::update_article))
        .route("/articles/{id}", delete(handlers::articles::delete_article))
        .route("/articles/{id}/publish", post(handlers::articles::publish_article))
        // FAQs
        .route("/faqs", get(handlers::faqs::list_faqs))
        .route("/faqs", post(handlers::faqs::create_faq))
        .route("/faqs/{id}", get(handlers::faqs::get_faq))
        .route("/faqs/{id}", patch(handlers::faqs::update_faq))
        .route("/faqs/{id}", delete(handlers::faqs::delete_faq))
        // Dashboard and audit trail
        .route("/dashboard", get(handlers::dashboard::get_dashboard))
        .route("/activity", get(handlers::activity::list_activity))
        .with_state(state.clone());

    let public_routes = Router::new()
        .route("/categories", get(handlers::public::list_categories))
        .route("/indicators", get(handlers::public::list_indicators))
        .route("/indicators/{id}", get(handlers::public::get_indicator))
        .route("/indicators/{id}/data", get(handlers::public::list_indicator_data))
        .route("/articles", get(handlers::public::list_articles))
        .route("/articles/{slug}", get(handlers::public::get_article))
        .route("/faqs", get(handlers::public::list_faqs))
        .with_state(state.clone());

    let router = Router::new()
        .route("/healthz", get(|| async { "OK" }))
        .merge(auth_routes)
        .nest("/admin/api/v1", api_routes)
        .nest("/public/api/v1", public_routes)
        .merge(Scalar::with_url("/admin/docs", ApiDoc::openapi()));

    let cors_layer = create_cors_layer(&state.config)?;
    let router = router.layer(cors_layer).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    );

    Ok(router)
}

/// Main application struct that owns all resources and lifecycle.
///
/// 1. **Create**: [`Application::new`] connects to the database, runs
///    migrations, seeds the superadmin, and builds the router
/// 2. **Serve**: [`Application::serve`] binds a TCP port and handles
///    requests until the shutdown future resolves
pub struct Application {
    router: Router,
    config: Config,
    pool: PgPool,
}

impl Application {
    /// Create a new application instance with all resources initialized
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        Self::new_with_pool(config, None).await
    }

    /// Create an application around an existing pool (used by tests, which
    /// bring their own per-test database).
    pub async fn new_with_pool(config: Config, pool: Option<PgPool>) -> anyhow::Result<Self> {
        let pool = match pool {
            Some(pool) => pool,
            None => {
                let settings = &config.database.pool;
                sqlx::postgres::PgPoolOptions::new()
                    .max_connections(settings.max_connections)
                    .min_connections(settings.min_connections)
                    .acquire_timeout(std::time::Duration::from_secs(settings.acquire_timeout_secs))
                    .connect(&config.database.url)
                    .await?
            }
        };

        migrator().run(&pool).await?;

        create_initial_superadmin(&config, &pool)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create initial superadmin: {e}"))?;

        let state = AppState {
            db: pool.clone(),
            config: config.clone(),
        };
        let router = build_router(state)?;

        Ok(Self { router, config, pool })
    }

    /// Convert application into a test server (for tests)
    #[cfg(test)]
    pub fn into_test_server(self) -> axum_test::TestServer {
        axum_test::TestServer::new(self.router).expect("Failed to create test server")
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!("statportal listening on http://{bind_addr}");

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Closing database connections...");
        self.pool.close().await;

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use crate::{
        api::models::{categories::Category, data_points::DataStatus, users::Role},
        db::{
            handlers::{DataPoints, Indicators, Repository as _},
            models::{data_points::DataPointCreateDBRequest, indicators::IndicatorCreateDBRequest},
        },
        test_utils::*,
    };
    use serde_json::json;
    use sqlx::PgPool;

    async fn seed_indicator(pool: &PgPool, category: Category) -> crate::db::models::indicators::IndicatorDBResponse {
        let superadmin = create_test_user(pool, Role::Superadmin).await;
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Indicators::new(&mut conn);
        repo.create(&IndicatorCreateDBRequest {
            name: "Laju Pertumbuhan PDRB".to_string(),
            description: None,
            category,
            unit: Some("persen".to_string()),
            source: None,
            created_by: superadmin.id,
        })
        .await
        .unwrap()
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_healthz(pool: PgPool) {
        let server = create_test_app(pool).await;
        let response = server.get("/healthz").await;
        response.assert_status_ok();
        assert_eq!(response.text(), "OK");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_login_success_returns_user_and_token(pool: PgPool) {
        let server = create_test_app(pool.clone()).await;
        let user = create_test_user_with_password(&pool, Role::AdminEkonomi, "correct horse battery").await;

        let response = server
            .post("/authentication/login")
            .json(&json!({"email": user.email, "password": "correct horse battery"}))
            .await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["user"]["email"], json!(user.email));
        assert_eq!(body["user"]["role"], json!("admin_ekonomi"));
        assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));

        // The token works against the admin surface
        let token = body["token"].as_str().unwrap();
        let me = server
            .get("/admin/api/v1/me")
            .add_header("authorization", format!("Bearer {token}"))
            .await;
        me.assert_status_ok();
    }

    /// Wrong password and unknown email must be byte-identical 401s, and
    /// repeated attempts must stay identical (enumeration resistance).
    #[sqlx::test]
    #[test_log::test]
    async fn test_login_failures_are_byte_identical(pool: PgPool) {
        let server = create_test_app(pool.clone()).await;
        let user = create_test_user_with_password(&pool, Role::AdminEkonomi, "right-password").await;

        let wrong_once = server
            .post("/authentication/login")
            .json(&json!({"email": user.email, "password": "wrong-password"}))
            .await;
        let wrong_twice = server
            .post("/authentication/login")
            .json(&json!({"email": user.email, "password": "wrong-password"}))
            .await;
        let unknown_email = server
            .post("/authentication/login")
            .json(&json!({"email": "nobody@example.com", "password": "whatever"}))
            .await;

        assert_eq!(wrong_once.status_code().as_u16(), 401);
        assert_eq!(wrong_twice.status_code().as_u16(), 401);
        assert_eq!(unknown_email.status_code().as_u16(), 401);
        assert_eq!(wrong_once.text(), wrong_twice.text());
        assert_eq!(wrong_once.text(), unknown_email.text());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_login_missing_fields_is_400(pool: PgPool) {
        let server = create_test_app(pool).await;

        let no_password = server.post("/authentication/login").json(&json!({"email": "a@b.c"})).await;
        assert_eq!(no_password.status_code().as_u16(), 400);

        let no_email = server.post("/authentication/login").json(&json!({"password": "pw"})).await;
        assert_eq!(no_email.status_code().as_u16(), 400);
    }

    /// Deactivating a user invalidates their outstanding tokens on the very
    /// next request.
    #[sqlx::test]
    #[test_log::test]
    async fn test_deactivation_revokes_access(pool: PgPool) {
        let server = create_test_app(pool.clone()).await;
        let user = create_test_user(&pool, Role::Superadmin).await;
        let (_, bearer) = test_bearer_header(&user, &create_test_config());

        let before = server.get("/admin/api/v1/me").add_header("authorization", bearer.clone()).await;
        before.assert_status_ok();

        deactivate_user(&pool, user.id).await;

        let after = server.get("/admin/api/v1/me").add_header("authorization", bearer).await;
        assert_eq!(after.status_code().as_u16(), 401);
    }

    /// The core end-to-end property: a scoped admin cannot touch an
    /// indicator outside their category; a superadmin can, and the change
    /// is audited.
    #[sqlx::test]
    #[test_log::test]
    async fn test_category_scoped_update(pool: PgPool) {
        let server = create_test_app(pool.clone()).await;
        let config = create_test_config();
        let indicator = seed_indicator(&pool, Category::Ekonomi).await;

        let demografi_admin = create_test_user(&pool, Role::AdminDemografi).await;
        let (_, demografi_bearer) = test_bearer_header(&demografi_admin, &config);

        // admin_demografi against an Ekonomi indicator: 403, row unchanged
        let forbidden = server
            .patch(&format!("/admin/api/v1/indicators/{}", indicator.id))
            .add_header("authorization", demografi_bearer)
            .json(&json!({"name": "Tampered"}))
            .await;
        assert_eq!(forbidden.status_code().as_u16(), 403);

        let mut conn = pool.acquire().await.unwrap();
        let unchanged = Indicators::new(&mut conn).get_by_id(indicator.id).await.unwrap().unwrap();
        assert_eq!(unchanged.name, indicator.name);

        // superadmin: 200, row updated, audit entry written
        let superadmin = create_test_user(&pool, Role::Superadmin).await;
        let (_, super_bearer) = test_bearer_header(&superadmin, &config);
        let ok = server
            .patch(&format!("/admin/api/v1/indicators/{}", indicator.id))
            .add_header("authorization", super_bearer)
            .json(&json!({"name": "Laju Pertumbuhan PDRB (revisi)"}))
            .await;
        ok.assert_status_ok();

        let updated = Indicators::new(&mut conn).get_by_id(indicator.id).await.unwrap().unwrap();
        assert_eq!(updated.name, "Laju Pertumbuhan PDRB (revisi)");

        let audit_entries: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM activity_log WHERE entity_type = 'indicator' AND user_id = $1")
                .bind(superadmin.id)
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(audit_entries, 1);
    }

    /// A scoped admin cannot move a resource into a category they own from
    /// one they don't, nor out of their own into a foreign one.
    #[sqlx::test]
    #[test_log::test]
    async fn test_recategorize_requires_both_categories(pool: PgPool) {
        let server = create_test_app(pool.clone()).await;
        let config = create_test_config();
        let indicator = seed_indicator(&pool, Category::Ekonomi).await;

        let ekonomi_admin = create_test_user(&pool, Role::AdminEkonomi).await;
        let (_, bearer) = test_bearer_header(&ekonomi_admin, &config);

        // Owned row, foreign target category: 403
        let response = server
            .patch(&format!("/admin/api/v1/indicators/{}", indicator.id))
            .add_header("authorization", bearer.clone())
            .json(&json!({"category": "Statistik Demografi & Sosial"}))
            .await;
        assert_eq!(response.status_code().as_u16(), 403);

        // Same-category edit still works
        let response = server
            .patch(&format!("/admin/api/v1/indicators/{}", indicator.id))
            .add_header("authorization", bearer)
            .json(&json!({"unit": "persen (yoy)"}))
            .await;
        response.assert_status_ok();
    }

    /// A category filter outside the caller's set is a 403, never a
    /// filtered-but-wrong result and never an empty 200.
    #[sqlx::test]
    #[test_log::test]
    async fn test_category_filter_outside_set_is_403(pool: PgPool) {
        let server = create_test_app(pool.clone()).await;
        let config = create_test_config();
        seed_indicator(&pool, Category::Ekonomi).await;

        let ekonomi_admin = create_test_user(&pool, Role::AdminEkonomi).await;
        let (_, bearer) = test_bearer_header(&ekonomi_admin, &config);

        let response = server
            .get("/admin/api/v1/indicators")
            .add_query_param("category", "Statistik Lingkungan Hidup & Multi-Domain")
            .add_header("authorization", bearer.clone())
            .await;
        assert_eq!(response.status_code().as_u16(), 403);

        // Without a filter, the list is scoped to the visible set
        let response = server.get("/admin/api/v1/indicators").add_header("authorization", bearer).await;
        response.assert_status_ok();
        let body: Vec<serde_json::Value> = response.json();
        assert_eq!(body.len(), 1);
        assert_eq!(body[0]["category"], json!("Statistik Ekonomi"));
    }

    /// Indicator catalog reshaping is superadmin-only.
    #[sqlx::test]
    #[test_log::test]
    async fn test_indicator_create_superadmin_only(pool: PgPool) {
        let server = create_test_app(pool.clone()).await;
        let config = create_test_config();

        let ekonomi_admin = create_test_user(&pool, Role::AdminEkonomi).await;
        let (_, admin_bearer) = test_bearer_header(&ekonomi_admin, &config);
        let body = json!({"name": "Nilai Tukar Petani", "category": "Statistik Ekonomi"});

        let forbidden = server
            .post("/admin/api/v1/indicators")
            .add_header("authorization", admin_bearer)
            .json(&body)
            .await;
        assert_eq!(forbidden.status_code().as_u16(), 403);

        let superadmin = create_test_user(&pool, Role::Superadmin).await;
        let (_, super_bearer) = test_bearer_header(&superadmin, &config);
        let created = server
            .post("/admin/api/v1/indicators")
            .add_header("authorization", super_bearer)
            .json(&body)
            .await;
        assert_eq!(created.status_code().as_u16(), 201);
    }

    /// The public surface serves only final rows, whatever the query says.
    #[sqlx::test]
    #[test_log::test]
    async fn test_public_data_is_final_only(pool: PgPool) {
        let server = create_test_app(pool.clone()).await;
        let indicator = seed_indicator(&pool, Category::DemografiSosial).await;
        let verifier = create_test_user(&pool, Role::Superadmin).await;

        let mut conn = pool.acquire().await.unwrap();
        let mut repo = DataPoints::new(&mut conn);
        let draft = repo
            .create(&DataPointCreateDBRequest {
                indicator_id: indicator.id,
                year: 2023,
                value: 71.2,
                status: DataStatus::Draft,
            })
            .await
            .unwrap();
        let final_row = repo
            .create(&DataPointCreateDBRequest {
                indicator_id: indicator.id,
                year: 2024,
                value: 71.8,
                status: DataStatus::Draft,
            })
            .await
            .unwrap();
        repo.verify(final_row.id, verifier.id).await.unwrap();

        // Requesting status=draft explicitly still yields only final rows
        let response = server
            .get(&format!("/public/api/v1/indicators/{}/data", indicator.id))
            .add_query_param("status", "draft")
            .await;
        response.assert_status_ok();
        let body: Vec<serde_json::Value> = response.json();
        assert_eq!(body.len(), 1);
        assert_eq!(body[0]["year"], json!(2024));
        assert_eq!(body[0]["status"], json!("final"));
        assert_ne!(body[0]["id"], json!(draft.id.to_string()));
    }

    /// Viewers authenticate fine but hold no admin permissions.
    #[sqlx::test]
    #[test_log::test]
    async fn test_viewer_denied_admin_surface(pool: PgPool) {
        let server = create_test_app(pool.clone()).await;
        let config = create_test_config();
        let viewer = create_test_user(&pool, Role::Viewer).await;
        let (_, bearer) = test_bearer_header(&viewer, &config);

        // /me works: it only requires authentication
        let me = server.get("/admin/api/v1/me").add_header("authorization", bearer.clone()).await;
        me.assert_status_ok();

        for path in ["/admin/api/v1/indicators", "/admin/api/v1/dashboard", "/admin/api/v1/users"] {
            let response = server.get(path).add_header("authorization", bearer.clone()).await;
            assert_eq!(response.status_code().as_u16(), 403, "viewer should be denied {path}");
        }
    }

    /// No token at all is a 401 on every admin route.
    #[sqlx::test]
    #[test_log::test]
    async fn test_missing_token_is_401(pool: PgPool) {
        let server = create_test_app(pool).await;

        for path in ["/admin/api/v1/me", "/admin/api/v1/indicators", "/admin/api/v1/dashboard"] {
            let response = server.get(path).await;
            assert_eq!(response.status_code().as_u16(), 401, "missing token should 401 on {path}");
        }
    }

    /// The seeded superadmin from config can log in.
    #[sqlx::test]
    #[test_log::test]
    async fn test_initial_superadmin_seeded(pool: PgPool) {
        let server = create_test_app(pool).await;

        let response = server
            .post("/authentication/login")
            .json(&json!({"email": "admin@test.com", "password": "superadmin-password"}))
            .await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["user"]["role"], json!("superadmin"));
    }

    /// Verification: a scoped admin verifies within their category, and the
    /// verified row carries their stamp.
    #[sqlx::test]
    #[test_log::test]
    async fn test_verify_flow(pool: PgPool) {
        let server = create_test_app(pool.clone()).await;
        let config = create_test_config();
        let indicator = seed_indicator(&pool, Category::Ekonomi).await;

        let ekonomi_admin = create_test_user(&pool, Role::AdminEkonomi).await;
        let (_, bearer) = test_bearer_header(&ekonomi_admin, &config);

        let created = server
            .post(&format!("/admin/api/v1/indicators/{}/data", indicator.id))
            .add_header("authorization", bearer.clone())
            .json(&json!({"year": 2024, "value": 5.05}))
            .await;
        assert_eq!(created.status_code().as_u16(), 201);
        let data_id = created.json::<serde_json::Value>()["id"].as_str().unwrap().to_string();

        let verified = server
            .post(&format!("/admin/api/v1/indicators/{}/data/{}/verify", indicator.id, data_id))
            .add_header("authorization", bearer)
            .await;
        verified.assert_status_ok();
        let body: serde_json::Value = verified.json();
        assert_eq!(body["status"], json!("final"));
        assert_eq!(body["verified_by"], json!(ekonomi_admin.id.to_string()));
    }
}
