//! OpenAPI documentation configuration.
//!
//! Aggregates every annotated handler and schema into one document, served
//! with Scalar at `/admin/docs`.

use utoipa::OpenApi;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

use crate::api::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "statportal",
        description = "Statistics publication and administration platform API"
    ),
    paths(
        crate::api::handlers::auth::login,
        crate::api::handlers::auth::logout,
        crate::api::handlers::auth::change_password,
        crate::api::handlers::users::me,
        crate::api::handlers::users::list_users,
        crate::api::handlers::users::create_user,
        crate::api::handlers::users::get_user,
        crate::api::handlers::users::update_user,
        crate::api::handlers::users::delete_user,
        crate::api::handlers::categories::list_categories,
        crate::api::handlers::indicators::list_indicators,
        crate::api::handlers::indicators::create_indicator,
        crate::api::handlers::indicators::get_indicator,
        crate::api::handlers::indicators::update_indicator,
        crate::api::handlers::indicators::delete_indicator,
        crate::api::handlers::indicators::export_indicator,
        crate::api::handlers::data_points::list_data_points,
        crate::api::handlers::data_points::create_data_point,
        crate::api::handlers::data_points::update_data_point,
        crate::api::handlers::data_points::delete_data_point,
        crate::api::handlers::data_points::verify_data_point,
        crate::api::handlers::articles::list_articles,
        crate::api::handlers::articles::create_article,
        crate::api::handlers::articles::get_article,
        crate::api::handlers::articles::update_article,
        crate::api::handlers::articles::publish_article,
        crate::api::handlers::articles::delete_article,
        crate::api::handlers::faqs::list_faqs,
        crate::api::handlers::faqs::create_faq,
        crate::api::handlers::faqs::get_faq,
        crate::api::handlers::faqs::update_faq,
        crate::api::handlers::faqs::delete_faq,
        crate::api::handlers::dashboard::get_dashboard,
        crate::api::handlers::activity::list_activity,
        crate::api::handlers::public::list_categories,
        crate::api::handlers::public::list_indicators,
        crate::api::handlers::public::get_indicator,
        crate::api::handlers::public::list_indicator_data,
        crate::api::handlers::public::list_articles,
        crate::api::handlers::public::get_article,
        crate::api::handlers::public::list_faqs,
    ),
    components(schemas(
        models::auth::LoginRequest,
        models::auth::LoginResponse,
        models::auth::LogoutResponse,
        models::auth::ChangePasswordRequest,
        models::auth::AuthSuccessResponse,
        models::users::Role,
        models::users::Identity,
        models::users::UserCreate,
        models::users::UserUpdate,
        models::users::UserResponse,
        models::categories::Category,
        models::categories::CategoryResponse,
        models::indicators::IndicatorCreate,
        models::indicators::IndicatorUpdate,
        models::indicators::IndicatorResponse,
        models::indicators::IndicatorExportResponse,
        models::data_points::DataStatus,
        models::data_points::DataPointCreate,
        models::data_points::DataPointUpdate,
        models::data_points::DataPointResponse,
        models::articles::ArticleCreate,
        models::articles::ArticleUpdate,
        models::articles::ArticleResponse,
        models::faqs::FaqStatus,
        models::faqs::FaqCreate,
        models::faqs::FaqUpdate,
        models::faqs::FaqResponse,
        models::dashboard::CategorySummary,
        models::dashboard::ContentSummary,
        models::dashboard::DashboardResponse,
        models::activity::ActivityResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "authentication", description = "Login and credential management"),
        (name = "users", description = "User administration (superadmin)"),
        (name = "categories", description = "Visible statistical categories"),
        (name = "indicators", description = "Indicator catalog"),
        (name = "indicator-data", description = "Time-series data and verification"),
        (name = "articles", description = "Editorial articles"),
        (name = "faqs", description = "FAQ triage"),
        (name = "dashboard", description = "Admin aggregates"),
        (name = "activity", description = "Audit trail"),
        (name = "public", description = "Unauthenticated published data"),
    )
)]
pub struct ApiDoc;

/// Registers the bearer scheme referenced by the handler annotations.
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "BearerAuth",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).bearer_format("JWT").build()),
        );
    }
}
