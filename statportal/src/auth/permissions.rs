//! Typed route guards: `RequiresPermission<resource, operation>`.
//!
//! A handler states its action-level requirement in its signature:
//!
//! ```ignore
//! async fn create_indicator(
//!     State(state): State<AppState>,
//!     identity: RequiresPermission<resource::Indicators, operation::Create>,
//!     Json(create): Json<IndicatorCreate>,
//! ) -> Result<...> { ... }
//! ```
//!
//! The extractor authenticates (via the [`Identity`] extractor) and then
//! consults [`policy::can_perform_action`] — the same table every other
//! check uses. It only covers the action dimension; category scoping is
//! per-row and stays in the handler via [`policy::ensure_category_access`].

use std::marker::PhantomData;
use std::ops::Deref;

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::{
    AppState,
    api::models::users::Identity,
    auth::policy,
    errors::{Error, Result},
    types::{Action, Resource},
};

/// Marker trait tying a zero-sized resource type to its [`Resource`] value.
pub trait ResourceMarker: Send + 'static {
    const RESOURCE: Resource;
}

/// Marker trait tying a zero-sized operation type to its [`Action`] value.
pub trait OperationMarker: Send + 'static {
    const ACTION: Action;
}

/// Zero-sized resource markers for use in handler signatures.
pub mod resource {
    use super::ResourceMarker;
    use crate::types::Resource;

    macro_rules! resource_marker {
        ($name:ident) => {
            pub struct $name;
            impl ResourceMarker for $name {
                const RESOURCE: Resource = Resource::$name;
            }
        };
    }

    resource_marker!(Users);
    resource_marker!(Categories);
    resource_marker!(Indicators);
    resource_marker!(IndicatorData);
    resource_marker!(Articles);
    resource_marker!(Faqs);
    resource_marker!(Dashboard);
    resource_marker!(ActivityLog);
}

/// Zero-sized operation markers for use in handler signatures.
pub mod operation {
    use super::OperationMarker;
    use crate::types::Action;

    macro_rules! operation_marker {
        ($name:ident) => {
            pub struct $name;
            impl OperationMarker for $name {
                const ACTION: Action = Action::$name;
            }
        };
    }

    operation_marker!(Read);
    operation_marker!(Create);
    operation_marker!(Update);
    operation_marker!(Delete);
    operation_marker!(Verify);
}

/// Extractor that authenticates the caller and requires a permission from
/// the policy table. Dereferences to the authenticated [`Identity`].
pub struct RequiresPermission<R, O> {
    pub identity: Identity,
    _marker: PhantomData<fn() -> (R, O)>,
}

impl<R, O> Deref for RequiresPermission<R, O> {
    type Target = Identity;

    fn deref(&self) -> &Self::Target {
        &self.identity
    }
}

impl<R, O> FromRequestParts<AppState> for RequiresPermission<R, O>
where
    R: ResourceMarker,
    O: OperationMarker,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        let identity = Identity::from_request_parts(parts, state).await?;

        if !policy::can_perform_action(identity.role, R::RESOURCE, O::ACTION) {
            return Err(Error::forbidden(O::ACTION, R::RESOURCE));
        }

        Ok(Self {
            identity,
            _marker: PhantomData,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        api::models::users::Role,
        test_utils::{create_test_app_state, create_test_user, test_bearer_header},
    };
    use axum::extract::FromRequestParts as _;
    use sqlx::PgPool;

    async fn parts_for(pool: &PgPool, role: Role) -> (Parts, AppState) {
        let state = create_test_app_state(pool.clone());
        let user = create_test_user(pool, role).await;
        let (_, header_value) = test_bearer_header(&user, &state.config);

        let request = axum::http::Request::builder()
            .uri("http://localhost/test")
            .header("authorization", header_value)
            .body(())
            .unwrap();
        let (parts, _body) = request.into_parts();
        (parts, state)
    }

    #[sqlx::test]
    async fn test_superadmin_passes_create_indicators(pool: PgPool) {
        let (mut parts, state) = parts_for(&pool, Role::Superadmin).await;
        let guard = RequiresPermission::<resource::Indicators, operation::Create>::from_request_parts(&mut parts, &state).await;
        assert!(guard.is_ok());
    }

    #[sqlx::test]
    async fn test_category_admin_denied_create_indicators(pool: PgPool) {
        let (mut parts, state) = parts_for(&pool, Role::AdminEkonomi).await;
        let err = RequiresPermission::<resource::Indicators, operation::Create>::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::FORBIDDEN);
    }

    #[sqlx::test]
    async fn test_category_admin_passes_update_indicators(pool: PgPool) {
        let (mut parts, state) = parts_for(&pool, Role::AdminDemografi).await;
        let guard = RequiresPermission::<resource::Indicators, operation::Update>::from_request_parts(&mut parts, &state).await;
        assert!(guard.is_ok());
    }

    #[sqlx::test]
    async fn test_viewer_denied_dashboard(pool: PgPool) {
        let (mut parts, state) = parts_for(&pool, Role::Viewer).await;
        let err = RequiresPermission::<resource::Dashboard, operation::Read>::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::FORBIDDEN);
    }

    #[sqlx::test]
    async fn test_unauthenticated_is_401_not_403(pool: PgPool) {
        let state = create_test_app_state(pool.clone());
        let request = axum::http::Request::builder().uri("http://localhost/test").body(()).unwrap();
        let (mut parts, _body) = request.into_parts();

        let err = RequiresPermission::<resource::Indicators, operation::Read>::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::UNAUTHORIZED);
    }
}
