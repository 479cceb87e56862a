//! Request authentication: the [`Identity`] extractor.
//!
//! Pipeline per request: parse the `Authorization: Bearer <token>` header,
//! verify the token, then re-fetch the user row by the token's subject and
//! require it to still be active. The re-fetch is mandatory — it is the only
//! revocation mechanism in a stateless token scheme, so it is never skipped
//! for latency reasons.

use crate::{
    AppState,
    api::models::users::Identity,
    auth::token,
    db::{
        errors::DbError,
        handlers::{Repository, Users},
    },
    errors::{Error, Result},
};
use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::{instrument, trace};

/// Extract the raw token from an `Authorization: Bearer <token>` header.
///
/// Fails with `MissingToken` if the header is absent, unreadable, or not in
/// bearer form.
pub(crate) fn bearer_token(parts: &Parts) -> Result<&str> {
    let header = parts
        .headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or(Error::MissingToken)?;

    let value = header.to_str().map_err(|_| Error::MissingToken)?;
    value.strip_prefix("Bearer ").ok_or(Error::MissingToken)
}

impl FromRequestParts<AppState> for Identity {
    type Rejection = Error;

    #[instrument(skip(parts, state))]
    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        let raw_token = bearer_token(parts)?;
        let claims = token::verify_token(raw_token, &state.config)?;
        trace!("Token verified for subject {}", claims.sub);

        // The live-user read: a deactivated or deleted account loses access
        // on its next request even while its token is unexpired.
        let mut conn = state.db.acquire().await.map_err(|e| Error::Database(DbError::from(e)))?;
        let mut users = Users::new(&mut conn);
        let user = users.get_by_id(claims.sub).await?.ok_or(Error::UserNotFound)?;

        if !user.is_active {
            return Err(Error::UserInactive);
        }

        Ok(Identity::from(user))
    }
}
