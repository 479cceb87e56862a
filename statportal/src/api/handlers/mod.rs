//! HTTP request handlers for all API endpoints.
//!
//! Every admin handler is the same 3-step pipeline:
//!
//! 1. **authenticate** — the [`Identity`] /
//!    [`RequiresPermission`](crate::auth::permissions::RequiresPermission)
//!    extractors reject the request with 401/403 before the handler body runs
//! 2. **authorize** — category scoping via [`crate::auth::policy`] against
//!    the *existing* row (and the target category when a mutation moves one)
//! 3. **execute** — repository calls, with mutations and their activity-log
//!    entry sharing a single transaction
//!
//! Public handlers skip steps 1–2 and instead hardcode the
//! published/final predicate into their queries.
//!
//! # Handler Modules
//!
//! - [`auth`]: Login, logout, password change
//! - [`users`]: User administration (superadmin) and `/me`
//! - [`categories`]: The caller's visible categories with counts
//! - [`indicators`]: Indicator catalog CRUD and export
//! - [`data_points`]: Time-series CRUD and verification
//! - [`articles`]: Articles and publishing
//! - [`faqs`]: FAQ triage
//! - [`dashboard`]: Aggregated admin dashboard
//! - [`activity`]: Audit trail listing (superadmin)
//! - [`public`]: The unauthenticated read-only surface
//!
//! [`Identity`]: crate::api::models::users::Identity

use crate::db::{handlers::ActivityLog, models::activity_log::ActivityCreateDBRequest};
use sqlx::PgConnection;

pub mod activity;
pub mod articles;
pub mod auth;
pub mod categories;
pub mod dashboard;
pub mod data_points;
pub mod faqs;
pub mod indicators;
pub mod public;
pub mod users;

/// Record an activity entry inside the caller's transaction.
///
/// The write shares the transaction with the mutation it describes, so a
/// crash cannot leave an orphaned entry — but a failed insert must not mask
/// the mutation's success, so the error is logged and swallowed here.
pub(crate) async fn record_activity(db: &mut PgConnection, entry: ActivityCreateDBRequest) {
    if let Err(e) = ActivityLog::new(db).record(&entry).await {
        tracing::warn!(action = %entry.action, entity_type = %entry.entity_type, "Failed to record activity entry: {e}");
    }
}
