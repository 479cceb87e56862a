//! Repository implementations for database access.
//!
//! This module provides repository structs for each major entity in the system.
//! Repositories follow a consistent pattern and implement the [`Repository`] trait.
//!
//! # Design Pattern
//!
//! Each repository:
//! - Wraps a SQLx connection or transaction
//! - Provides strongly-typed CRUD operations
//! - Handles query construction and parameter binding
//! - Returns domain models from [`crate::db::models`]
//!
//! # Available Repositories
//!
//! - [`Users`]: User account management and authentication lookups
//! - [`Indicators`]: Statistical indicator catalog
//! - [`DataPoints`]: Time-series values per indicator, with verification
//! - [`Articles`]: Editorial articles and publishing
//! - [`Faqs`]: FAQ triage and publishing
//! - [`ActivityLog`]: Append-only audit trail
//! - [`Dashboard`]: Aggregate counts for the admin dashboard
//!
//! # Common Pattern
//!
//! ```ignore
//! use statportal::db::handlers::{Indicators, Repository};
//!
//! async fn example(pool: &sqlx::PgPool) -> Result<(), Box<dyn std::error::Error>> {
//!     let mut tx = pool.begin().await?;
//!     let mut repo = Indicators::new(&mut tx);
//!     let indicator = repo.get_by_id(id).await?;
//!     tx.commit().await?;
//!     Ok(())
//! }
//! ```
//!
//! Category scoping is **not** a repository concern: repositories execute the
//! filter they are handed. The access decisions live in
//! [`crate::auth::policy`], and handlers must have applied them before any
//! query here runs.

pub mod activity_log;
pub mod articles;
pub mod dashboard;
pub mod data_points;
pub mod faqs;
pub mod indicators;
pub mod repository;
pub mod users;

pub use activity_log::ActivityLog;
pub use articles::Articles;
pub use dashboard::Dashboard;
pub use data_points::DataPoints;
pub use faqs::Faqs;
pub use indicators::Indicators;
pub use repository::Repository;
pub use users::Users;
