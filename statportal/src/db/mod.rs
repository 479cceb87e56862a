//! Database layer for data persistence and access.
//!
//! This module implements the data access layer using SQLx with PostgreSQL.
//! It follows the Repository pattern to provide clean abstractions over database operations.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  (API request handlers)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │ Repositories│  (db::handlers - queries per table)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │   Models    │  (db::models - database records)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │  PostgreSQL │
//! └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`handlers`]: Repository implementations for CRUD operations
//! - [`models`]: Database record structures matching table schemas
//! - [`errors`]: Database-specific error types
//!
//! # Transactions
//!
//! Repositories wrap a `&mut PgConnection` and therefore compose with SQLx
//! transactions. Handlers that mutate state open one transaction for the
//! mutation plus its activity-log entry, so a crash between the two never
//! leaves them inconsistent:
//!
//! ```ignore
//! let mut tx = pool.begin().await?;
//! let indicator = Indicators::new(&mut tx).update(id, &request).await?;
//! ActivityLog::new(&mut tx).record(&entry).await.ok();
//! tx.commit().await?;
//! ```
//!
//! # Migrations
//!
//! Database migrations are managed by SQLx and located in the `migrations/` directory.
//! The [`crate::migrator`] function provides access to the migrator:
//!
//! ```ignore
//! statportal::migrator().run(&pool).await?;
//! ```

pub mod errors;
pub mod handlers;
pub mod models;
