//! API layer for HTTP request handling and data models.
//!
//! This module contains the REST API implementation, organized into:
//!
//! - **[`handlers`]**: Axum route handlers for all API endpoints
//! - **[`models`]**: Request/response data structures for API communication
//!
//! # API Structure
//!
//! The API is divided into three surfaces:
//!
//! - **Authentication** (`/authentication/*`): Login, logout, password change
//! - **Admin** (`/admin/api/v1/*`): Bearer-authenticated management of users,
//!   indicators, data points, articles, FAQs, plus the dashboard, export and
//!   the activity log
//! - **Public** (`/public/api/v1/*`): Unauthenticated read access to
//!   published data only
//!
//! # OpenAPI Documentation
//!
//! All endpoints are documented with OpenAPI annotations using `utoipa`.
//! API documentation is available at `/admin/docs` when the server is running.

pub mod handlers;
pub mod models;
