//! API request and response data models.
//!
//! This module contains the data structures used for HTTP request
//! deserialization and response serialization. These models define the
//! public API contract.
//!
//! # Design Principles
//!
//! - **Separation of Concerns**: API models are distinct from database models,
//!   allowing independent evolution of API and storage representations
//! - **Validation**: Models use serde for deserialization; field-level rules
//!   (password length, year bounds) are enforced in handlers before any query
//! - **OpenAPI**: All models are annotated with `utoipa` for automatic API docs
//!
//! # Model Categories
//!
//! ## Resource Models
//!
//! - [`users`]: User accounts, the [`users::Role`] enum, and the
//!   per-request [`users::Identity`]
//! - [`categories`]: The three fixed statistical categories
//! - [`indicators`]: Indicator catalog entries and the export dataset
//! - [`data_points`]: Time-series values and their verification status
//! - [`articles`]: Editorial articles
//! - [`faqs`]: FAQ entries and triage status
//! - [`dashboard`]: Aggregated admin dashboard payload
//! - [`activity`]: Audit trail entries
//!
//! ## Authentication Models
//!
//! - [`auth`]: Login and password-change payloads

pub mod activity;
pub mod articles;
pub mod auth;
pub mod categories;
pub mod dashboard;
pub mod data_points;
pub mod faqs;
pub mod indicators;
pub mod pagination;
pub mod users;
