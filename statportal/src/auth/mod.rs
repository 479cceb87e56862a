//! Authentication and authorization system.
//!
//! This module implements the platform's security contract:
//! - Password hashing and verification (Argon2id, with an explicit legacy
//!   compatibility mode for imported plaintext credentials)
//! - Bearer token issuance and verification (signed, time-limited)
//! - The role→category access policy and action permission table
//! - Typed extractors for protecting routes
//!
//! # Authentication
//!
//! Clients authenticate once via `POST /authentication/login` with
//! email/password and receive a signed token. Every protected request then
//! carries `Authorization: Bearer <token>`. Verification is stateless except
//! for one mandatory database read: the user row is re-fetched per request
//! and must still be active, so deactivating an account revokes all of its
//! outstanding tokens immediately.
//!
//! # Authorization
//!
//! Access control is computed, never stored:
//! - **Roles** are fixed per account (`superadmin`, the three `admin_*`
//!   roles, `viewer`).
//! - **Categories** are an attribute of indicators; the single
//!   role→category table in [`policy`] decides which an identity may touch.
//! - **Actions** (read/create/update/delete/verify) are gated per resource
//!   by the same policy table.
//!
//! # Modules
//!
//! - [`identity`]: Extractor producing the authenticated [`Identity`] in handlers
//! - [`password`]: Password hashing and verification using Argon2
//! - [`permissions`]: Typed `RequiresPermission` route guards
//! - [`policy`]: The pure role/category/action decision functions
//! - [`token`]: Token claims, issuance, and verification
//!
//! # Usage in Handlers
//!
//! ```ignore
//! use statportal::api::models::users::Identity;
//! use statportal::auth::permissions::{operation, resource, RequiresPermission};
//!
//! async fn protected_handler(
//!     identity: Identity,
//! ) -> Result<String, Error> {
//!     Ok(format!("Hello, {}!", identity.email))
//! }
//!
//! async fn superadmin_only(
//!     _: RequiresPermission<resource::Indicators, operation::Create>,
//! ) -> Result<String, Error> {
//!     Ok("allowed".to_string())
//! }
//! ```
//!
//! [`Identity`]: crate::api::models::users::Identity

pub mod identity;
pub mod password;
pub mod permissions;
pub mod policy;
pub mod token;
