//! Database record structures matching table schemas.
//!
//! Each entity has up to three shapes:
//!
//! - `*CreateDBRequest`: fields for an INSERT
//! - `*UpdateDBRequest`: optional fields for a partial UPDATE
//! - `*DBResponse`: the full row as read back (derives `sqlx::FromRow`)
//!
//! These are distinct from the API models in [`crate::api::models`]: the DB
//! shapes carry storage-only fields (password hashes, author IDs) that the
//! API layer must not serialize.

pub mod activity_log;
pub mod articles;
pub mod data_points;
pub mod faqs;
pub mod indicators;
pub mod users;
