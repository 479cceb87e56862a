//! Common type definitions and access-control vocabulary.
//!
//! This module defines:
//! - Type aliases for entity IDs (UserId, IndicatorId, etc.)
//! - The [`Resource`] and [`Action`] enums used by the access policy
//!
//! # ID Types
//!
//! All entity IDs are UUIDs wrapped in type aliases for better type safety:
//!
//! - [`UserId`]: User account identifier
//! - [`IndicatorId`]: Statistical indicator identifier
//! - [`DataPointId`]: Time-series data point identifier
//! - [`ArticleId`]: Article identifier
//! - [`FaqId`]: FAQ entry identifier
//! - [`ActivityId`]: Activity log entry identifier
//!
//! # Access Control
//!
//! Authorization decisions are expressed over two enums:
//!
//! - [`Resource`]: what entity type is being touched (Indicators, Articles, ...)
//! - [`Action`]: what is being done to it (Read, Create, Update, Delete, Verify)
//!
//! The actual allow/deny table lives in [`crate::auth::policy`] — this module
//! only provides the vocabulary.
//!
//! # Utility Functions
//!
//! - [`abbrev_uuid`]: Abbreviate UUIDs to first 8 chars for logging

use std::fmt;
use uuid::Uuid;

// Type aliases for IDs
pub type UserId = Uuid;
pub type IndicatorId = Uuid;
pub type DataPointId = Uuid;
pub type ArticleId = Uuid;
pub type FaqId = Uuid;
pub type ActivityId = Uuid;

/// Abbreviate a UUID to its first 8 characters for more readable logs and traces
/// Example: "550e8400-e29b-41d4-a716-446655440000" -> "550e8400"
pub fn abbrev_uuid(uuid: &Uuid) -> String {
    uuid.to_string().chars().take(8).collect()
}

/// Actions that can be performed on resources.
///
/// `Verify` is specific to indicator data: it promotes a row to `final`
/// status and stamps the verifying user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Read,
    Create,
    Update,
    Delete,
    Verify,
}

/// Resources that can be operated on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Users,
    Categories,
    Indicators,
    IndicatorData,
    Articles,
    Faqs,
    Dashboard,
    ActivityLog,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Read => write!(f, "read"),
            Action::Create => write!(f, "create"),
            Action::Update => write!(f, "update"),
            Action::Delete => write!(f, "delete"),
            Action::Verify => write!(f, "verify"),
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Resource::Users => "users",
            Resource::Categories => "categories",
            Resource::Indicators => "indicators",
            Resource::IndicatorData => "indicator data",
            Resource::Articles => "articles",
            Resource::Faqs => "faqs",
            Resource::Dashboard => "dashboard",
            Resource::ActivityLog => "activity log",
        };
        write!(f, "{name}")
    }
}
