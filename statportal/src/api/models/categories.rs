//! API models for the three fixed statistical categories.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Top-level statistical domain an indicator belongs to.
///
/// The set is closed: these three labels are the `stat_category` Postgres
/// enum and the exact strings the public API exchanges. Access to a category
/// is always computed from the caller's role via [`crate::auth::policy`] —
/// it is an attribute of indicators, never of users.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, Hash, ToSchema)]
#[sqlx(type_name = "stat_category")]
pub enum Category {
    #[sqlx(rename = "Statistik Demografi & Sosial")]
    #[serde(rename = "Statistik Demografi & Sosial")]
    DemografiSosial,
    #[sqlx(rename = "Statistik Ekonomi")]
    #[serde(rename = "Statistik Ekonomi")]
    Ekonomi,
    #[sqlx(rename = "Statistik Lingkungan Hidup & Multi-Domain")]
    #[serde(rename = "Statistik Lingkungan Hidup & Multi-Domain")]
    LingkunganMultiDomain,
}

impl Category {
    /// Every category, in canonical display order.
    pub const ALL: [Category; 3] = [Category::DemografiSosial, Category::Ekonomi, Category::LingkunganMultiDomain];

    /// The canonical label, as stored and as served.
    pub fn label(&self) -> &'static str {
        match self {
            Category::DemografiSosial => "Statistik Demografi & Sosial",
            Category::Ekonomi => "Statistik Ekonomi",
            Category::LingkunganMultiDomain => "Statistik Lingkungan Hidup & Multi-Domain",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A category with its indicator count, as returned by the category listing
/// endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    pub category: Category,
    pub indicator_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_round_trip_through_serde() {
        for category in Category::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.label()));
            let back: Category = serde_json::from_str(&json).unwrap();
            assert_eq!(back, category);
        }
    }

    #[test]
    fn test_unknown_label_rejected() {
        let result: Result<Category, _> = serde_json::from_str("\"Statistik Politik\"");
        assert!(result.is_err());
    }
}
