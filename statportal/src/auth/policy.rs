//! The access policy: pure role/category/action decision functions.
//!
//! The previous system re-derived the role→category mapping inline in every
//! route handler. This module is the single definition; every category-scoped
//! read or write must go through it. Nothing here touches the request or the
//! database — the functions are total over their inputs and fail closed.

use crate::{
    api::models::{categories::Category, users::{Identity, Role}},
    errors::{Error, Result},
    types::{Action, Resource},
};

/// The categories a role may read and curate.
///
/// `superadmin` sees all three; each `admin_*` role exactly one; `viewer`
/// none (its surface is the public read API).
pub fn categories_visible_to(role: Role) -> &'static [Category] {
    match role {
        Role::Superadmin => &Category::ALL,
        Role::AdminDemografi => &[Category::DemografiSosial],
        Role::AdminEkonomi => &[Category::Ekonomi],
        Role::AdminLingkungan => &[Category::LingkunganMultiDomain],
        Role::Viewer => &[],
    }
}

/// Whether `role` may touch rows in `category`.
pub fn can_access_category(role: Role, category: Category) -> bool {
    categories_visible_to(role).contains(&category)
}

/// The action permission table.
///
/// - `superadmin` may do everything.
/// - `admin_*` roles curate data within their category: they read, update
///   and verify everywhere their category access allows, and create data
///   points, articles and FAQs. Reshaping the indicator catalog
///   (create/delete of indicators) and destructive operations stay
///   superadmin-only, as does user administration.
/// - `viewer` holds no admin-surface permissions at all.
///
/// Category scoping is separate: a true result here still requires
/// [`can_access_category`] to pass for the row being touched.
pub fn can_perform_action(role: Role, resource: Resource, action: Action) -> bool {
    if role == Role::Superadmin {
        return true;
    }

    let is_category_admin = matches!(role, Role::AdminDemografi | Role::AdminEkonomi | Role::AdminLingkungan);
    if !is_category_admin {
        // viewer (and any future unrecognized role): fail closed
        return false;
    }

    match (resource, action) {
        // Indicator catalog shape is superadmin-only; admins curate content
        (Resource::Indicators, Action::Read | Action::Update | Action::Verify) => true,
        (Resource::Indicators, Action::Create | Action::Delete) => false,

        // Data points: full curation except destructive delete
        (Resource::IndicatorData, Action::Delete) => false,
        (Resource::IndicatorData, _) => true,

        // Editorial content: authoring open to every admin, deletion is not
        (Resource::Articles | Resource::Faqs, Action::Read | Action::Create | Action::Update) => true,
        (Resource::Articles | Resource::Faqs, _) => false,

        (Resource::Categories, Action::Read) => true,
        (Resource::Dashboard, Action::Read) => true,

        // User administration and the audit trail are superadmin-only
        (Resource::Users | Resource::ActivityLog, _) => false,

        _ => false,
    }
}

/// Check that `identity` may touch `category`, failing with `Forbidden`.
pub fn ensure_category_access(identity: &Identity, category: Category) -> Result<()> {
    if can_access_category(identity.role, category) {
        Ok(())
    } else {
        Err(Error::Forbidden {
            action: Action::Read,
            resource: format!("category '{category}'"),
        })
    }
}

/// Check a mutation that may move a row between categories.
///
/// Access must hold for **both** the row's current category and the target
/// one: a scoped admin may neither push a resource into a category they do
/// not own, nor pull one out of a category they cannot see.
pub fn ensure_recategorize(identity: &Identity, existing: Category, target: Category) -> Result<()> {
    ensure_category_access(identity, existing)?;
    if existing != target {
        ensure_category_access(identity, target)?;
    }
    Ok(())
}

/// Resolve the category filter for a list query.
///
/// A client-supplied category is intersected with the caller's accessible
/// set, never substituted for it. Requesting a category entirely outside the
/// set is a `Forbidden` error — not an empty result, which would be
/// indistinguishable from "no data".
pub fn visible_categories(identity: &Identity, requested: Option<Category>) -> Result<Vec<Category>> {
    let visible = categories_visible_to(identity.role);
    match requested {
        Some(category) => {
            if visible.contains(&category) {
                Ok(vec![category])
            } else {
                Err(Error::Forbidden {
                    action: Action::Read,
                    resource: format!("category '{category}'"),
                })
            }
        }
        None => Ok(visible.to_vec()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADMIN_ROLES: [Role; 3] = [Role::AdminDemografi, Role::AdminEkonomi, Role::AdminLingkungan];

    fn identity_with_role(role: Role) -> Identity {
        Identity {
            id: uuid::Uuid::new_v4(),
            email: "policy@example.com".to_string(),
            role,
            full_name: None,
            is_active: true,
        }
    }

    /// The static table from the specification, verified row by row.
    #[test]
    fn test_category_table_is_exact() {
        let table = [
            (Role::Superadmin, Category::ALL.to_vec()),
            (Role::AdminDemografi, vec![Category::DemografiSosial]),
            (Role::AdminEkonomi, vec![Category::Ekonomi]),
            (Role::AdminLingkungan, vec![Category::LingkunganMultiDomain]),
            (Role::Viewer, vec![]),
        ];

        for (role, expected) in table {
            assert_eq!(categories_visible_to(role), expected.as_slice(), "role {role:?}");
            for category in Category::ALL {
                assert_eq!(
                    can_access_category(role, category),
                    expected.contains(&category),
                    "role {role:?}, category {category:?}"
                );
            }
        }
    }

    #[test]
    fn test_admin_ekonomi_only_sees_ekonomi() {
        assert!(can_access_category(Role::AdminEkonomi, Category::Ekonomi));
        assert!(!can_access_category(Role::AdminEkonomi, Category::DemografiSosial));
        assert!(!can_access_category(Role::AdminEkonomi, Category::LingkunganMultiDomain));
    }

    #[test]
    fn test_superadmin_performs_every_action() {
        for resource in [
            Resource::Users,
            Resource::Categories,
            Resource::Indicators,
            Resource::IndicatorData,
            Resource::Articles,
            Resource::Faqs,
            Resource::Dashboard,
            Resource::ActivityLog,
        ] {
            for action in [Action::Read, Action::Create, Action::Update, Action::Delete, Action::Verify] {
                assert!(can_perform_action(Role::Superadmin, resource, action));
            }
        }
    }

    #[test]
    fn test_indicator_catalog_is_superadmin_only() {
        for role in ADMIN_ROLES {
            assert!(can_perform_action(role, Resource::Indicators, Action::Read));
            assert!(can_perform_action(role, Resource::Indicators, Action::Update));
            assert!(can_perform_action(role, Resource::Indicators, Action::Verify));
            assert!(!can_perform_action(role, Resource::Indicators, Action::Create));
            assert!(!can_perform_action(role, Resource::Indicators, Action::Delete));
        }
    }

    #[test]
    fn test_admins_curate_data_but_do_not_delete() {
        for role in ADMIN_ROLES {
            assert!(can_perform_action(role, Resource::IndicatorData, Action::Create));
            assert!(can_perform_action(role, Resource::IndicatorData, Action::Update));
            assert!(can_perform_action(role, Resource::IndicatorData, Action::Verify));
            assert!(!can_perform_action(role, Resource::IndicatorData, Action::Delete));
        }
    }

    #[test]
    fn test_viewer_has_no_admin_permissions() {
        for resource in [
            Resource::Users,
            Resource::Categories,
            Resource::Indicators,
            Resource::IndicatorData,
            Resource::Articles,
            Resource::Faqs,
            Resource::Dashboard,
            Resource::ActivityLog,
        ] {
            for action in [Action::Read, Action::Create, Action::Update, Action::Delete, Action::Verify] {
                assert!(!can_perform_action(Role::Viewer, resource, action), "{resource:?} {action:?}");
            }
        }
    }

    #[test]
    fn test_user_admin_is_superadmin_only() {
        for role in ADMIN_ROLES {
            assert!(!can_perform_action(role, Resource::Users, Action::Read));
            assert!(!can_perform_action(role, Resource::ActivityLog, Action::Read));
        }
    }

    #[test]
    fn test_recategorize_requires_both_sides() {
        let admin = identity_with_role(Role::AdminEkonomi);

        // Within the owned category: fine
        assert!(ensure_recategorize(&admin, Category::Ekonomi, Category::Ekonomi).is_ok());

        // Moving out of the owned category: denied on the target side
        assert!(ensure_recategorize(&admin, Category::Ekonomi, Category::DemografiSosial).is_err());

        // Row already outside the owned category: denied on the existing side
        assert!(ensure_recategorize(&admin, Category::DemografiSosial, Category::Ekonomi).is_err());

        let superadmin = identity_with_role(Role::Superadmin);
        assert!(ensure_recategorize(&superadmin, Category::Ekonomi, Category::DemografiSosial).is_ok());
    }

    #[test]
    fn test_visible_categories_intersection() {
        let admin = identity_with_role(Role::AdminEkonomi);

        // No filter: the accessible set
        assert_eq!(visible_categories(&admin, None).unwrap(), vec![Category::Ekonomi]);

        // Filter inside the set: narrowed to it
        assert_eq!(visible_categories(&admin, Some(Category::Ekonomi)).unwrap(), vec![Category::Ekonomi]);

        // Filter outside the set: Forbidden, never an empty 200
        let err = visible_categories(&admin, Some(Category::DemografiSosial)).unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::FORBIDDEN);

        // Superadmin without a filter sees everything
        let superadmin = identity_with_role(Role::Superadmin);
        assert_eq!(visible_categories(&superadmin, None).unwrap(), Category::ALL.to_vec());
    }
}
