use std::collections::{BTreeMap, BTreeSet};

use depot_core::{AppError, AppResult};

use crate::permission::{ParentSection, Permission, PermissionId};

/// Grouping level a tri-state toggle operates on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupSelector {
    /// Every permission under one parent section.
    Parent(ParentSection),
    /// Every permission in one section slug, across parents.
    Section(String),
    /// Every permission flagged as sensitive, across the whole catalog.
    Sensitive,
    /// The whole catalog.
    Everything,
}

impl GroupSelector {
    /// Creates a section selector.
    #[must_use]
    pub fn section(section: impl Into<String>) -> Self {
        Self::Section(section.into())
    }

    fn includes(&self, permission: &Permission) -> bool {
        match self {
            Self::Parent(parent) => permission.parent_section() == *parent,
            Self::Section(section) => permission.section() == section,
            Self::Sensitive => permission.is_sensitive(),
            Self::Everything => true,
        }
    }
}

/// Immutable, server-supplied permission catalog for one authoring session.
///
/// All views are derived on demand from the flat list; nothing is cached, so
/// a new catalog (or a language switch in the host) only requires building a
/// new value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionCatalog {
    permissions: Vec<Permission>,
}

impl PermissionCatalog {
    /// Creates a catalog, rejecting duplicate permission ids.
    pub fn new(mut permissions: Vec<Permission>) -> AppResult<Self> {
        let mut seen = BTreeSet::new();
        for permission in &permissions {
            if !seen.insert(permission.id()) {
                return Err(AppError::Validation(format!(
                    "permission id '{}' appears more than once in the catalog",
                    permission.id()
                )));
            }
        }

        permissions.sort_by_key(Permission::ordering_key);
        Ok(Self { permissions })
    }

    /// Returns the flat list ordered by `sort_order`, ties broken by id.
    #[must_use]
    pub fn all(&self) -> &[Permission] {
        &self.permissions
    }

    /// Returns the number of permissions in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.permissions.len()
    }

    /// Returns whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty()
    }

    /// Finds a permission by id.
    #[must_use]
    pub fn get(&self, id: PermissionId) -> Option<&Permission> {
        self.permissions
            .iter()
            .find(|permission| permission.id() == id)
    }

    /// Returns whether the catalog knows the permission id.
    #[must_use]
    pub fn contains(&self, id: PermissionId) -> bool {
        self.get(id).is_some()
    }

    /// Groups permissions by section slug.
    #[must_use]
    pub fn grouped(&self) -> BTreeMap<&str, Vec<&Permission>> {
        let mut grouped: BTreeMap<&str, Vec<&Permission>> = BTreeMap::new();
        for permission in &self.permissions {
            grouped
                .entry(permission.section())
                .or_default()
                .push(permission);
        }

        grouped
    }

    /// Groups permissions by parent section, then by section slug.
    #[must_use]
    pub fn hierarchical(&self) -> BTreeMap<ParentSection, BTreeMap<&str, Vec<&Permission>>> {
        let mut hierarchy: BTreeMap<ParentSection, BTreeMap<&str, Vec<&Permission>>> =
            BTreeMap::new();
        for permission in &self.permissions {
            hierarchy
                .entry(permission.parent_section())
                .or_default()
                .entry(permission.section())
                .or_default()
                .push(permission);
        }

        hierarchy
    }

    /// Resolves the ordered member ids of a grouping level.
    ///
    /// Membership is recomputed from the catalog on every call, which is what
    /// keeps the sensitive pseudo-group in step with the server's flags.
    #[must_use]
    pub fn members(&self, selector: &GroupSelector) -> Vec<PermissionId> {
        self.permissions
            .iter()
            .filter(|permission| selector.includes(permission))
            .map(Permission::id)
            .collect()
    }

    /// Returns every permission id in catalog order.
    #[must_use]
    pub fn ids(&self) -> Vec<PermissionId> {
        self.members(&GroupSelector::Everything)
    }

    /// Returns the ids of one section.
    #[must_use]
    pub fn section_ids(&self, section: &str) -> Vec<PermissionId> {
        self.members(&GroupSelector::section(section))
    }

    /// Returns the ids of one parent section.
    #[must_use]
    pub fn parent_ids(&self, parent: ParentSection) -> Vec<PermissionId> {
        self.members(&GroupSelector::Parent(parent))
    }

    /// Returns the ids of the sensitive pseudo-group.
    #[must_use]
    pub fn sensitive_ids(&self) -> Vec<PermissionId> {
        self.members(&GroupSelector::Sensitive)
    }

    /// Returns the section slugs under a parent, in slug order.
    #[must_use]
    pub fn sections_of(&self, parent: ParentSection) -> Vec<&str> {
        let sections: BTreeSet<&str> = self
            .permissions
            .iter()
            .filter(|permission| permission.parent_section() == parent)
            .map(Permission::section)
            .collect();

        sections.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::permission::{ParentSection, PermissionId};
    use crate::test_support::{catalog_from, permission};

    use super::{GroupSelector, PermissionCatalog};

    fn ids(values: &[i64]) -> Vec<PermissionId> {
        values.iter().copied().map(PermissionId::new).collect()
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let result = PermissionCatalog::new(vec![
            permission(1, ParentSection::WarehouseOperations, "orders", 10, false),
            permission(1, ParentSection::WarehouseOperations, "inventory", 20, false),
        ]);

        assert!(result.is_err());
    }

    #[test]
    fn ordering_uses_sort_order_then_id() {
        let catalog = catalog_from(vec![
            permission(9, ParentSection::WarehouseOperations, "orders", 2, false),
            permission(4, ParentSection::WarehouseOperations, "orders", 2, false),
            permission(7, ParentSection::WarehouseOperations, "orders", 1, false),
        ]);

        assert_eq!(catalog.ids(), ids(&[7, 4, 9]));
        let grouped = catalog.grouped();
        let orders: Vec<PermissionId> = grouped
            .get("orders")
            .map(|permissions| permissions.iter().map(|p| p.id()).collect())
            .unwrap_or_default();
        assert_eq!(orders, ids(&[7, 4, 9]));
    }

    #[test]
    fn hierarchical_view_nests_sections_under_parents() {
        let catalog = catalog_from(vec![
            permission(1, ParentSection::WarehouseOperations, "orders", 10, false),
            permission(4, ParentSection::WarehouseOperations, "inventory", 20, false),
            permission(50, ParentSection::Administration, "reports", 210, true),
        ]);

        let hierarchy = catalog.hierarchical();
        assert_eq!(hierarchy.len(), 2);
        let operations = hierarchy
            .get(&ParentSection::WarehouseOperations)
            .cloned()
            .unwrap_or_default();
        assert_eq!(
            operations.keys().copied().collect::<Vec<_>>(),
            vec!["inventory", "orders"]
        );
        assert_eq!(
            catalog.sections_of(ParentSection::Administration),
            vec!["reports"]
        );
    }

    #[test]
    fn selectors_resolve_members() {
        let catalog = catalog_from(vec![
            permission(1, ParentSection::WarehouseOperations, "orders", 10, false),
            permission(2, ParentSection::WarehouseOperations, "orders", 11, true),
            permission(4, ParentSection::WarehouseOperations, "inventory", 20, false),
            permission(50, ParentSection::Administration, "reports", 210, true),
        ]);

        assert_eq!(catalog.section_ids("orders"), ids(&[1, 2]));
        assert_eq!(
            catalog.parent_ids(ParentSection::WarehouseOperations),
            ids(&[1, 2, 4])
        );
        assert_eq!(catalog.sensitive_ids(), ids(&[2, 50]));
        assert_eq!(catalog.members(&GroupSelector::Everything).len(), 4);
        assert!(catalog.section_ids("unknown").is_empty());
    }
}
