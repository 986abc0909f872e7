use crate::catalog::PermissionCatalog;
use crate::permission::{
    ParentSection, Permission, PermissionId, PermissionLabel, PermissionPlacement,
};

pub(crate) fn permission(
    id: i64,
    parent_section: ParentSection,
    section: &str,
    sort_order: i32,
    is_sensitive: bool,
) -> Permission {
    Permission::new(
        PermissionId::new(id),
        PermissionPlacement {
            parent_section,
            section: section.to_owned(),
            page: format!("page_{id}"),
            path: format!("/{section}/{id}"),
        },
        PermissionLabel {
            display_name: format!("{section} #{id}"),
            display_name_localized: None,
            sort_order,
        },
        is_sensitive,
    )
    .unwrap_or_else(|_| unreachable!())
}

pub(crate) fn catalog_from(permissions: Vec<Permission>) -> PermissionCatalog {
    PermissionCatalog::new(permissions).unwrap_or_else(|_| unreachable!())
}

/// `orders` = 1,2,3 and `inventory` = 4,5 under warehouse operations, plus a
/// sensitive administration permission 6 in `reports`.
pub(crate) fn warehouse_scenario_catalog() -> PermissionCatalog {
    catalog_from(vec![
        permission(1, ParentSection::WarehouseOperations, "orders", 10, false),
        permission(2, ParentSection::WarehouseOperations, "orders", 11, false),
        permission(3, ParentSection::WarehouseOperations, "orders", 12, false),
        permission(4, ParentSection::WarehouseOperations, "inventory", 20, false),
        permission(5, ParentSection::WarehouseOperations, "inventory", 21, false),
        permission(6, ParentSection::Administration, "reports", 210, true),
    ])
}
