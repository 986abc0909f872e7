//! System roles shipped with a fresh back office.

use depot_core::AppResult;
use depot_domain::{
    ParentSection, Permission, PermissionCatalog, Role, RoleColor, RoleId, RoleName, RoleProfile,
};

struct RoleSeed {
    name: &'static str,
    display_name: &'static str,
    display_name_vi: &'static str,
    description: &'static str,
    description_vi: &'static str,
    color: RoleColor,
    icon: &'static str,
    grants: fn(&Permission) -> bool,
}

const DEFAULT_ROLES: &[RoleSeed] = &[
    RoleSeed {
        name: "administrator",
        display_name: "Administrator",
        display_name_vi: "Quản trị viên",
        description: "Full system access with all permissions",
        description_vi: "Toàn quyền truy cập hệ thống với tất cả quyền hạn",
        color: RoleColor::Red,
        icon: "Shield",
        grants: grants_nothing,
    },
    RoleSeed {
        name: "manager",
        display_name: "Manager",
        display_name_vi: "Quản lý",
        description: "Full warehouse access plus reports and employee management",
        description_vi: "Toàn quyền kho hàng cộng với báo cáo và quản lý nhân viên",
        color: RoleColor::Green,
        icon: "UserCog",
        grants: manager_grants,
    },
    RoleSeed {
        name: "warehouse_staff",
        display_name: "Warehouse Staff",
        display_name_vi: "Nhân viên kho",
        description: "Basic warehouse operations - orders, inventory, pick & pack",
        description_vi: "Vận hành kho cơ bản - đơn hàng, tồn kho, lấy & đóng gói",
        color: RoleColor::Blue,
        icon: "Package",
        grants: warehouse_staff_grants,
    },
];

// Administrator access is implicit; nothing is granted explicitly.
fn grants_nothing(_: &Permission) -> bool {
    false
}

fn manager_grants(permission: &Permission) -> bool {
    permission.parent_section() == ParentSection::WarehouseOperations
        || matches!(permission.section(), "reports" | "employees")
}

fn warehouse_staff_grants(permission: &Permission) -> bool {
    permission.parent_section() == ParentSection::WarehouseOperations && !permission.is_sensitive()
}

/// Builds the system roles against `catalog`, numbered from 1.
pub fn default_roles(catalog: &PermissionCatalog) -> AppResult<Vec<Role>> {
    DEFAULT_ROLES
        .iter()
        .zip(1_i64..)
        .map(|(seed, id)| {
            Role::new(
                RoleId::new(id),
                RoleName::new(seed.name)?,
                RoleProfile {
                    display_name: seed.display_name.to_owned(),
                    display_name_localized: Some(seed.display_name_vi.to_owned()),
                    description: Some(seed.description.to_owned()),
                    description_localized: Some(seed.description_vi.to_owned()),
                    color: seed.color,
                    icon: Some(seed.icon.to_owned()),
                },
                true,
                catalog
                    .all()
                    .iter()
                    .filter(|permission| (seed.grants)(*permission))
                    .map(Permission::id),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use depot_domain::{GroupSelector, GroupState, ParentSection, SelectionState};

    use crate::default_catalog::default_catalog;

    use super::default_roles;

    #[test]
    fn seeded_roles_follow_grant_rules() {
        let catalog = default_catalog().unwrap_or_default();
        let roles = default_roles(&catalog).unwrap_or_default();

        assert_eq!(roles.len(), 3);
        assert!(roles.iter().all(|role| role.is_system()));
        assert!(roles[0].is_administrator());

        let manager = SelectionState::from_ids(
            roles[1].explicit_permissions().cloned().unwrap_or_default(),
        );
        let operations = catalog.parent_ids(ParentSection::WarehouseOperations);
        assert_eq!(manager.group_state(&operations), GroupState::Full);
        assert_eq!(
            manager.group_state(&catalog.section_ids("settings")),
            GroupState::Unselected
        );
        assert_eq!(
            manager.group_state(&catalog.section_ids("reports")),
            GroupState::Full
        );

        let staff = SelectionState::from_ids(
            roles[2].explicit_permissions().cloned().unwrap_or_default(),
        );
        assert_eq!(
            staff.selected_count(&catalog.members(&GroupSelector::Sensitive)),
            0
        );
        assert_eq!(staff.group_state(&operations), GroupState::Partial);
    }
}
