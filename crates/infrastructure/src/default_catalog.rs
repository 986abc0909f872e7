//! Permission registry shipped with a fresh back office.

use depot_core::AppResult;
use depot_domain::{
    ParentSection, Permission, PermissionCatalog, PermissionId, PermissionLabel,
    PermissionPlacement,
};

use ParentSection::{Administration as Admin, WarehouseOperations as Ops};

struct PermissionSeed {
    parent_section: ParentSection,
    section: &'static str,
    page: &'static str,
    path: &'static str,
    display_name: &'static str,
    display_name_vi: &'static str,
    sort_order: i32,
    is_sensitive: bool,
}

#[allow(clippy::too_many_arguments)]
const fn seed(
    parent_section: ParentSection,
    section: &'static str,
    page: &'static str,
    path: &'static str,
    display_name: &'static str,
    display_name_vi: &'static str,
    sort_order: i32,
    is_sensitive: bool,
) -> PermissionSeed {
    PermissionSeed {
        parent_section,
        section,
        page,
        path,
        display_name,
        display_name_vi,
        sort_order,
        is_sensitive,
    }
}

const DEFAULT_PERMISSIONS: &[PermissionSeed] = &[
    seed(Ops, "dashboard", "view", "/dashboard", "View Dashboard", "Xem tổng quan", 1, false),
    seed(Ops, "orders", "view", "/orders", "View Orders", "Xem đơn hàng", 10, false),
    seed(Ops, "orders", "create", "/orders/new", "Create Orders", "Tạo đơn hàng", 11, false),
    seed(Ops, "orders", "edit", "/orders/:id/edit", "Edit Orders", "Sửa đơn hàng", 12, false),
    seed(Ops, "orders", "delete", "/orders/:id/delete", "Delete Orders", "Xóa đơn hàng", 13, true),
    seed(Ops, "orders", "pick_pack", "/orders/:id/pick-pack", "Pick & Pack Orders", "Lấy & đóng gói", 14, false),
    seed(Ops, "inventory", "view", "/inventory", "View Inventory", "Xem tồn kho", 20, false),
    seed(Ops, "inventory", "create", "/inventory/new", "Create Products", "Tạo sản phẩm", 21, false),
    seed(Ops, "inventory", "edit", "/inventory/:id/edit", "Edit Products", "Sửa sản phẩm", 22, false),
    seed(Ops, "inventory", "delete", "/inventory/:id/delete", "Delete Products", "Xóa sản phẩm", 23, true),
    seed(Ops, "inventory", "adjust", "/inventory/:id/adjust", "Adjust Inventory", "Điều chỉnh tồn kho", 24, false),
    seed(Ops, "stock", "view", "/stock", "View Stock", "Xem kho", 30, false),
    seed(Ops, "stock", "transfer", "/stock/transfer", "Transfer Stock", "Chuyển kho", 31, false),
    seed(Ops, "stock", "adjust", "/stock/adjust", "Stock Adjustments", "Điều chỉnh kho", 32, false),
    seed(Ops, "warehouses", "view", "/warehouses", "View Warehouses", "Xem kho hàng", 40, false),
    seed(Ops, "warehouses", "manage", "/warehouses/manage", "Manage Warehouses", "Quản lý kho hàng", 41, false),
    seed(Ops, "warehouses", "map", "/warehouses/map", "Warehouse Map", "Bản đồ kho", 42, false),
    seed(Ops, "manufacturing", "view", "/manufacturing", "View Manufacturing", "Xem sản xuất", 50, false),
    seed(Ops, "manufacturing", "create", "/manufacturing/new", "Create Production", "Tạo sản xuất", 51, false),
    seed(Ops, "manufacturing", "convert", "/manufacturing/simple-conversion", "Simple Conversion", "Chuyển đổi đơn giản", 52, false),
    seed(Ops, "pos", "view", "/pos", "Point of Sale", "Bán hàng", 60, false),
    seed(Ops, "pos", "process", "/pos/sale", "Process Sales", "Xử lý bán hàng", 61, false),
    seed(Ops, "pos", "refund", "/pos/refund", "Process Refunds", "Xử lý hoàn tiền", 62, true),
    seed(Ops, "customers", "view", "/customers", "View Customers", "Xem khách hàng", 70, false),
    seed(Ops, "customers", "create", "/customers/new", "Create Customers", "Tạo khách hàng", 71, false),
    seed(Ops, "customers", "edit", "/customers/:id/edit", "Edit Customers", "Sửa khách hàng", 72, false),
    seed(Ops, "customers", "delete", "/customers/:id/delete", "Delete Customers", "Xóa khách hàng", 73, true),
    seed(Ops, "customers", "pricing", "/customers/:id/pricing", "Customer Pricing", "Giá khách hàng", 74, true),
    seed(Ops, "discounts", "view", "/discounts", "View Discounts", "Xem giảm giá", 80, false),
    seed(Ops, "discounts", "create", "/discounts/new", "Create Discounts", "Tạo giảm giá", 81, false),
    seed(Ops, "discounts", "edit", "/discounts/:id/edit", "Edit Discounts", "Sửa giảm giá", 82, false),
    seed(Ops, "discounts", "delete", "/discounts/:id/delete", "Delete Discounts", "Xóa giảm giá", 83, true),
    seed(Ops, "imports", "view", "/imports", "View Imports", "Xem nhập hàng", 90, false),
    seed(Ops, "imports", "create", "/imports/new", "Create Shipments", "Tạo lô hàng", 91, false),
    seed(Ops, "imports", "edit", "/imports/:id/edit", "Edit Shipments", "Sửa lô hàng", 92, false),
    seed(Ops, "imports", "costs", "/imports/:id/costs", "View Import Costs", "Xem chi phí nhập", 93, true),
    seed(Ops, "receiving", "view", "/receiving", "View Receiving", "Xem nhận hàng", 100, false),
    seed(Ops, "receiving", "process", "/receiving/process", "Process Receiving", "Xử lý nhận hàng", 101, false),
    seed(Ops, "files", "view", "/files", "View Files", "Xem tệp", 110, false),
    seed(Ops, "files", "upload", "/files/upload", "Upload Files", "Tải lên tệp", 111, false),
    seed(Ops, "files", "delete", "/files/:id/delete", "Delete Files", "Xóa tệp", 112, true),
    seed(Ops, "services", "view", "/services", "View Services", "Xem dịch vụ", 120, false),
    seed(Ops, "services", "create", "/services/new", "Create Services", "Tạo dịch vụ", 121, false),
    seed(Ops, "tickets", "view", "/tickets", "View Tickets", "Xem yêu cầu", 130, false),
    seed(Ops, "tickets", "create", "/tickets/new", "Create Tickets", "Tạo yêu cầu", 131, false),
    seed(Ops, "tickets", "resolve", "/tickets/:id/resolve", "Resolve Tickets", "Giải quyết yêu cầu", 132, false),
    seed(Ops, "returns", "view", "/returns", "View Returns", "Xem trả hàng", 140, false),
    seed(Ops, "returns", "process", "/returns/process", "Process Returns", "Xử lý trả hàng", 141, false),
    seed(Admin, "employees", "view", "/employees", "View Employees", "Xem nhân viên", 200, false),
    seed(Admin, "employees", "manage", "/employees/manage", "Manage Employees", "Quản lý nhân viên", 201, true),
    seed(Admin, "reports", "view", "/reports", "View Reports", "Xem báo cáo", 210, false),
    seed(Admin, "reports", "financial", "/reports/financial", "Financial Reports", "Báo cáo tài chính", 211, true),
    seed(Admin, "reports", "export", "/reports/export", "Export Reports", "Xuất báo cáo", 212, true),
    seed(Admin, "settings", "view", "/settings", "View Settings", "Xem cài đặt", 220, false),
    seed(Admin, "settings", "system", "/settings/system", "System Settings", "Cài đặt hệ thống", 221, true),
    seed(Admin, "settings", "users", "/settings/users", "User Management", "Quản lý người dùng", 222, true),
    seed(Admin, "settings", "roles", "/settings/roles", "Role Management", "Quản lý vai trò", 223, true),
];

/// Returns the default permissions, numbered from 1 in declaration order.
pub fn default_permissions() -> AppResult<Vec<Permission>> {
    DEFAULT_PERMISSIONS
        .iter()
        .zip(1_i64..)
        .map(|(seed, id)| {
            Permission::new(
                PermissionId::new(id),
                PermissionPlacement {
                    parent_section: seed.parent_section,
                    section: seed.section.to_owned(),
                    page: seed.page.to_owned(),
                    path: seed.path.to_owned(),
                },
                PermissionLabel {
                    display_name: seed.display_name.to_owned(),
                    display_name_localized: Some(seed.display_name_vi.to_owned()),
                    sort_order: seed.sort_order,
                },
                seed.is_sensitive,
            )
        })
        .collect()
}

/// Returns the default catalog.
pub fn default_catalog() -> AppResult<PermissionCatalog> {
    PermissionCatalog::new(default_permissions()?)
}
