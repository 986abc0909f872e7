//! Domain entities and invariants for role-based access control authoring.

#![forbid(unsafe_code)]

mod catalog;
mod coverage;
mod permission;
mod role;
mod selection;
mod user;

#[cfg(test)]
mod test_support;

pub use catalog::{GroupSelector, PermissionCatalog};
pub use coverage::{CoverageReport, ParentCoverage, SectionCoverage, catalog_coverage};
pub use permission::{
    ParentSection, Permission, PermissionId, PermissionLabel, PermissionPlacement,
};
pub use role::{
    ADMINISTRATOR_ROLE_NAME, Role, RoleAccess, RoleColor, RoleId, RoleName, RoleProfile,
    normalize_role_name,
};
pub use selection::{GroupProgress, GroupState, SelectionState};
pub use user::{DirectoryUser, RoleHeadcount, UNKNOWN_USER_LABEL, count_by_role};
