use super::*;

use depot_domain::{CoverageReport, RoleName, catalog_coverage};
use tracing::{info, warn};

use crate::role_admin_ports::{RoleDraft, RolePayload};

impl RoleAdminService {
    /// Lists roles in store order.
    pub async fn list_roles(&self) -> AppResult<Vec<Role>> {
        self.role_store.list_roles().await
    }

    /// Validates, normalises and creates a role.
    pub async fn create_role(&self, draft: RoleDraft) -> AppResult<Role> {
        let payload = RolePayload::from_draft(draft)?;
        let role = self.role_store.create_role(payload).await?;

        info!(role_id = %role.id(), role_name = %role.name(), "created role");
        self.publish(&[RosterEvent::RolesChanged]);
        Ok(role)
    }

    /// Validates and updates a role.
    ///
    /// Renaming a system role is refused before the store is called.
    pub async fn update_role(&self, role_id: RoleId, draft: RoleDraft) -> AppResult<Role> {
        let payload = RolePayload::from_draft(draft)?;
        let existing = self.find_role(role_id).await?;
        ensure_rename_allowed(&existing, payload.name())?;

        let renamed = existing.name() != payload.name();
        let role = self.role_store.update_role(role_id, payload).await?;

        info!(role_id = %role.id(), role_name = %role.name(), renamed, "updated role");
        if renamed {
            self.publish(&[RosterEvent::RolesChanged, RosterEvent::UsersChanged]);
        } else {
            self.publish(&[RosterEvent::RolesChanged]);
        }
        Ok(role)
    }

    /// Deletes a non-system role.
    ///
    /// Users keep the deleted name as a dangling assignment.
    pub async fn delete_role(&self, role_id: RoleId) -> AppResult<()> {
        let existing = self.find_role(role_id).await?;
        if existing.is_system() || existing.is_administrator() {
            warn!(role_id = %role_id, role_name = %existing.name(), "refused to delete system role");
            return Err(AppError::ProtectedEntity(format!(
                "system role '{}' cannot be deleted",
                existing.name()
            )));
        }

        self.role_store.delete_role(role_id).await?;

        info!(role_id = %role_id, role_name = %existing.name(), "deleted role");
        self.publish(&[RosterEvent::RolesChanged, RosterEvent::UsersChanged]);
        Ok(())
    }

    /// Returns the effective coverage of a role over a catalog.
    #[must_use]
    pub fn role_coverage(&self, role: &Role, catalog: &PermissionCatalog) -> CoverageReport {
        catalog_coverage(catalog, &role.effective_selection(catalog))
    }
}

fn ensure_rename_allowed(existing: &Role, requested_name: &RoleName) -> AppResult<()> {
    let protected = existing.is_system() || existing.is_administrator();
    if protected && existing.name() != requested_name {
        warn!(
            role_id = %existing.id(),
            role_name = %existing.name(),
            requested_name = %requested_name,
            "refused to rename system role"
        );
        return Err(AppError::ProtectedEntity(format!(
            "system role '{}' cannot be renamed",
            existing.name()
        )));
    }

    Ok(())
}
