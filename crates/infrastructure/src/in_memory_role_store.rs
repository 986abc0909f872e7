use std::collections::BTreeMap;

use async_trait::async_trait;
use depot_application::{RolePayload, RoleStore};
use depot_core::{AppError, AppResult};
use depot_domain::{PermissionCatalog, Role, RoleId};
use tokio::sync::RwLock;

use crate::default_roles::default_roles;

/// In-memory role store with the server's protection rules.
#[derive(Debug, Default)]
pub struct InMemoryRoleStore {
    table: RwLock<RoleTable>,
}

#[derive(Debug, Default)]
struct RoleTable {
    roles: BTreeMap<RoleId, Role>,
    // Highest id ever assigned; deleted ids are never reused.
    last_id: i64,
}

impl InMemoryRoleStore {
    /// Creates a store holding `roles`.
    #[must_use]
    pub fn with_roles(roles: impl IntoIterator<Item = Role>) -> Self {
        let roles: BTreeMap<RoleId, Role> =
            roles.into_iter().map(|role| (role.id(), role)).collect();
        let last_id = roles.keys().next_back().map_or(0, |role_id| role_id.value());

        Self {
            table: RwLock::new(RoleTable { roles, last_id }),
        }
    }

    /// Creates a store seeded with the system roles for `catalog`.
    pub fn with_system_roles(catalog: &PermissionCatalog) -> AppResult<Self> {
        Ok(Self::with_roles(default_roles(catalog)?))
    }
}

fn is_protected(role: &Role) -> bool {
    role.is_system() || role.is_administrator()
}

fn ensure_unique_name(
    roles: &BTreeMap<RoleId, Role>,
    payload: &RolePayload,
    except: Option<RoleId>,
) -> AppResult<()> {
    let taken = roles
        .values()
        .any(|role| Some(role.id()) != except && role.name() == payload.name());
    if taken {
        return Err(AppError::Validation(format!(
            "role '{}' already exists",
            payload.name()
        )));
    }

    Ok(())
}

fn role_from_payload(role_id: RoleId, is_system: bool, payload: &RolePayload) -> AppResult<Role> {
    Role::new(
        role_id,
        payload.name().clone(),
        payload.profile(),
        is_system,
        payload.permission_ids().unwrap_or_default().iter().copied(),
    )
}

#[async_trait]
impl RoleStore for InMemoryRoleStore {
    async fn list_roles(&self) -> AppResult<Vec<Role>> {
        Ok(self.table.read().await.roles.values().cloned().collect())
    }

    async fn create_role(&self, payload: RolePayload) -> AppResult<Role> {
        let mut table = self.table.write().await;
        ensure_unique_name(&table.roles, &payload, None)?;

        let next_id = table.last_id.saturating_add(1);
        let role = role_from_payload(RoleId::new(next_id), false, &payload)?;
        table.last_id = next_id;
        table.roles.insert(role.id(), role.clone());

        Ok(role)
    }

    async fn update_role(&self, role_id: RoleId, payload: RolePayload) -> AppResult<Role> {
        let mut table = self.table.write().await;
        let existing = table
            .roles
            .get(&role_id)
            .ok_or_else(|| AppError::NotFound(format!("role '{role_id}' does not exist")))?;

        if is_protected(existing) && existing.name() != payload.name() {
            return Err(AppError::ProtectedEntity(format!(
                "system role '{}' cannot be renamed",
                existing.name()
            )));
        }
        ensure_unique_name(&table.roles, &payload, Some(role_id))?;

        let role = role_from_payload(role_id, existing.is_system(), &payload)?;
        table.roles.insert(role_id, role.clone());

        Ok(role)
    }

    async fn delete_role(&self, role_id: RoleId) -> AppResult<()> {
        let mut table = self.table.write().await;
        let existing = table
            .roles
            .get(&role_id)
            .ok_or_else(|| AppError::NotFound(format!("role '{role_id}' does not exist")))?;

        if is_protected(existing) {
            return Err(AppError::ProtectedEntity(format!(
                "system role '{}' cannot be deleted",
                existing.name()
            )));
        }

        table.roles.remove(&role_id);
        Ok(())
    }
}
