use async_trait::async_trait;

use depot_core::AppResult;
use depot_domain::{DirectoryUser, PermissionCatalog, Role, RoleId};

use super::payload::RolePayload;

/// Read-only source of the server's permission registry.
#[async_trait]
pub trait PermissionCatalogProvider: Send + Sync {
    /// Fetches the current catalog.
    async fn fetch_permissions(&self) -> AppResult<PermissionCatalog>;
}

/// Persistence port for roles.
///
/// Implementations surface their own validation and transport failures; the
/// service passes them to callers unchanged.
#[async_trait]
pub trait RoleStore: Send + Sync {
    /// Lists every role with its resolved access.
    async fn list_roles(&self) -> AppResult<Vec<Role>>;

    /// Creates a role. Duplicate names fail with a validation error.
    async fn create_role(&self, payload: RolePayload) -> AppResult<Role>;

    /// Replaces a role's attributes and permission set.
    async fn update_role(&self, role_id: RoleId, payload: RolePayload) -> AppResult<Role>;

    /// Deletes a role. System roles fail with a protected-entity error.
    async fn delete_role(&self, role_id: RoleId) -> AppResult<()>;
}

/// Port for the single writable user field: the assigned role name.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Lists directory users.
    async fn list_users(&self) -> AppResult<Vec<DirectoryUser>>;

    /// Assigns a role name to a user. Unknown role names are the directory's
    /// concern.
    async fn set_user_role(&self, user_id: &str, role_name: &str) -> AppResult<()>;
}
