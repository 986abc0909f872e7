use std::sync::Arc;

use depot_core::{AppError, AppResult};
use depot_domain::{PermissionCatalog, Role, RoleId};

use crate::role_admin_ports::{
    PermissionCatalogProvider, RoleStore, RosterEvent, RosterEventSink, UserDirectory,
};

mod roles;
mod sessions;
mod users;


/// Application service for role authoring and user role assignment.
#[derive(Clone)]
pub struct RoleAdminService {
    catalog_provider: Arc<dyn PermissionCatalogProvider>,
    role_store: Arc<dyn RoleStore>,
    user_directory: Arc<dyn UserDirectory>,
    event_sink: Arc<dyn RosterEventSink>,
}

impl RoleAdminService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(
        catalog_provider: Arc<dyn PermissionCatalogProvider>,
        role_store: Arc<dyn RoleStore>,
        user_directory: Arc<dyn UserDirectory>,
        event_sink: Arc<dyn RosterEventSink>,
    ) -> Self {
        Self {
            catalog_provider,
            role_store,
            user_directory,
            event_sink,
        }
    }

    /// Fetches the permission catalog for an authoring session.
    pub async fn load_catalog(&self) -> AppResult<PermissionCatalog> {
        self.catalog_provider.fetch_permissions().await
    }

    async fn find_role(&self, role_id: RoleId) -> AppResult<Role> {
        self.role_store
            .list_roles()
            .await?
            .into_iter()
            .find(|role| role.id() == role_id)
            .ok_or_else(|| AppError::NotFound(format!("role '{role_id}' was not found")))
    }

    fn publish(&self, events: &[RosterEvent]) {
        for event in events {
            self.event_sink.publish(*event);
        }
    }
}
