use async_trait::async_trait;
use depot_application::PermissionCatalogProvider;
use depot_core::AppResult;
use depot_domain::PermissionCatalog;
use tokio::sync::RwLock;

use crate::default_catalog::default_catalog;

/// In-memory permission registry.
#[derive(Debug, Default)]
pub struct InMemoryPermissionCatalogProvider {
    catalog: RwLock<PermissionCatalog>,
}

impl InMemoryPermissionCatalogProvider {
    /// Creates a provider serving `catalog`.
    #[must_use]
    pub fn new(catalog: PermissionCatalog) -> Self {
        Self {
            catalog: RwLock::new(catalog),
        }
    }

    /// Creates a provider serving the default registry.
    pub fn with_defaults() -> AppResult<Self> {
        Ok(Self::new(default_catalog()?))
    }

    /// Replaces the served catalog, as a server deployment adding permissions would.
    pub async fn replace(&self, catalog: PermissionCatalog) {
        *self.catalog.write().await = catalog;
    }
}

#[async_trait]
impl PermissionCatalogProvider for InMemoryPermissionCatalogProvider {
    async fn fetch_permissions(&self) -> AppResult<PermissionCatalog> {
        Ok(self.catalog.read().await.clone())
    }
}
