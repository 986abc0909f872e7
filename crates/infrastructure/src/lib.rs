//! Infrastructure adapters for the role administration ports.

#![forbid(unsafe_code)]

mod broadcast_roster_event_sink;
mod default_catalog;
mod default_roles;
mod in_memory_permission_catalog_provider;
mod in_memory_role_store;
mod in_memory_user_directory;
mod rest_back_office_client;

pub use broadcast_roster_event_sink::BroadcastRosterEventSink;
pub use default_catalog::{default_catalog, default_permissions};
pub use default_roles::default_roles;
pub use in_memory_permission_catalog_provider::InMemoryPermissionCatalogProvider;
pub use in_memory_role_store::InMemoryRoleStore;
pub use in_memory_user_directory::InMemoryUserDirectory;
pub use rest_back_office_client::RestBackOfficeClient;
