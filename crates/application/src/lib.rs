//! Application services and ports for role administration.

#![forbid(unsafe_code)]

mod role_admin_ports;
mod role_admin_service;
mod role_editor;

pub use role_admin_ports::{
    PermissionCatalogProvider, RoleDraft, RolePayload, RoleStore, RosterEvent, RosterEventSink,
    UserDirectory,
};
pub use role_admin_service::RoleAdminService;
pub use role_editor::{
    AccessEditor, EditTarget, EditorPhase, RoleEditSession, RoleSaveRequest, SaveTarget,
};
