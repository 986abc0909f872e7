mod collaborators;
mod events;
mod payload;

pub use collaborators::{PermissionCatalogProvider, RoleStore, UserDirectory};
pub use events::{RosterEvent, RosterEventSink};
pub use payload::{RoleDraft, RolePayload};
