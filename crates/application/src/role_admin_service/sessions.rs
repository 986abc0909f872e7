use super::*;

use tracing::warn;

use crate::role_editor::{RoleEditSession, RoleSaveRequest, SaveTarget};

impl RoleAdminService {
    /// Sends a save snapshot to the role store.
    pub async fn submit(&self, request: RoleSaveRequest) -> AppResult<Role> {
        match request.target {
            SaveTarget::Create => self.create_role(request.draft).await,
            SaveTarget::Update(role_id) => self.update_role(role_id, request.draft).await,
        }
    }

    /// Saves whatever the session holds now and records the outcome on it.
    ///
    /// Failures leave the session editable so the author can retry. If the
    /// returned future is dropped before it resolves, the session stays in
    /// `Saving`; call [`RoleEditSession::abandon_save`] to resume editing.
    pub async fn save_session(&self, session: &mut RoleEditSession) -> AppResult<Role> {
        let request = session.begin_save()?;
        let outcome = self.submit(request).await;
        if let Err(error) = &outcome {
            warn!(error = %error, "role save failed");
        }

        session.complete_save(&outcome);
        outcome
    }
}
