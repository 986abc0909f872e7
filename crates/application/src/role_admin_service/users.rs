use super::*;

use depot_domain::{DirectoryUser, RoleHeadcount, count_by_role};
use tracing::info;

impl RoleAdminService {
    /// Lists directory users.
    pub async fn list_users(&self) -> AppResult<Vec<DirectoryUser>> {
        self.user_directory.list_users().await
    }

    /// Counts directory users per role.
    pub async fn headcount(&self) -> AppResult<RoleHeadcount> {
        let users = self.user_directory.list_users().await?;
        Ok(count_by_role(&users))
    }

    /// Assigns a role name to a user.
    ///
    /// The name is not checked against the role store here; the directory
    /// rejects unknown names.
    pub async fn assign_user_role(&self, user_id: &str, role_name: &str) -> AppResult<()> {
        self.user_directory
            .set_user_role(user_id, role_name)
            .await?;

        info!(user_id, role_name, "assigned user role");
        self.publish(&[RosterEvent::UsersChanged]);
        Ok(())
    }
}
