use async_trait::async_trait;
use depot_application::UserDirectory;
use depot_core::{AppError, AppResult};
use depot_domain::DirectoryUser;
use tokio::sync::RwLock;

/// In-memory user directory.
///
/// Role names are stored as given; a name that matches no role simply
/// dangles, as it does after a role is deleted.
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    users: RwLock<Vec<DirectoryUser>>,
}

impl InMemoryUserDirectory {
    /// Creates a directory holding `users`.
    #[must_use]
    pub fn new(users: Vec<DirectoryUser>) -> Self {
        Self {
            users: RwLock::new(users),
        }
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn list_users(&self) -> AppResult<Vec<DirectoryUser>> {
        Ok(self.users.read().await.clone())
    }

    async fn set_user_role(&self, user_id: &str, role_name: &str) -> AppResult<()> {
        let mut users = self.users.write().await;
        let user = users
            .iter_mut()
            .find(|user| user.id == user_id)
            .ok_or_else(|| AppError::NotFound(format!("user '{user_id}' does not exist")))?;

        role_name.clone_into(&mut user.role);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use depot_application::UserDirectory;
    use depot_core::AppError;
    use depot_domain::DirectoryUser;

    use super::InMemoryUserDirectory;

    fn user(id: &str, role: &str) -> DirectoryUser {
        DirectoryUser {
            id: id.to_owned(),
            email: Some(format!("{id}@depot.test")),
            first_name: None,
            last_name: None,
            role: role.to_owned(),
            created_at: None,
        }
    }

    #[tokio::test]
    async fn set_user_role_accepts_any_name() {
        let directory = InMemoryUserDirectory::new(vec![user("u-1", "manager")]);

        let result = directory.set_user_role("u-1", "retired_role").await;

        assert!(result.is_ok());
        let users = directory.list_users().await.unwrap_or_default();
        assert_eq!(users[0].role, "retired_role");
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let directory = InMemoryUserDirectory::default();

        let result = directory.set_user_role("missing", "manager").await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
