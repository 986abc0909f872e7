//! JSON shapes of the back-office API.

use depot_core::{AppError, AppResult};
use depot_domain::{
    DirectoryUser, ParentSection, Permission, PermissionId, PermissionLabel,
    PermissionPlacement, Role, RoleColor, RoleId, RoleName, RoleProfile,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PermissionDto {
    id: i64,
    parent_section: String,
    section: String,
    #[serde(default)]
    page: String,
    #[serde(default)]
    path: String,
    display_name: String,
    display_name_vi: Option<String>,
    #[serde(default)]
    is_sensitive: bool,
    #[serde(default)]
    sort_order: i32,
}

impl PermissionDto {
    pub(super) fn into_permission(self) -> AppResult<Permission> {
        let id = self.id;
        let parent_section = self.parent_section.parse::<ParentSection>().map_err(|error| {
            AppError::Transport(format!("malformed permission {id}: {error}"))
        })?;

        Permission::new(
            PermissionId::new(id),
            PermissionPlacement {
                parent_section,
                section: self.section,
                page: self.page,
                path: self.path,
            },
            PermissionLabel {
                display_name: self.display_name,
                display_name_localized: self.display_name_vi,
                sort_order: self.sort_order,
            },
            self.is_sensitive,
        )
        .map_err(|error| AppError::Transport(format!("malformed permission {id}: {error}")))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RoleDto {
    id: i64,
    name: String,
    display_name: String,
    display_name_vi: Option<String>,
    description: Option<String>,
    description_vi: Option<String>,
    color: Option<String>,
    icon: Option<String>,
    #[serde(default)]
    is_system: bool,
    #[serde(default)]
    permission_ids: Vec<i64>,
}

impl RoleDto {
    pub(super) fn into_role(self) -> AppResult<Role> {
        let id = self.id;
        let malformed =
            |error: AppError| AppError::Transport(format!("malformed role {id}: {error}"));
        let color = match self.color.as_deref() {
            Some(raw) => raw.parse::<RoleColor>().unwrap_or_else(|error| {
                warn!(role_id = id, error = %error, "falling back to default role color");
                RoleColor::default()
            }),
            None => RoleColor::default(),
        };

        Role::new(
            RoleId::new(id),
            RoleName::new(&self.name).map_err(malformed)?,
            RoleProfile {
                display_name: self.display_name,
                display_name_localized: self.display_name_vi,
                description: self.description,
                description_localized: self.description_vi,
                color,
                icon: self.icon,
            },
            self.is_system,
            self.permission_ids.into_iter().map(PermissionId::new),
        )
        .map_err(malformed)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct UserDto {
    id: String,
    email: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    #[serde(default)]
    role: String,
    created_at: Option<String>,
}

impl From<UserDto> for DirectoryUser {
    fn from(value: UserDto) -> Self {
        Self {
            id: value.id,
            email: value.email,
            first_name: value.first_name,
            last_name: value.last_name,
            role: value.role,
            created_at: value.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct UserRoleBody<'a> {
    pub(super) role: &'a str,
}
