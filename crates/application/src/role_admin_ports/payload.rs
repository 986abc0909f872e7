use depot_core::{AppResult, NonEmptyString};
use depot_domain::{PermissionId, RoleColor, RoleName, RoleProfile};
use serde::Serialize;

/// Form values for creating or updating a role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleDraft {
    /// Raw name as typed; normalised before submission.
    pub name: String,
    /// Descriptive attributes.
    pub profile: RoleProfile,
    /// Selected permission ids; ignored for the administrator.
    pub permission_ids: Vec<PermissionId>,
}

impl RoleDraft {
    /// Creates a draft with a name and display name.
    #[must_use]
    pub fn new(name: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            profile: RoleProfile {
                display_name: display_name.into(),
                ..RoleProfile::default()
            },
            permission_ids: Vec::new(),
        }
    }

    /// Sets the permission ids.
    #[must_use]
    pub fn with_permissions(mut self, ids: impl IntoIterator<Item = PermissionId>) -> Self {
        self.permission_ids = ids.into_iter().collect();
        self
    }

    /// Checks required fields and returns the normalised name.
    pub fn validate(&self) -> AppResult<RoleName> {
        let name = RoleName::new(&self.name)?;
        NonEmptyString::for_field("displayName", self.profile.display_name.as_str())?;
        Ok(name)
    }
}

/// Body submitted to the role store.
///
/// `permissionIds` is left out of the serialized form for the administrator;
/// its access is implicit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RolePayload {
    name: RoleName,
    display_name: String,
    #[serde(rename = "displayNameVi", skip_serializing_if = "Option::is_none")]
    display_name_localized: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(rename = "descriptionVi", skip_serializing_if = "Option::is_none")]
    description_localized: Option<String>,
    color: RoleColor,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    permission_ids: Option<Vec<PermissionId>>,
}

impl RolePayload {
    /// Validates a draft and builds the submission body.
    pub fn from_draft(draft: RoleDraft) -> AppResult<Self> {
        let name = draft.validate()?;
        let permission_ids = if name.is_administrator() {
            None
        } else {
            let mut ids = draft.permission_ids;
            ids.sort_unstable();
            ids.dedup();
            Some(ids)
        };
        let profile = draft.profile;

        Ok(Self {
            name,
            display_name: profile.display_name.trim().to_owned(),
            display_name_localized: non_blank(profile.display_name_localized),
            description: non_blank(profile.description),
            description_localized: non_blank(profile.description_localized),
            color: profile.color,
            icon: non_blank(profile.icon),
            permission_ids,
        })
    }

    /// Returns the normalised role name.
    #[must_use]
    pub fn name(&self) -> &RoleName {
        &self.name
    }

    /// Returns the permission ids, or `None` for the administrator.
    #[must_use]
    pub fn permission_ids(&self) -> Option<&[PermissionId]> {
        self.permission_ids.as_deref()
    }

    /// Returns the descriptive attributes carried by the payload.
    #[must_use]
    pub fn profile(&self) -> RoleProfile {
        RoleProfile {
            display_name: self.display_name.clone(),
            display_name_localized: self.display_name_localized.clone(),
            description: self.description.clone(),
            description_localized: self.description_localized.clone(),
            color: self.color,
            icon: self.icon.clone(),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use depot_core::AppError;
    use depot_domain::PermissionId;

    use super::{RoleDraft, RolePayload};

    #[test]
    fn payload_normalizes_name() {
        let payload = RolePayload::from_draft(RoleDraft::new("Sales Manager", "Sales Manager"))
            .unwrap_or_else(|_| unreachable!());

        assert_eq!(payload.name().as_str(), "sales_manager");
    }

    #[test]
    fn payload_requires_name_and_display_name() {
        let missing_name = RolePayload::from_draft(RoleDraft::new(" ", "Picker"));
        assert_eq!(
            missing_name,
            Err(AppError::Validation("name is required".to_owned()))
        );

        let missing_display_name = RolePayload::from_draft(RoleDraft::new("picker", ""));
        assert_eq!(
            missing_display_name,
            Err(AppError::Validation("displayName is required".to_owned()))
        );
    }

    #[test]
    fn administrator_payload_omits_permission_ids() {
        let draft = RoleDraft::new("Administrator", "Administrator")
            .with_permissions([1, 2].map(PermissionId::new));

        let payload = RolePayload::from_draft(draft).unwrap_or_else(|_| unreachable!());
        let json = serde_json::to_value(&payload).unwrap_or_default();

        assert!(payload.permission_ids().is_none());
        assert!(json.get("permissionIds").is_none());
        assert_eq!(json.get("name"), Some(&serde_json::json!("administrator")));
    }

    #[test]
    fn standard_payload_serializes_sorted_unique_ids() {
        let draft =
            RoleDraft::new("picker", "Picker").with_permissions([3, 1, 3].map(PermissionId::new));

        let payload = RolePayload::from_draft(draft).unwrap_or_else(|_| unreachable!());
        let json = serde_json::to_value(&payload).unwrap_or_default();

        assert_eq!(json.get("permissionIds"), Some(&serde_json::json!([1, 3])));
        assert_eq!(json.get("displayName"), Some(&serde_json::json!("Picker")));
        assert_eq!(json.get("color"), Some(&serde_json::json!("gray")));
    }
}
