use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use depot_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

use crate::catalog::PermissionCatalog;
use crate::permission::PermissionId;
use crate::selection::SelectionState;

/// Name of the protected role that implicitly holds every permission.
pub const ADMINISTRATOR_ROLE_NAME: &str = "administrator";

/// Persisted role identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleId(i64);

impl RoleId {
    /// Creates a role identifier from its stored value.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the stored value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl Display for RoleId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Normalised role slug: lower-case with whitespace runs turned into `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoleName(String);

impl RoleName {
    /// Normalises and validates a raw role name.
    pub fn new(value: impl AsRef<str>) -> AppResult<Self> {
        let normalized = normalize_role_name(value.as_ref());
        if normalized.is_empty() {
            return Err(AppError::Validation("name is required".to_owned()));
        }

        Ok(Self(normalized))
    }

    /// Returns the administrator role name.
    #[must_use]
    pub fn administrator() -> Self {
        Self(ADMINISTRATOR_ROLE_NAME.to_owned())
    }

    /// Returns the slug.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns whether this is the administrator role name.
    #[must_use]
    pub fn is_administrator(&self) -> bool {
        self.0 == ADMINISTRATOR_ROLE_NAME
    }
}

impl TryFrom<String> for RoleName {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RoleName> for String {
    fn from(value: RoleName) -> Self {
        value.0
    }
}

impl Display for RoleName {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

/// Lower-cases a raw name and replaces each whitespace run with `_`.
///
/// Applying it twice yields the same string.
#[must_use]
pub fn normalize_role_name(value: &str) -> String {
    value
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

/// Badge colors available to roles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleColor {
    /// Red badge.
    Red,
    /// Orange badge.
    Orange,
    /// Amber badge.
    Amber,
    /// Yellow badge.
    Yellow,
    /// Green badge.
    Green,
    /// Teal badge.
    Teal,
    /// Blue badge.
    Blue,
    /// Indigo badge.
    Indigo,
    /// Purple badge.
    Purple,
    /// Pink badge.
    Pink,
    /// Neutral badge.
    #[default]
    Gray,
}

impl RoleColor {
    /// Returns a stable storage value for this color.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Orange => "orange",
            Self::Amber => "amber",
            Self::Yellow => "yellow",
            Self::Green => "green",
            Self::Teal => "teal",
            Self::Blue => "blue",
            Self::Indigo => "indigo",
            Self::Purple => "purple",
            Self::Pink => "pink",
            Self::Gray => "gray",
        }
    }
}

impl FromStr for RoleColor {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "red" => Ok(Self::Red),
            "orange" => Ok(Self::Orange),
            "amber" => Ok(Self::Amber),
            "yellow" => Ok(Self::Yellow),
            "green" => Ok(Self::Green),
            "teal" => Ok(Self::Teal),
            "blue" => Ok(Self::Blue),
            "indigo" => Ok(Self::Indigo),
            "purple" => Ok(Self::Purple),
            "pink" => Ok(Self::Pink),
            "gray" => Ok(Self::Gray),
            _ => Err(AppError::Validation(format!("unknown role color '{value}'"))),
        }
    }
}

/// What a role grants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RoleAccess {
    /// Every current and future permission; never authored explicitly.
    Administrator,
    /// An explicit permission set.
    Standard {
        /// Granted permission ids.
        permissions: BTreeSet<PermissionId>,
    },
}

impl RoleAccess {
    /// Returns whether the access grants `id`.
    #[must_use]
    pub fn grants(&self, id: PermissionId) -> bool {
        match self {
            Self::Administrator => true,
            Self::Standard { permissions } => permissions.contains(&id),
        }
    }
}

/// Descriptive role attributes shown in the role list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleProfile {
    /// Default display name.
    pub display_name: String,
    /// Localized display name.
    pub display_name_localized: Option<String>,
    /// Default description.
    pub description: Option<String>,
    /// Localized description.
    pub description_localized: Option<String>,
    /// Badge color.
    pub color: RoleColor,
    /// Icon identifier understood by the host UI.
    pub icon: Option<String>,
}

/// Persisted role with its resolved access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Role {
    id: RoleId,
    name: RoleName,
    display_name: NonEmptyString,
    profile: RoleProfile,
    is_system: bool,
    access: RoleAccess,
}

impl Role {
    /// Creates a role.
    ///
    /// A role named `administrator` always resolves to
    /// [`RoleAccess::Administrator`] and is always a system role; `is_system`
    /// and `permissions` are ignored for it.
    pub fn new(
        id: RoleId,
        name: RoleName,
        profile: RoleProfile,
        is_system: bool,
        permissions: impl IntoIterator<Item = PermissionId>,
    ) -> AppResult<Self> {
        let display_name = NonEmptyString::for_field("displayName", profile.display_name.clone())?;
        let is_system = is_system || name.is_administrator();
        let access = if name.is_administrator() {
            RoleAccess::Administrator
        } else {
            RoleAccess::Standard {
                permissions: permissions.into_iter().collect(),
            }
        };

        Ok(Self {
            id,
            name,
            display_name,
            profile,
            is_system,
            access,
        })
    }

    /// Returns the role identifier.
    #[must_use]
    pub fn id(&self) -> RoleId {
        self.id
    }

    /// Returns the role slug.
    #[must_use]
    pub fn name(&self) -> &RoleName {
        &self.name
    }

    /// Returns the validated display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    /// Returns descriptive attributes.
    #[must_use]
    pub fn profile(&self) -> &RoleProfile {
        &self.profile
    }

    /// Returns whether the role is system-managed.
    #[must_use]
    pub fn is_system(&self) -> bool {
        self.is_system
    }

    /// Returns the resolved access.
    #[must_use]
    pub fn access(&self) -> &RoleAccess {
        &self.access
    }

    /// Returns whether this role implicitly holds every permission.
    #[must_use]
    pub fn is_administrator(&self) -> bool {
        matches!(self.access, RoleAccess::Administrator)
    }

    /// Returns whether the role grants `id`.
    #[must_use]
    pub fn grants(&self, id: PermissionId) -> bool {
        self.access.grants(id)
    }

    /// Returns the explicit permission ids, or `None` for the administrator.
    #[must_use]
    pub fn explicit_permissions(&self) -> Option<&BTreeSet<PermissionId>> {
        match &self.access {
            RoleAccess::Administrator => None,
            RoleAccess::Standard { permissions } => Some(permissions),
        }
    }

    /// Returns the role's grants as a selection over `catalog`.
    ///
    /// The administrator selects the whole catalog.
    #[must_use]
    pub fn effective_selection(&self, catalog: &PermissionCatalog) -> SelectionState {
        match &self.access {
            RoleAccess::Administrator => SelectionState::from_ids(catalog.ids()),
            RoleAccess::Standard { permissions } => {
                SelectionState::from_ids(permissions.iter().copied())
                    .retain_known(&catalog.ids())
            }
        }
    }

    /// Returns how many catalog permissions the role effectively grants.
    #[must_use]
    pub fn effective_permission_count(&self, catalog: &PermissionCatalog) -> usize {
        self.effective_selection(catalog).len()
    }
}
