use std::fmt::{Display, Formatter};
use std::str::FromStr;

use depot_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

/// Stable identifier of a grantable permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionId(i64);

impl PermissionId {
    /// Creates a permission identifier from its stored value.
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

impl Display for PermissionId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Top-level permission grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParentSection {
    /// Day-to-day warehouse work: orders, stock, receiving.
    WarehouseOperations,
    /// Back-office administration: employees, reports, settings.
    Administration,
}

impl ParentSection {
    /// Returns a stable storage value for this parent section.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WarehouseOperations => "warehouse_operations",
            Self::Administration => "administration",
        }
    }

    /// Returns all known parent sections in display order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[ParentSection] = &[
            ParentSection::WarehouseOperations,
            ParentSection::Administration,
        ];

        ALL
    }
}

impl FromStr for ParentSection {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "warehouse_operations" => Ok(Self::WarehouseOperations),
            "administration" => Ok(Self::Administration),
            _ => Err(AppError::Validation(format!(
                "unknown parent section '{value}'"
            ))),
        }
    }
}

impl Display for ParentSection {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Where a permission sits in the two-level catalog hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionPlacement {
    /// Top-level grouping.
    pub parent_section: ParentSection,
    /// Mid-level grouping slug, for example `orders`.
    pub section: String,
    /// Leaf descriptor, for example `view`.
    pub page: String,
    /// Route the permission guards.
    pub path: String,
}

/// Human-facing labels and ordering of a permission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionLabel {
    /// Default display name.
    pub display_name: String,
    /// Localized display name, when the server provides one.
    pub display_name_localized: Option<String>,
    /// Ascending position inside its group.
    pub sort_order: i32,
}

/// Atomic grantable capability from the server-supplied catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    id: PermissionId,
    parent_section: ParentSection,
    section: NonEmptyString,
    page: String,
    path: String,
    display_name: NonEmptyString,
    display_name_localized: Option<String>,
    is_sensitive: bool,
    sort_order: i32,
}

impl Permission {
    /// Creates a permission with validated section and display name.
    pub fn new(
        id: PermissionId,
        placement: PermissionPlacement,
        label: PermissionLabel,
        is_sensitive: bool,
    ) -> AppResult<Self> {
        Ok(Self {
            id,
            parent_section: placement.parent_section,
            section: NonEmptyString::for_field("section", placement.section)?,
            page: placement.page,
            path: placement.path,
            display_name: NonEmptyString::for_field("displayName", label.display_name)?,
            display_name_localized: label
                .display_name_localized
                .filter(|value| !value.trim().is_empty()),
            is_sensitive,
            sort_order: label.sort_order,
        })
    }

    /// Returns the permission identifier.
    #[must_use]
    pub fn id(&self) -> PermissionId {
        self.id
    }

    /// Returns the top-level grouping.
    #[must_use]
    pub fn parent_section(&self) -> ParentSection {
        self.parent_section
    }

    /// Returns the mid-level grouping slug.
    #[must_use]
    pub fn section(&self) -> &str {
        self.section.as_str()
    }

    /// Returns the leaf descriptor.
    #[must_use]
    pub fn page(&self) -> &str {
        self.page.as_str()
    }

    /// Returns the guarded route.
    #[must_use]
    pub fn path(&self) -> &str {
        self.path.as_str()
    }

    /// Returns the default display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    /// Returns the localized display name, if any.
    #[must_use]
    pub fn display_name_localized(&self) -> Option<&str> {
        self.display_name_localized.as_deref()
    }

    /// Returns whether this permission belongs to the sensitive pseudo-group.
    #[must_use]
    pub fn is_sensitive(&self) -> bool {
        self.is_sensitive
    }

    /// Returns the ordering key inside its group.
    #[must_use]
    pub fn sort_order(&self) -> i32 {
        self.sort_order
    }

    /// Ordering used by every catalog view: `sort_order`, then id.
    pub(crate) fn ordering_key(&self) -> (i32, PermissionId) {
        (self.sort_order, self.id)
    }
}
