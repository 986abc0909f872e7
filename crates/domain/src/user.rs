//! Directory users as seen by role administration.
//!
//! Only the `role` field is writable from this side; the rest is display data.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::role::ADMINISTRATOR_ROLE_NAME;

/// Label used when a user has neither a name nor an email.
pub const UNKNOWN_USER_LABEL: &str = "Unknown User";

/// User record from the user directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryUser {
    /// Directory identifier.
    pub id: String,
    /// Email, when known.
    pub email: Option<String>,
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
    /// Assigned role name; may dangle after the role is deleted.
    pub role: String,
    /// Creation timestamp in RFC3339.
    pub created_at: Option<String>,
}

impl DirectoryUser {
    /// Returns the full name, falling back to the email, then a placeholder.
    #[must_use]
    pub fn display_label(&self) -> String {
        let full_name = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if !full_name.is_empty() {
            return full_name;
        }

        self.email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty())
            .map_or_else(|| UNKNOWN_USER_LABEL.to_owned(), str::to_owned)
    }

    /// Returns whether the user holds the administrator role.
    #[must_use]
    pub fn is_administrator(&self) -> bool {
        self.role == ADMINISTRATOR_ROLE_NAME
    }
}

/// Number of users per assigned role name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoleHeadcount {
    /// Total users in the directory.
    pub total: usize,
    /// Users holding the administrator role.
    pub administrators: usize,
    /// Users per role name, including dangling names.
    pub by_role: BTreeMap<String, usize>,
}

/// Counts users per role.
#[must_use]
pub fn count_by_role(users: &[DirectoryUser]) -> RoleHeadcount {
    let mut headcount = RoleHeadcount {
        total: users.len(),
        ..RoleHeadcount::default()
    };
    for user in users {
        if user.is_administrator() {
            headcount.administrators += 1;
        }
        *headcount.by_role.entry(user.role.clone()).or_default() += 1;
    }

    headcount
}
