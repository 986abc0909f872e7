use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::permission::PermissionId;

/// Selection status of a group, always derived from its members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupState {
    /// No member is selected, or the group has no members.
    Unselected,
    /// At least one but not every member is selected.
    Partial,
    /// Every member of a non-empty group is selected.
    Full,
}

/// Progress badge values for a group (`selected/total`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupProgress {
    /// Selected member count.
    pub selected: usize,
    /// Distinct member count.
    pub total: usize,
}

impl Display for GroupProgress {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}/{}", self.selected, self.total)
    }
}

/// Permission ids attached to the role currently being authored.
///
/// Mutators never touch `self`; they return the next state so the editing
/// session decides when to swap it in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionState {
    ids: BTreeSet<PermissionId>,
}

impl SelectionState {
    /// Creates an empty selection, as used when opening a create form.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a selection from existing ids, as used when opening an edit form.
    #[must_use]
    pub fn from_ids(ids: impl IntoIterator<Item = PermissionId>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    /// Returns whether the id is selected.
    #[must_use]
    pub fn contains(&self, id: PermissionId) -> bool {
        self.ids.contains(&id)
    }

    /// Returns the selected ids.
    #[must_use]
    pub fn ids(&self) -> &BTreeSet<PermissionId> {
        &self.ids
    }

    /// Returns the selected ids in ascending order.
    #[must_use]
    pub fn to_sorted_vec(&self) -> Vec<PermissionId> {
        self.ids.iter().copied().collect()
    }

    /// Returns the number of selected ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns the number of distinct group members that are selected.
    #[must_use]
    pub fn selected_count(&self, group: &[PermissionId]) -> usize {
        distinct(group)
            .into_iter()
            .filter(|id| self.ids.contains(id))
            .count()
    }

    /// Returns the number of distinct group members.
    #[must_use]
    pub fn total_count(&self, group: &[PermissionId]) -> usize {
        distinct(group).len()
    }

    /// Returns the progress badge values for a group.
    #[must_use]
    pub fn progress(&self, group: &[PermissionId]) -> GroupProgress {
        GroupProgress {
            selected: self.selected_count(group),
            total: self.total_count(group),
        }
    }

    /// Returns whether a non-empty group is entirely selected.
    #[must_use]
    pub fn is_group_fully_selected(&self, group: &[PermissionId]) -> bool {
        !group.is_empty() && group.iter().all(|id| self.ids.contains(id))
    }

    /// Returns whether some, but not all, group members are selected.
    #[must_use]
    pub fn is_group_partially_selected(&self, group: &[PermissionId]) -> bool {
        let progress = self.progress(group);
        progress.selected > 0 && progress.selected < progress.total
    }

    /// Returns the tri-state status of a group.
    #[must_use]
    pub fn group_state(&self, group: &[PermissionId]) -> GroupState {
        if self.is_group_fully_selected(group) {
            GroupState::Full
        } else if self.is_group_partially_selected(group) {
            GroupState::Partial
        } else {
            GroupState::Unselected
        }
    }

    /// Selects (`target == true`) or clears every member of a group.
    ///
    /// Ids outside the group are left untouched.
    #[must_use]
    pub fn toggle_group(&self, group: &[PermissionId], target: bool) -> Self {
        let mut ids = self.ids.clone();
        if target {
            ids.extend(group.iter().copied());
        } else {
            for id in group {
                ids.remove(id);
            }
        }

        Self { ids }
    }

    /// Applies a click on a group checkbox.
    ///
    /// A group that is not fully selected (empty or partial) becomes fully
    /// selected; a fully selected group is cleared.
    #[must_use]
    pub fn click_group(&self, group: &[PermissionId]) -> Self {
        let target = !self.is_group_fully_selected(group);
        self.toggle_group(group, target)
    }

    /// Flips a single permission.
    #[must_use]
    pub fn toggle_leaf(&self, id: PermissionId) -> Self {
        let mut ids = self.ids.clone();
        if !ids.remove(&id) {
            ids.insert(id);
        }

        Self { ids }
    }

    /// Drops ids the catalog no longer knows about.
    #[must_use]
    pub fn retain_known(&self, known: &[PermissionId]) -> Self {
        let known = distinct(known);
        Self {
            ids: self.ids.intersection(&known).copied().collect(),
        }
    }
}

fn distinct(group: &[PermissionId]) -> BTreeSet<PermissionId> {
    group.iter().copied().collect()
}
