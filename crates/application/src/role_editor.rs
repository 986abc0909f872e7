//! One in-progress role edit: form values, the live permission selection and
//! the save lifecycle.

use depot_core::{AppError, AppResult};
use depot_domain::{
    CoverageReport, GroupSelector, GroupState, PermissionCatalog, PermissionId, Role, RoleId,
    RoleName, RoleProfile, SelectionState, catalog_coverage,
};
use tracing::debug;

use crate::role_admin_ports::RoleDraft;

/// Which role the session writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditTarget {
    /// A role that does not exist yet.
    Create,
    /// An existing role.
    Update {
        /// Role being edited.
        role_id: RoleId,
        /// Name at the time the session opened.
        original_name: RoleName,
        /// Whether the role is system-managed (name locked).
        is_system: bool,
    },
}

/// Where a session is in its save lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorPhase {
    /// Form open, nothing in flight.
    Editing,
    /// A save request is in flight; the selection stays mutable.
    Saving,
    /// Saved successfully; the host returns to the role list.
    Closed,
}

/// Permission editing surface of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessEditor {
    /// Administrator: implicit access, nothing to edit.
    AllAccess,
    /// Explicit permission selection.
    Explicit(SelectionState),
}

/// Snapshot of a session handed to the role store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleSaveRequest {
    /// Role to create or update.
    pub target: SaveTarget,
    /// Form values and selection at the time of the save click.
    pub draft: RoleDraft,
}

/// Store call a save request resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveTarget {
    /// `create_role`.
    Create,
    /// `update_role`.
    Update(RoleId),
}

/// Editing session for one role.
#[derive(Debug, Clone)]
pub struct RoleEditSession {
    target: EditTarget,
    name: String,
    profile: RoleProfile,
    access: AccessEditor,
    phase: EditorPhase,
    last_error: Option<AppError>,
    saved_role: Option<Role>,
}

impl RoleEditSession {
    /// Opens an empty create form.
    #[must_use]
    pub fn open_create() -> Self {
        Self {
            target: EditTarget::Create,
            name: String::new(),
            profile: RoleProfile::default(),
            access: AccessEditor::Explicit(SelectionState::empty()),
            phase: EditorPhase::Editing,
            last_error: None,
            saved_role: None,
        }
    }

    /// Opens an edit form seeded from an existing role.
    #[must_use]
    pub fn open_update(role: &Role) -> Self {
        let access = match role.explicit_permissions() {
            None => AccessEditor::AllAccess,
            Some(permissions) => {
                AccessEditor::Explicit(SelectionState::from_ids(permissions.iter().copied()))
            }
        };

        Self {
            target: EditTarget::Update {
                role_id: role.id(),
                original_name: role.name().clone(),
                is_system: role.is_system(),
            },
            name: role.name().as_str().to_owned(),
            profile: role.profile().clone(),
            access,
            phase: EditorPhase::Editing,
            last_error: None,
            saved_role: None,
        }
    }

    /// Returns the edit target.
    #[must_use]
    pub fn target(&self) -> &EditTarget {
        &self.target
    }

    /// Returns the lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> EditorPhase {
        self.phase
    }

    /// Returns the error of the last failed save, if any.
    #[must_use]
    pub fn last_error(&self) -> Option<&AppError> {
        self.last_error.as_ref()
    }

    /// Returns the role stored by the last successful save.
    #[must_use]
    pub fn saved_role(&self) -> Option<&Role> {
        self.saved_role.as_ref()
    }

    /// Returns the name field as typed.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns whether the name field is read-only (system roles).
    #[must_use]
    pub fn is_name_locked(&self) -> bool {
        matches!(
            self.target,
            EditTarget::Update {
                is_system: true,
                ..
            }
        )
    }

    /// Updates the name field.
    pub fn set_name(&mut self, name: impl Into<String>) -> AppResult<()> {
        if self.is_name_locked() {
            return Err(AppError::ProtectedEntity(
                "system role names cannot be changed".to_owned(),
            ));
        }

        self.name = name.into();
        Ok(())
    }

    /// Returns the descriptive attributes.
    #[must_use]
    pub fn profile(&self) -> &RoleProfile {
        &self.profile
    }

    /// Returns the descriptive attributes for editing.
    pub fn profile_mut(&mut self) -> &mut RoleProfile {
        &mut self.profile
    }

    /// Returns the permission editing surface.
    #[must_use]
    pub fn access(&self) -> &AccessEditor {
        &self.access
    }

    /// Returns the live selection, or `None` when the role has all access.
    #[must_use]
    pub fn selection(&self) -> Option<&SelectionState> {
        match &self.access {
            AccessEditor::AllAccess => None,
            AccessEditor::Explicit(selection) => Some(selection),
        }
    }

    /// Returns the tri-state of a grouping level.
    ///
    /// All-access sessions report every non-empty group as full.
    #[must_use]
    pub fn group_state(&self, catalog: &PermissionCatalog, selector: &GroupSelector) -> GroupState {
        let members = catalog.members(selector);
        match &self.access {
            AccessEditor::AllAccess if members.is_empty() => GroupState::Unselected,
            AccessEditor::AllAccess => GroupState::Full,
            AccessEditor::Explicit(selection) => selection.group_state(&members),
        }
    }

    /// Returns the coverage report of the live selection.
    #[must_use]
    pub fn coverage(&self, catalog: &PermissionCatalog) -> CoverageReport {
        match &self.access {
            AccessEditor::AllAccess => {
                catalog_coverage(catalog, &SelectionState::from_ids(catalog.ids()))
            }
            AccessEditor::Explicit(selection) => catalog_coverage(catalog, selection),
        }
    }

    /// Flips one permission.
    pub fn toggle_permission(&mut self, id: PermissionId) -> AppResult<()> {
        self.apply(|selection| selection.toggle_leaf(id))?;
        debug!(permission_id = %id, "toggled permission");
        Ok(())
    }

    /// Applies a group checkbox click (not full → full, full → cleared).
    pub fn click_group(
        &mut self,
        catalog: &PermissionCatalog,
        selector: &GroupSelector,
    ) -> AppResult<()> {
        let members = catalog.members(selector);
        self.apply(|selection| selection.click_group(&members))?;
        debug!(group = ?selector, members = members.len(), "clicked permission group");
        Ok(())
    }

    /// Selects or clears a whole grouping level.
    pub fn set_group(
        &mut self,
        catalog: &PermissionCatalog,
        selector: &GroupSelector,
        selected: bool,
    ) -> AppResult<()> {
        let members = catalog.members(selector);
        self.apply(|selection| selection.toggle_group(&members, selected))?;
        debug!(group = ?selector, selected, "set permission group");
        Ok(())
    }

    /// Builds the draft that a save would submit right now.
    #[must_use]
    pub fn draft(&self) -> RoleDraft {
        RoleDraft {
            name: self.name.clone(),
            profile: self.profile.clone(),
            permission_ids: self
                .selection()
                .map(SelectionState::to_sorted_vec)
                .unwrap_or_default(),
        }
    }

    /// Starts a save and snapshots the current state.
    ///
    /// Only one save may be in flight. Validation failures keep the session
    /// in [`EditorPhase::Editing`].
    pub fn begin_save(&mut self) -> AppResult<RoleSaveRequest> {
        match self.phase {
            EditorPhase::Saving => {
                return Err(AppError::Conflict(
                    "a save is already in flight for this role".to_owned(),
                ));
            }
            EditorPhase::Closed => {
                return Err(AppError::Conflict("edit session is closed".to_owned()));
            }
            EditorPhase::Editing => {}
        }

        let draft = self.draft();
        if let Err(error) = draft.validate() {
            self.last_error = Some(error.clone());
            return Err(error);
        }

        let target = match &self.target {
            EditTarget::Create => SaveTarget::Create,
            EditTarget::Update { role_id, .. } => SaveTarget::Update(*role_id),
        };
        self.phase = EditorPhase::Saving;
        self.last_error = None;

        Ok(RoleSaveRequest { target, draft })
    }

    /// Records the outcome of the in-flight save.
    ///
    /// Failures return the session to editing with every edit preserved.
    pub fn complete_save(&mut self, outcome: &AppResult<Role>) {
        match outcome {
            Ok(role) => {
                self.phase = EditorPhase::Closed;
                self.saved_role = Some(role.clone());
                self.last_error = None;
            }
            Err(error) => {
                self.phase = EditorPhase::Editing;
                self.last_error = Some(error.clone());
            }
        }
    }

    /// Returns a session stuck in [`EditorPhase::Saving`] to editing.
    ///
    /// For hosts that drop a pending save (for example on a timeout) without
    /// an outcome to hand to [`Self::complete_save`]. The request may still
    /// reach the store. Edits are kept.
    pub fn abandon_save(&mut self) {
        if self.phase == EditorPhase::Saving {
            debug!("abandoned in-flight role save");
            self.phase = EditorPhase::Editing;
        }
    }

    /// Discards the session. An in-flight save is not cancelled.
    pub fn cancel(self) {
        debug!(phase = ?self.phase, "discarded role edit session");
    }

    fn apply(&mut self, change: impl FnOnce(&SelectionState) -> SelectionState) -> AppResult<()> {
        if self.phase == EditorPhase::Closed {
            return Err(AppError::Conflict("edit session is closed".to_owned()));
        }

        match &mut self.access {
            AccessEditor::AllAccess => Err(AppError::ProtectedEntity(
                "administrator access is implicit and cannot be edited".to_owned(),
            )),
            AccessEditor::Explicit(selection) => {
                *selection = change(selection);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use depot_core::AppError;
    use depot_domain::{
        GroupSelector, GroupState, ParentSection, Permission, PermissionCatalog, PermissionId,
        PermissionLabel, PermissionPlacement, Role, RoleId, RoleName, RoleProfile,
    };

    use super::{AccessEditor, EditorPhase, RoleEditSession, SaveTarget};

    fn permission(id: i64, section: &str, sensitive: bool) -> Permission {
        Permission::new(
            PermissionId::new(id),
            PermissionPlacement {
                parent_section: ParentSection::WarehouseOperations,
                section: section.to_owned(),
                page: "view".to_owned(),
                path: format!("/{section}"),
            },
            PermissionLabel {
                display_name: format!("{section} {id}"),
                display_name_localized: None,
                sort_order: i32::try_from(id).unwrap_or_default(),
            },
            sensitive,
        )
        .unwrap_or_else(|_| unreachable!())
    }

    fn catalog() -> PermissionCatalog {
        PermissionCatalog::new(vec![
            permission(1, "orders", false),
            permission(2, "orders", false),
            permission(3, "orders", true),
            permission(4, "inventory", false),
            permission(5, "inventory", true),
        ])
        .unwrap_or_else(|_| unreachable!())
    }

    fn role(id: i64, name: &str, is_system: bool, permissions: &[i64]) -> Role {
        Role::new(
            RoleId::new(id),
            RoleName::new(name).unwrap_or_else(|_| unreachable!()),
            RoleProfile {
                display_name: name.to_owned(),
                ..RoleProfile::default()
            },
            is_system,
            permissions.iter().copied().map(PermissionId::new),
        )
        .unwrap_or_else(|_| unreachable!())
    }

    #[test]
    fn create_session_starts_empty() {
        let session = RoleEditSession::open_create();

        assert_eq!(session.phase(), EditorPhase::Editing);
        assert_eq!(session.selection().map(|selection| selection.len()), Some(0));
        assert!(!session.is_name_locked());
    }

    #[test]
    fn update_session_starts_from_role_permissions() {
        let catalog = catalog();
        let session = RoleEditSession::open_update(&role(7, "picker", false, &[1, 2]));

        assert_eq!(
            session.group_state(&catalog, &GroupSelector::section("orders")),
            GroupState::Partial
        );
        assert_eq!(
            session.group_state(&catalog, &GroupSelector::section("inventory")),
            GroupState::Unselected
        );
    }

    #[test]
    fn section_click_selects_remainder_then_clears() {
        let catalog = catalog();
        let orders = GroupSelector::section("orders");
        let mut session = RoleEditSession::open_update(&role(7, "picker", false, &[1, 4]));

        assert!(session.click_group(&catalog, &orders).is_ok());
        assert_eq!(session.group_state(&catalog, &orders), GroupState::Full);

        assert!(session.click_group(&catalog, &orders).is_ok());
        assert_eq!(session.group_state(&catalog, &orders), GroupState::Unselected);
        assert_eq!(
            session.selection().map(|selection| selection.to_sorted_vec()),
            Some(vec![PermissionId::new(4)])
        );
    }

    #[test]
    fn administrator_session_has_no_permission_editor() {
        let catalog = catalog();
        let mut session = RoleEditSession::open_update(&role(1, "administrator", true, &[]));

        assert_eq!(session.access(), &AccessEditor::AllAccess);
        assert!(session.selection().is_none());
        assert!(matches!(
            session.toggle_permission(PermissionId::new(1)),
            Err(AppError::ProtectedEntity(_))
        ));
        assert!(matches!(
            session.click_group(&catalog, &GroupSelector::Sensitive),
            Err(AppError::ProtectedEntity(_))
        ));
        assert_eq!(
            session.group_state(&catalog, &GroupSelector::Everything),
            GroupState::Full
        );
        assert_eq!(session.coverage(&catalog).overall.to_string(), "5/5");

        let request = session.begin_save().unwrap_or_else(|_| unreachable!());
        assert!(request.draft.permission_ids.is_empty());
    }

    #[test]
    fn system_role_name_is_locked() {
        let mut session = RoleEditSession::open_update(&role(2, "manager", true, &[1]));

        assert!(session.is_name_locked());
        assert!(matches!(
            session.set_name("boss"),
            Err(AppError::ProtectedEntity(_))
        ));
        assert_eq!(session.name(), "manager");
    }

    #[test]
    fn only_one_save_may_be_in_flight() {
        let mut session = RoleEditSession::open_update(&role(7, "picker", false, &[1]));

        let first = session.begin_save();
        assert!(matches!(
            first.map(|request| request.target),
            Ok(SaveTarget::Update(id)) if id == RoleId::new(7)
        ));
        assert_eq!(session.phase(), EditorPhase::Saving);
        assert!(matches!(session.begin_save(), Err(AppError::Conflict(_))));
    }

    #[test]
    fn selection_stays_mutable_while_saving() {
        let mut session = RoleEditSession::open_update(&role(7, "picker", false, &[1]));
        let request = session.begin_save().unwrap_or_else(|_| unreachable!());

        assert!(session.toggle_permission(PermissionId::new(2)).is_ok());
        assert_eq!(request.draft.permission_ids, vec![PermissionId::new(1)]);

        session.complete_save(&Err(AppError::Transport("offline".to_owned())));
        let retry = session.begin_save().unwrap_or_else(|_| unreachable!());
        assert_eq!(
            retry.draft.permission_ids,
            vec![PermissionId::new(1), PermissionId::new(2)]
        );
    }

    #[test]
    fn failed_save_preserves_edits() {
        let mut session = RoleEditSession::open_create();
        assert!(session.set_name("Night Shift").is_ok());
        session.profile_mut().display_name = "Night Shift".to_owned();
        assert!(session.toggle_permission(PermissionId::new(3)).is_ok());

        assert!(session.begin_save().is_ok());
        session.complete_save(&Err(AppError::Validation(
            "role 'night_shift' already exists".to_owned(),
        )));

        assert_eq!(session.phase(), EditorPhase::Editing);
        assert!(matches!(session.last_error(), Some(AppError::Validation(_))));
        assert_eq!(session.name(), "Night Shift");
        assert_eq!(
            session.selection().map(|selection| selection.len()),
            Some(1)
        );
    }

    #[test]
    fn invalid_form_does_not_enter_saving() {
        let mut session = RoleEditSession::open_create();

        assert!(matches!(session.begin_save(), Err(AppError::Validation(_))));
        assert_eq!(session.phase(), EditorPhase::Editing);
        assert!(session.last_error().is_some());
    }

    #[test]
    fn abandoned_save_returns_to_editing_with_edits() {
        let mut session = RoleEditSession::open_update(&role(7, "picker", false, &[1]));
        assert!(session.begin_save().is_ok());
        assert!(session.toggle_permission(PermissionId::new(2)).is_ok());

        session.abandon_save();

        assert_eq!(session.phase(), EditorPhase::Editing);
        let retry = session.begin_save().unwrap_or_else(|_| unreachable!());
        assert_eq!(
            retry.draft.permission_ids,
            vec![PermissionId::new(1), PermissionId::new(2)]
        );
    }

    #[test]
    fn abandon_does_not_reopen_closed_session() {
        let saved = role(9, "picker", false, &[1]);
        let mut session = RoleEditSession::open_update(&saved);
        assert!(session.begin_save().is_ok());
        session.complete_save(&Ok(saved));

        session.abandon_save();

        assert_eq!(session.phase(), EditorPhase::Closed);
    }

    #[test]
    fn successful_save_closes_session() {
        let saved = role(9, "picker", false, &[1]);
        let mut session = RoleEditSession::open_update(&saved);

        assert!(session.begin_save().is_ok());
        session.complete_save(&Ok(saved.clone()));

        assert_eq!(session.phase(), EditorPhase::Closed);
        assert_eq!(session.saved_role(), Some(&saved));
        assert!(matches!(session.begin_save(), Err(AppError::Conflict(_))));
    }
}
