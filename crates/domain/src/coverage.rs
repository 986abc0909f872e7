use serde::Serialize;

use crate::catalog::{GroupSelector, PermissionCatalog};
use crate::permission::ParentSection;
use crate::selection::{GroupProgress, GroupState, SelectionState};

/// Derived tri-state of one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionCoverage {
    /// Section slug.
    pub section: String,
    /// Selected over total members.
    pub progress: GroupProgress,
    /// Tri-state status.
    pub state: GroupState,
}

/// Derived tri-state of one parent section and its sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParentCoverage {
    /// Parent section.
    pub parent_section: ParentSection,
    /// Selected over total members.
    pub progress: GroupProgress,
    /// Tri-state status.
    pub state: GroupState,
    /// Per-section breakdown in slug order.
    pub sections: Vec<SectionCoverage>,
}

/// Snapshot of every grouping level for one selection.
///
/// Built from scratch on each call; holding one across selection changes
/// gives stale numbers, so callers rebuild instead of patching it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverageReport {
    /// Whole-catalog progress.
    pub overall: GroupProgress,
    /// Sensitive pseudo-group progress.
    pub sensitive: GroupProgress,
    /// Sensitive pseudo-group status.
    pub sensitive_state: GroupState,
    /// Parent sections in declaration order, skipping empty ones.
    pub parents: Vec<ParentCoverage>,
}

/// Computes the coverage of `selection` over `catalog`.
#[must_use]
pub fn catalog_coverage(catalog: &PermissionCatalog, selection: &SelectionState) -> CoverageReport {
    let parents = ParentSection::all()
        .iter()
        .filter_map(|parent| {
            let members = catalog.members(&GroupSelector::Parent(*parent));
            if members.is_empty() {
                return None;
            }

            let sections = catalog
                .sections_of(*parent)
                .into_iter()
                .map(|section| {
                    let section_members: Vec<_> = members
                        .iter()
                        .copied()
                        .filter(|id| {
                            catalog
                                .get(*id)
                                .is_some_and(|permission| permission.section() == section)
                        })
                        .collect();
                    SectionCoverage {
                        section: section.to_owned(),
                        progress: selection.progress(&section_members),
                        state: selection.group_state(&section_members),
                    }
                })
                .collect();

            Some(ParentCoverage {
                parent_section: *parent,
                progress: selection.progress(&members),
                state: selection.group_state(&members),
                sections,
            })
        })
        .collect();

    let sensitive = catalog.members(&GroupSelector::Sensitive);
    CoverageReport {
        overall: selection.progress(&catalog.ids()),
        sensitive: selection.progress(&sensitive),
        sensitive_state: selection.group_state(&sensitive),
        parents,
    }
}

#[cfg(test)]
mod tests {
    use crate::permission::{ParentSection, PermissionId};
    use crate::selection::{GroupState, SelectionState};
    use crate::test_support::warehouse_scenario_catalog;

    use super::catalog_coverage;

    #[test]
    fn coverage_reports_each_level() {
        let catalog = warehouse_scenario_catalog();
        let selection = SelectionState::from_ids([1, 2, 3].map(PermissionId::new));

        let report = catalog_coverage(&catalog, &selection);

        assert_eq!(report.overall.to_string(), "3/6");
        let operations = &report.parents[0];
        assert_eq!(operations.parent_section, ParentSection::WarehouseOperations);
        assert_eq!(operations.state, GroupState::Partial);
        let states: Vec<(&str, GroupState)> = operations
            .sections
            .iter()
            .map(|section| (section.section.as_str(), section.state))
            .collect();
        assert_eq!(
            states,
            vec![
                ("inventory", GroupState::Unselected),
                ("orders", GroupState::Full)
            ]
        );
        assert_eq!(report.parents[1].state, GroupState::Unselected);
    }

    #[test]
    fn parent_state_matches_and_of_sections() {
        let catalog = warehouse_scenario_catalog();
        let selection = SelectionState::from_ids([1, 2, 3, 4, 5].map(PermissionId::new));

        let report = catalog_coverage(&catalog, &selection);

        for parent in &report.parents {
            let all_full = parent
                .sections
                .iter()
                .all(|section| section.state == GroupState::Full);
            assert_eq!(parent.state == GroupState::Full, all_full);
        }
        assert_eq!(report.parents[0].state, GroupState::Full);
    }
}
