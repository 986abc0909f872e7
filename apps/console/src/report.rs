use std::fmt::Write;

use depot_domain::{CoverageReport, DirectoryUser, GroupState, Role, RoleHeadcount};

use crate::console_config::Language;

fn state_marker(state: GroupState) -> &'static str {
    match state {
        GroupState::Full => "[x]",
        GroupState::Partial => "[-]",
        GroupState::Unselected => "[ ]",
    }
}

fn role_label(role: &Role, language: Language) -> &str {
    language.pick(
        role.display_name(),
        role.profile().display_name_localized.as_deref(),
    )
}

/// One line per role with user count and coverage.
pub fn render_roles(
    rows: &[(&Role, CoverageReport)],
    headcount: &RoleHeadcount,
    language: Language,
) -> String {
    let mut output = format!(
        "{:<24} {:<20} {:>5} {:>9} {:>9}\n",
        "ROLE", "NAME", "USERS", "GRANTED", "SENSITIVE"
    );
    for (role, coverage) in rows {
        let users = headcount
            .by_role
            .get(role.name().as_str())
            .copied()
            .unwrap_or_default();
        let mut flags = Vec::new();
        if role.is_system() {
            flags.push("system");
        }
        if role.is_administrator() {
            flags.push("all access");
        }

        let _ = writeln!(
            output,
            "{:<24} {:<20} {:>5} {:>9} {:>9} {}",
            role_label(role, language),
            role.name().as_str(),
            users,
            coverage.overall.to_string(),
            coverage.sensitive.to_string(),
            flags.join(", ")
        );
    }

    output.trim_end().to_owned()
}

/// Tri-state matrix of one role.
pub fn render_matrix(role: &Role, coverage: &CoverageReport, language: Language) -> String {
    let mut output = format!(
        "{} ({}): {} permissions\n",
        role_label(role, language),
        role.name(),
        coverage.overall
    );
    for parent in &coverage.parents {
        let _ = writeln!(
            output,
            "{} {} {}",
            state_marker(parent.state),
            parent.parent_section,
            parent.progress
        );
        for section in &parent.sections {
            let _ = writeln!(
                output,
                "    {} {} {}",
                state_marker(section.state),
                section.section,
                section.progress
            );
        }
    }
    let _ = write!(
        output,
        "{} sensitive {}",
        state_marker(coverage.sensitive_state),
        coverage.sensitive
    );

    output
}

/// Directory listing with a per-role headcount footer.
pub fn render_users(users: &[DirectoryUser], headcount: &RoleHeadcount) -> String {
    let mut output = String::new();
    for user in users {
        let _ = writeln!(
            output,
            "{:<8} {:<24} {:<32} {}",
            user.id,
            user.display_label(),
            user.email.as_deref().unwrap_or("-"),
            user.role
        );
    }

    let by_role = headcount
        .by_role
        .iter()
        .map(|(role, count)| format!("{role}={count}"))
        .collect::<Vec<_>>()
        .join(" ");
    let _ = write!(output, "{} users: {by_role}", headcount.total);

    output
}

#[cfg(test)]
mod tests {
    use depot_domain::{DirectoryUser, catalog_coverage, count_by_role};
    use depot_infrastructure::{default_catalog, default_roles};

    use crate::console_config::Language;

    use super::{render_matrix, render_roles, render_users};

    #[test]
    fn roles_report_lists_counts_and_flags() {
        let catalog = default_catalog().unwrap_or_default();
        let roles = default_roles(&catalog).unwrap_or_default();
        let rows: Vec<_> = roles
            .iter()
            .map(|role| (role, catalog_coverage(&catalog, &role.effective_selection(&catalog))))
            .collect();

        let output = render_roles(&rows, &Default::default(), Language::English);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("Administrator"));
        assert!(lines[1].contains("57/57"));
        assert!(lines[1].ends_with("system, all access"));
        assert!(lines[3].contains("warehouse_staff"));
    }

    #[test]
    fn matrix_marks_partial_groups() {
        let catalog = default_catalog().unwrap_or_default();
        let roles = default_roles(&catalog).unwrap_or_default();
        let manager = &roles[1];
        let coverage = catalog_coverage(&catalog, &manager.effective_selection(&catalog));

        let output = render_matrix(manager, &coverage, Language::Vietnamese);

        assert!(output.starts_with("Quản lý (manager)"));
        assert!(output.contains("[x] warehouse_operations"));
        assert!(output.contains("[-] administration"));
        assert!(output.contains("    [ ] settings"));
    }

    #[test]
    fn users_report_falls_back_to_placeholder_label() {
        let users = vec![DirectoryUser {
            id: "u-9".to_owned(),
            email: None,
            first_name: None,
            last_name: None,
            role: "retired".to_owned(),
            created_at: None,
        }];

        let output = render_users(&users, &count_by_role(&users));

        assert!(output.contains("Unknown User"));
        assert!(output.ends_with("1 users: retired=1"));
    }
}
