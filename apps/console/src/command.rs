use depot_application::{RoleAdminService, RoleEditSession};
use depot_core::{AppError, AppResult};
use depot_domain::{GroupSelector, ParentSection, PermissionCatalog, Role, RoleName, count_by_role};

use crate::console_config::Language;
use crate::report::{render_matrix, render_roles, render_users};

pub const USAGE: &str = "usage: depot-console [roles | matrix <role> | users | assign <user-id> <role> | toggle <role> <group> | create <name> <display-name> [group...] | delete <role>]
groups: all, sensitive, warehouse_operations, administration, or a section slug";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Roles,
    Matrix { role: String },
    Users,
    Assign { user_id: String, role: String },
    Toggle { role: String, group: String },
    Create { name: String, display_name: String, groups: Vec<String> },
    Delete { role: String },
}

impl ConsoleCommand {
    pub fn parse(args: impl IntoIterator<Item = String>) -> AppResult<Self> {
        let args: Vec<String> = args.into_iter().collect();
        let argument = |index: usize| {
            args.get(index)
                .cloned()
                .ok_or_else(|| AppError::Validation(USAGE.to_owned()))
        };

        match args.first().map(String::as_str) {
            None | Some("roles") => Ok(Self::Roles),
            Some("users") => Ok(Self::Users),
            Some("matrix") => Ok(Self::Matrix { role: argument(1)? }),
            Some("assign") => Ok(Self::Assign {
                user_id: argument(1)?,
                role: argument(2)?,
            }),
            Some("toggle") => Ok(Self::Toggle {
                role: argument(1)?,
                group: argument(2)?,
            }),
            Some("create") => Ok(Self::Create {
                name: argument(1)?,
                display_name: argument(2)?,
                groups: args.iter().skip(3).cloned().collect(),
            }),
            Some("delete") => Ok(Self::Delete { role: argument(1)? }),
            Some(_) => Err(AppError::Validation(USAGE.to_owned())),
        }
    }

    pub async fn run(&self, service: &RoleAdminService, language: Language) -> AppResult<String> {
        match self {
            Self::Roles => {
                let catalog = service.load_catalog().await?;
                let roles = service.list_roles().await?;
                let headcount = service.headcount().await?;
                let rows: Vec<_> = roles
                    .iter()
                    .map(|role| (role, service.role_coverage(role, &catalog)))
                    .collect();

                Ok(render_roles(&rows, &headcount, language))
            }
            Self::Matrix { role } => {
                let catalog = service.load_catalog().await?;
                let role = find_role(service, role).await?;

                Ok(render_matrix(
                    &role,
                    &service.role_coverage(&role, &catalog),
                    language,
                ))
            }
            Self::Users => {
                let users = service.list_users().await?;
                Ok(render_users(&users, &count_by_role(&users)))
            }
            Self::Assign { user_id, role } => {
                let role_name = RoleName::new(role)?;
                service
                    .assign_user_role(user_id, role_name.as_str())
                    .await?;

                let users = service.list_users().await?;
                Ok(render_users(&users, &count_by_role(&users)))
            }
            Self::Toggle { role, group } => {
                let catalog = service.load_catalog().await?;
                let role = find_role(service, role).await?;
                let selector = parse_group(&catalog, group)?;

                let mut session = RoleEditSession::open_update(&role);
                session.click_group(&catalog, &selector)?;
                let saved = service.save_session(&mut session).await?;

                Ok(render_matrix(
                    &saved,
                    &service.role_coverage(&saved, &catalog),
                    language,
                ))
            }
            Self::Create {
                name,
                display_name,
                groups,
            } => {
                let catalog = service.load_catalog().await?;
                let mut session = RoleEditSession::open_create();
                session.set_name(name.as_str())?;
                session.profile_mut().display_name.clone_from(display_name);
                for group in groups {
                    session.set_group(&catalog, &parse_group(&catalog, group)?, true)?;
                }
                let saved = service.save_session(&mut session).await?;

                Ok(render_matrix(
                    &saved,
                    &service.role_coverage(&saved, &catalog),
                    language,
                ))
            }
            Self::Delete { role } => {
                let role = find_role(service, role).await?;
                service.delete_role(role.id()).await?;

                Ok(format!("deleted role '{}'", role.name()))
            }
        }
    }
}

async fn find_role(service: &RoleAdminService, raw_name: &str) -> AppResult<Role> {
    let name = RoleName::new(raw_name)?;
    service
        .list_roles()
        .await?
        .into_iter()
        .find(|role| role.name() == &name)
        .ok_or_else(|| AppError::NotFound(format!("role '{name}' does not exist")))
}

fn parse_group(catalog: &PermissionCatalog, raw: &str) -> AppResult<GroupSelector> {
    match raw {
        "all" => return Ok(GroupSelector::Everything),
        "sensitive" => return Ok(GroupSelector::Sensitive),
        _ => {}
    }
    if let Ok(parent) = raw.parse::<ParentSection>() {
        return Ok(GroupSelector::Parent(parent));
    }
    if catalog.section_ids(raw).is_empty() {
        return Err(AppError::Validation(format!(
            "unknown permission group '{raw}'"
        )));
    }

    Ok(GroupSelector::section(raw))
}

#[cfg(test)]
mod tests {
    use depot_core::AppError;

    use crate::backend::ConsoleBackend;
    use crate::console_config::{ConsoleConfig, Language};

    use super::ConsoleCommand;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| (*value).to_owned()).collect()
    }

    fn backend() -> ConsoleBackend {
        let config = ConsoleConfig {
            api_url: None,
            api_token: None,
            timeout: std::time::Duration::from_secs(1),
            language: Language::English,
        };
        ConsoleBackend::connect(&config).unwrap_or_else(|_| unreachable!())
    }

    #[test]
    fn parses_commands() {
        assert_eq!(ConsoleCommand::parse(args(&[])), Ok(ConsoleCommand::Roles));
        assert_eq!(
            ConsoleCommand::parse(args(&["create", "Night Shift", "Night Shift", "orders", "stock"])),
            Ok(ConsoleCommand::Create {
                name: "Night Shift".to_owned(),
                display_name: "Night Shift".to_owned(),
                groups: vec!["orders".to_owned(), "stock".to_owned()],
            })
        );
        assert!(matches!(
            ConsoleCommand::parse(args(&["matrix"])),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            ConsoleCommand::parse(args(&["launch"])),
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn toggle_fills_partial_section() {
        let backend = backend();
        let command = ConsoleCommand::parse(args(&["toggle", "Warehouse Staff", "orders"]))
            .unwrap_or_else(|_| unreachable!());

        let output = command
            .run(&backend.service, Language::English)
            .await
            .unwrap_or_default();

        assert!(output.contains("    [x] orders 5/5"));
    }

    #[tokio::test]
    async fn create_selects_requested_groups() {
        let backend = backend();
        let command =
            ConsoleCommand::parse(args(&["create", "Night Shift", "Night Shift", "orders"]))
                .unwrap_or_else(|_| unreachable!());

        let output = command
            .run(&backend.service, Language::English)
            .await
            .unwrap_or_default();

        assert!(output.starts_with("Night Shift (night_shift): 5/57 permissions"));
    }

    #[tokio::test]
    async fn administrator_groups_cannot_be_toggled() {
        let backend = backend();
        let command = ConsoleCommand::parse(args(&["toggle", "administrator", "orders"]))
            .unwrap_or_else(|_| unreachable!());

        let result = command.run(&backend.service, Language::English).await;

        assert!(matches!(result, Err(AppError::ProtectedEntity(_))));
    }

    #[tokio::test]
    async fn unknown_group_is_rejected() {
        let backend = backend();
        let command = ConsoleCommand::parse(args(&["toggle", "manager", "payroll"]))
            .unwrap_or_else(|_| unreachable!());

        let result = command.run(&backend.service, Language::English).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
