use std::sync::Arc;

use depot_application::{RoleAdminService, RosterEvent};
use depot_core::AppResult;
use depot_domain::DirectoryUser;
use depot_infrastructure::{
    BroadcastRosterEventSink, InMemoryPermissionCatalogProvider, InMemoryRoleStore,
    InMemoryUserDirectory, RestBackOfficeClient, default_catalog,
};
use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::console_config::ConsoleConfig;

const ROSTER_EVENT_CAPACITY: usize = 16;

const DEMO_USERS: &[(&str, &str, &str, &str, &str)] = &[
    ("u-1", "admin@depot.local", "Minh", "Tran", "administrator"),
    ("u-2", "lan.nguyen@depot.local", "Lan", "Nguyen", "manager"),
    ("u-3", "huy.pham@depot.local", "Huy", "Pham", "warehouse_staff"),
    ("u-4", "picker@depot.local", "", "", "warehouse_staff"),
];

pub struct ConsoleBackend {
    pub service: RoleAdminService,
    roster_events: broadcast::Receiver<RosterEvent>,
}

impl ConsoleBackend {
    pub fn connect(config: &ConsoleConfig) -> AppResult<Self> {
        let event_sink = BroadcastRosterEventSink::new(ROSTER_EVENT_CAPACITY);
        let roster_events = event_sink.subscribe();
        let event_sink = Arc::new(event_sink);

        let service = match &config.api_url {
            Some(api_url) => {
                info!(api_url = %api_url, "using back-office API");
                let client = Arc::new(RestBackOfficeClient::new(
                    api_url.clone(),
                    config.api_token.clone(),
                    config.timeout,
                )?);
                RoleAdminService::new(client.clone(), client.clone(), client, event_sink)
            }
            None => {
                info!("DEPOT_API_URL not set, using seeded in-memory back office");
                let catalog = default_catalog()?;
                let role_store = InMemoryRoleStore::with_system_roles(&catalog)?;
                RoleAdminService::new(
                    Arc::new(InMemoryPermissionCatalogProvider::new(catalog)),
                    Arc::new(role_store),
                    Arc::new(InMemoryUserDirectory::new(demo_users())),
                    event_sink,
                )
            }
        };

        Ok(Self {
            service,
            roster_events,
        })
    }

    /// Drains the invalidations raised by the last command.
    pub fn drain_roster_events(&mut self) -> Vec<RosterEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.roster_events.try_recv() {
            debug!(?event, "roster invalidated");
            events.push(event);
        }

        events
    }
}

fn demo_users() -> Vec<DirectoryUser> {
    DEMO_USERS
        .iter()
        .map(|(id, email, first_name, last_name, role)| DirectoryUser {
            id: (*id).to_owned(),
            email: Some((*email).to_owned()),
            first_name: Some((*first_name).to_owned()).filter(|value| !value.is_empty()),
            last_name: Some((*last_name).to_owned()).filter(|value| !value.is_empty()),
            role: (*role).to_owned(),
            created_at: Some("2025-01-06T08:00:00Z".to_owned()),
        })
        .collect()
}
