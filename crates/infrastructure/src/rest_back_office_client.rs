use std::time::Duration;

use async_trait::async_trait;
use depot_application::{PermissionCatalogProvider, RolePayload, RoleStore, UserDirectory};
use depot_core::{AppError, AppResult};
use depot_domain::{DirectoryUser, PermissionCatalog, Role, RoleId};
use reqwest::{Method, RequestBuilder, Response, StatusCode, header};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

mod wire;


use wire::{PermissionDto, RoleDto, UserDto, UserRoleBody};

/// Back-office REST API client implementing every collaborator port.
#[derive(Debug, Clone)]
pub struct RestBackOfficeClient {
    http_client: reqwest::Client,
    base_url: Url,
    api_token: Option<String>,
}

impl RestBackOfficeClient {
    /// Creates a client for the API rooted at `base_url`.
    pub fn new(mut base_url: Url, api_token: Option<String>, timeout: Duration) -> AppResult<Self> {
        if base_url.cannot_be_a_base() {
            return Err(AppError::Validation(format!(
                "back-office URL '{base_url}' cannot be used as a base"
            )));
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| AppError::Internal(format!("failed to build HTTP client: {error}")))?;

        Ok(Self {
            http_client,
            base_url,
            api_token: api_token.filter(|token| !token.trim().is_empty()),
        })
    }

    fn endpoint(&self, path: &str) -> AppResult<Url> {
        self.base_url.join(path).map_err(|error| {
            AppError::Internal(format!("invalid back-office endpoint '{path}': {error}"))
        })
    }

    fn user_role_endpoint(&self, user_id: &str) -> AppResult<Url> {
        let mut url = self.endpoint("api/users/")?;
        url.path_segments_mut()
            .map_err(|()| AppError::Internal("back-office URL cannot hold a path".to_owned()))?
            .pop_if_empty()
            .extend([user_id, "role"]);

        Ok(url)
    }

    fn request(&self, method: Method, path: &str) -> AppResult<RequestBuilder> {
        Ok(self.request_url(method, self.endpoint(path)?))
    }

    fn request_url(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self
            .http_client
            .request(method, url)
            .header(header::ACCEPT, "application/json");

        match &self.api_token {
            Some(token) => builder.header(header::AUTHORIZATION, format!("Bearer {token}")),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder, action: &str) -> AppResult<Response> {
        let response = builder
            .send()
            .await
            .map_err(|error| AppError::Transport(format!("failed to {action}: {error}")))?;

        let status = response.status();
        debug!(action, status = status.as_u16(), "back-office response");
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<body unavailable>".to_owned());
        let error = status_error(status, body.as_str());
        warn!(action, status = status.as_u16(), error = %error, "back-office request failed");
        Err(error)
    }

    async fn read_json<T: DeserializeOwned>(response: Response, action: &str) -> AppResult<T> {
        response.json::<T>().await.map_err(|error| {
            AppError::Transport(format!("failed to parse response to {action}: {error}"))
        })
    }

    async fn write_role(&self, method: Method, path: &str, payload: &RolePayload) -> AppResult<Role> {
        let action = format!("save role '{}'", payload.name());
        let response = self
            .send(self.request(method, path)?.json(payload), action.as_str())
            .await?;
        Self::read_json::<RoleDto>(response, action.as_str())
            .await?
            .into_role()
    }
}

/// Maps a failed HTTP status to the error taxonomy, keeping the server's message.
pub(crate) fn status_error(status: StatusCode, body: &str) -> AppError {
    let message = server_message(body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("unexpected response")
            .to_owned()
    });

    match status {
        StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
            AppError::Validation(message)
        }
        StatusCode::FORBIDDEN => AppError::ProtectedEntity(message),
        StatusCode::NOT_FOUND => AppError::NotFound(message),
        _ => AppError::Transport(format!("status {}: {message}", status.as_u16())),
    }
}

fn server_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    let parsed = serde_json::from_str::<serde_json::Value>(body).ok();
    let field = parsed.as_ref().and_then(|value| {
        ["message", "error"]
            .into_iter()
            .find_map(|key| value.get(key).and_then(serde_json::Value::as_str))
    });

    match (parsed.is_some(), field) {
        (_, Some(message)) => Some(message.to_owned()),
        (true, None) => None,
        (false, None) => Some(body.to_owned()),
    }
}

#[async_trait]
impl PermissionCatalogProvider for RestBackOfficeClient {
    async fn fetch_permissions(&self) -> AppResult<PermissionCatalog> {
        let action = "fetch permissions";
        let response = self
            .send(self.request(Method::GET, "api/permissions")?, action)
            .await?;
        let permissions = Self::read_json::<Vec<PermissionDto>>(response, action)
            .await?
            .into_iter()
            .map(PermissionDto::into_permission)
            .collect::<AppResult<Vec<_>>>()?;

        PermissionCatalog::new(permissions)
            .map_err(|error| AppError::Transport(format!("malformed permission catalog: {error}")))
    }
}

#[async_trait]
impl RoleStore for RestBackOfficeClient {
    async fn list_roles(&self) -> AppResult<Vec<Role>> {
        let action = "list roles";
        let response = self
            .send(self.request(Method::GET, "api/roles")?, action)
            .await?;

        Self::read_json::<Vec<RoleDto>>(response, action)
            .await?
            .into_iter()
            .map(RoleDto::into_role)
            .collect()
    }

    async fn create_role(&self, payload: RolePayload) -> AppResult<Role> {
        self.write_role(Method::POST, "api/roles", &payload).await
    }

    async fn update_role(&self, role_id: RoleId, payload: RolePayload) -> AppResult<Role> {
        self.write_role(Method::PATCH, &format!("api/roles/{role_id}"), &payload)
            .await
    }

    async fn delete_role(&self, role_id: RoleId) -> AppResult<()> {
        let path = format!("api/roles/{role_id}");
        self.send(
            self.request(Method::DELETE, path.as_str())?,
            "delete role",
        )
        .await?;

        Ok(())
    }
}

#[async_trait]
impl UserDirectory for RestBackOfficeClient {
    async fn list_users(&self) -> AppResult<Vec<DirectoryUser>> {
        let action = "list users";
        let response = self
            .send(self.request(Method::GET, "api/users")?, action)
            .await?;

        Ok(Self::read_json::<Vec<UserDto>>(response, action)
            .await?
            .into_iter()
            .map(DirectoryUser::from)
            .collect())
    }

    async fn set_user_role(&self, user_id: &str, role_name: &str) -> AppResult<()> {
        let builder = self
            .request_url(Method::PATCH, self.user_role_endpoint(user_id)?)
            .json(&UserRoleBody { role: role_name });
        self.send(builder, "assign user role").await?;

        Ok(())
    }
}
