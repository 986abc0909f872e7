use std::env;
use std::str::FromStr;
use std::time::Duration;

use depot_core::{AppError, AppResult};
use tracing_subscriber::EnvFilter;
use url::Url;

const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Which display strings the reports print.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Language {
    #[default]
    English,
    Vietnamese,
}

impl Language {
    /// Picks the localized label when this is the alternate language and one exists.
    pub fn pick<'a>(self, default: &'a str, localized: Option<&'a str>) -> &'a str {
        match (self, localized) {
            (Self::Vietnamese, Some(localized)) => localized,
            _ => default,
        }
    }
}

impl FromStr for Language {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Self::English),
            "vi" => Ok(Self::Vietnamese),
            other => Err(AppError::Validation(format!(
                "DEPOT_LANGUAGE must be either 'en' or 'vi', got '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    pub api_url: Option<Url>,
    pub api_token: Option<String>,
    pub timeout: Duration,
    pub language: Language,
}

impl ConsoleConfig {
    pub fn load() -> AppResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let non_empty = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let api_url = non_empty("DEPOT_API_URL")
            .map(|value| {
                Url::parse(value.as_str()).map_err(|error| {
                    AppError::Validation(format!("invalid DEPOT_API_URL '{value}': {error}"))
                })
            })
            .transpose()?;
        let api_token = non_empty("DEPOT_API_TOKEN");

        let timeout_secs = match non_empty("DEPOT_API_TIMEOUT_SECS") {
            Some(value) => value.parse::<u64>().map_err(|error| {
                AppError::Validation(format!(
                    "invalid DEPOT_API_TIMEOUT_SECS value '{value}': {error}"
                ))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            return Err(AppError::Validation(
                "DEPOT_API_TIMEOUT_SECS must be greater than zero".to_owned(),
            ));
        }

        let language = non_empty("DEPOT_LANGUAGE")
            .map(|value| value.parse::<Language>())
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            api_url,
            api_token,
            timeout: Duration::from_secs(timeout_secs),
            language,
        })
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
