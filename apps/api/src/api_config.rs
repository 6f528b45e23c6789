use std::env;
use std::fmt::{Debug, Formatter};
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use encore_core::AppError;
use encore_domain::EmailAddress;
use tracing_subscriber::EnvFilter;

const MIN_INTERNAL_API_TOKEN_LENGTH: usize = 32;

/// Runtime configuration, loaded and validated once at startup.
#[derive(Clone)]
pub struct ApiConfig {
    pub migrate_only: bool,
    pub database_url: String,
    pub database_max_connections: u32,
    pub api_host: String,
    pub api_port: u16,
    pub internal_api_token: String,
    pub platform_admin_emails: Vec<EmailAddress>,
}

impl ApiConfig {
    /// Reads the process environment and fails on the first invalid value.
    pub fn load() -> Result<Self, AppError> {
        let migrate_only = env::args().nth(1).as_deref() == Some("migrate");

        Self::from_lookup(migrate_only, |name| env::var(name).ok())
    }

    fn from_lookup(
        migrate_only: bool,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AppError> {
        let database_url = required_non_empty(&lookup, "DATABASE_URL")?;
        let database_max_connections = parse_or_default(&lookup, "DATABASE_MAX_CONNECTIONS", 10)?;
        if database_max_connections == 0 {
            return Err(AppError::Validation(
                "DATABASE_MAX_CONNECTIONS must be greater than zero".to_owned(),
            ));
        }

        let api_host = lookup("API_HOST").unwrap_or_else(|| "127.0.0.1".to_owned());
        let api_port = parse_or_default(&lookup, "API_PORT", 3001)?;

        let internal_api_token = if migrate_only {
            lookup("ENCORE_INTERNAL_API_TOKEN").unwrap_or_default()
        } else {
            let token = required_non_empty(&lookup, "ENCORE_INTERNAL_API_TOKEN")?;
            if token.len() < MIN_INTERNAL_API_TOKEN_LENGTH {
                return Err(AppError::Validation(format!(
                    "ENCORE_INTERNAL_API_TOKEN must be at least {MIN_INTERNAL_API_TOKEN_LENGTH} characters"
                )));
            }
            token
        };

        let platform_admin_emails = lookup("PLATFORM_ADMIN_EMAILS")
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| {
                EmailAddress::new(value).map_err(|error| {
                    AppError::Validation(format!("invalid PLATFORM_ADMIN_EMAILS entry: {error}"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            migrate_only,
            database_url,
            database_max_connections,
            api_host,
            api_port,
            internal_api_token,
            platform_admin_emails,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Validation(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

impl Debug for ApiConfig {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("ApiConfig")
            .field("migrate_only", &self.migrate_only)
            .field("database_url", &"<redacted>")
            .field("database_max_connections", &self.database_max_connections)
            .field("api_host", &self.api_host)
            .field("api_port", &self.api_port)
            .field("internal_api_token", &"<redacted>")
            .field("platform_admin_emails", &self.platform_admin_emails)
            .finish()
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_non_empty(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
) -> Result<String, AppError> {
    let value = lookup(name).ok_or_else(|| AppError::Validation(format!("{name} is required")))?;
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }

    Ok(value)
}

fn parse_or_default<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(value) if !value.trim().is_empty() => value
            .trim()
            .parse::<T>()
            .map_err(|error| AppError::Validation(format!("invalid {name}: {error}"))),
        _ => Ok(default),
    }
}
