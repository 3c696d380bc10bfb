//! Configuration loading from the process environment.
//!
//! Loading is injection-friendly: [`from_lookup`] takes any variable
//! lookup function, so tests never have to mutate the real environment.

use crate::config::schema::{ProxyConfig, ServerConfig};
use crate::config::validation::{validate, ValidationError};

/// Upstream hostname. Required.
pub const ENV_TARGET_DOMAIN: &str = "TARGET_DOMAIN";
/// Upstream port override.
pub const ENV_TARGET_PORT: &str = "TARGET_PORT";
/// Forward over HTTPS when set.
pub const ENV_HTTPS: &str = "HTTPS";
/// Literal path prefix.
pub const ENV_PATH_PREFIX: &str = "PATH_PREFIX";
/// Prefix stripped from inbound paths.
pub const ENV_EXCLUDE_PATH_PREFIX: &str = "EXCLUDE_PATH_PREFIX";
/// Add the allow-all CORS header when set.
pub const ENV_CORS: &str = "CORS";
/// Verbose event/request logging when set.
pub const ENV_DEBUG: &str = "DEBUG";
/// Server bind address.
pub const ENV_BIND_ADDRESS: &str = "BIND_ADDRESS";
/// Server-side request timeout in seconds.
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "REQUEST_TIMEOUT_SECS";
/// Maximum inbound event body size in bytes.
pub const ENV_MAX_EVENT_BODY_BYTES: &str = "MAX_EVENT_BODY_BYTES";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// The required upstream host variable is missing or empty.
    MissingTargetDomain,
    /// A variable is set but does not parse as the expected type.
    Invalid { variable: &'static str, value: String },
    /// Semantic validation rejected the loaded configuration.
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingTargetDomain => {
                write!(f, "Set env {ENV_TARGET_DOMAIN} to define the proxy target")
            }
            ConfigError::Invalid { variable, value } => {
                write!(f, "Invalid value {value:?} for env {variable}")
            }
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{err}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load and validate both configs from the process environment.
pub fn load_from_env() -> Result<(ProxyConfig, ServerConfig), ConfigError> {
    from_lookup(|key| std::env::var(key).ok())
}

/// Load and validate both configs through an arbitrary variable lookup.
pub fn from_lookup<F>(lookup: F) -> Result<(ProxyConfig, ServerConfig), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let proxy = proxy_from_lookup(&lookup)?;
    let server = server_from_lookup(&lookup)?;
    validate(&proxy, &server).map_err(ConfigError::Validation)?;
    Ok((proxy, server))
}

fn proxy_from_lookup<F>(lookup: &F) -> Result<ProxyConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let target_host = non_empty(lookup(ENV_TARGET_DOMAIN)).ok_or(ConfigError::MissingTargetDomain)?;

    let target_port = match non_empty(lookup(ENV_TARGET_PORT)) {
        Some(raw) => match raw.parse::<u16>() {
            Ok(port) if port > 0 => Some(port),
            _ => {
                return Err(ConfigError::Invalid {
                    variable: ENV_TARGET_PORT,
                    value: raw,
                })
            }
        },
        None => None,
    };

    Ok(ProxyConfig {
        target_host,
        target_port,
        use_https: flag(lookup(ENV_HTTPS)),
        path_prefix: non_empty(lookup(ENV_PATH_PREFIX)),
        exclude_path_prefix: non_empty(lookup(ENV_EXCLUDE_PATH_PREFIX)),
        add_cors_header: flag(lookup(ENV_CORS)),
        debug_logging: flag(lookup(ENV_DEBUG)),
    })
}

fn server_from_lookup<F>(lookup: &F) -> Result<ServerConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut server = ServerConfig::default();

    if let Some(addr) = non_empty(lookup(ENV_BIND_ADDRESS)) {
        server.bind_address = addr;
    }
    if let Some(raw) = non_empty(lookup(ENV_REQUEST_TIMEOUT_SECS)) {
        server.request_timeout_secs = raw.parse().map_err(|_| ConfigError::Invalid {
            variable: ENV_REQUEST_TIMEOUT_SECS,
            value: raw,
        })?;
    }
    if let Some(raw) = non_empty(lookup(ENV_MAX_EVENT_BODY_BYTES)) {
        server.max_event_body_bytes = raw.parse().map_err(|_| ConfigError::Invalid {
            variable: ENV_MAX_EVENT_BODY_BYTES,
            value: raw,
        })?;
    }

    Ok(server)
}

/// Presence semantics: any non-empty value enables a flag, including
/// "false".
fn flag(value: Option<String>) -> bool {
    non_empty(value).is_some()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
