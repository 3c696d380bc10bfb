//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (the loader handles syntactic parsing)
//! - Check the upstream host is a bare hostname, not a URL
//! - Validate value ranges (timeout > 0, body cap > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function over the loaded configs

use crate::config::schema::{ProxyConfig, ServerConfig};

/// A single semantic violation found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Config field the violation applies to.
    pub field: &'static str,
    /// Human-readable description of the violation.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate the loaded configuration, collecting every violation.
pub fn validate(proxy: &ProxyConfig, server: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if proxy.target_host.is_empty() {
        errors.push(ValidationError {
            field: "target_host",
            message: "must not be empty".to_string(),
        });
    } else if proxy.target_host.contains("://") {
        errors.push(ValidationError {
            field: "target_host",
            message: "must be a hostname, not a URL".to_string(),
        });
    } else if proxy
        .target_host
        .chars()
        .any(|c| c == '/' || c == '?' || c.is_whitespace())
    {
        errors.push(ValidationError {
            field: "target_host",
            message: "must not contain path, query or whitespace characters".to_string(),
        });
    }

    if server.request_timeout_secs == 0 {
        errors.push(ValidationError {
            field: "request_timeout_secs",
            message: "must be greater than zero".to_string(),
        });
    }

    if server.max_event_body_bytes == 0 {
        errors.push(ValidationError {
            field: "max_event_body_bytes",
            message: "must be greater than zero".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
