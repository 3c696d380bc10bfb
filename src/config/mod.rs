//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! process environment
//!     → loader.rs (lookup & parse)
//!     → validation.rs (semantic checks)
//!     → ProxyConfig + ServerConfig (validated, immutable)
//!     → shared via Arc with the forwarding service and server glue
//! ```
//!
//! # Design Decisions
//! - Configuration is read once at startup and never mutated
//! - The loader is injectable (any `&str -> Option<String>` lookup), so
//!   tests construct configs without touching the real environment
//! - Validation separates syntactic (parse) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_from_env, ConfigError};
pub use schema::{ProxyConfig, ServerConfig};
