//! Error types for scopelab-driver.

use miette::Diagnostic;
use scopelab_common::ScopeError;
use thiserror::Error;

/// Result type for scopelab-driver operations.
pub type Result<T> = std::result::Result<T, DriverError>;

/// Errors that can occur while configuring or running the illustrations.
#[derive(Error, Debug, Diagnostic)]
pub enum DriverError {
    /// Failed to read configuration file.
    #[error("Failed to read config file: {0}")]
    #[diagnostic(code(scopelab::config::read))]
    ReadConfig(#[from] std::io::Error),

    /// Failed to parse TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    #[diagnostic(code(scopelab::config::parse))]
    ParseToml(#[from] toml::de::Error),

    /// Failed to render the configuration back to TOML.
    #[error("Failed to render TOML config: {0}")]
    #[diagnostic(code(scopelab::config::render))]
    SerializeToml(#[from] toml::ser::Error),

    /// Configuration validation error.
    #[error("Config validation error: {0}")]
    #[diagnostic(code(scopelab::config::invalid))]
    Validation(String),

    /// An illustration was wired against the scope chain incorrectly.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Scope(#[from] ScopeError),
}
