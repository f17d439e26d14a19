//! Error types for configuration handling

use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid config data: expected an object, found {found}")]
    InvalidConfigData { found: &'static str },

    #[error("Undefined config {path} for path {full_path}")]
    UndefinedConfigPath { path: String, full_path: String },

    #[error("Override of undeclared config key '{key}' not allowed")]
    SchemaOverrideNotAllowed { key: String },

    #[error("Config {path} is a value, not a sub-configuration")]
    NotASubStore { path: String },

    #[error("Invalid value for config {path}: {source}")]
    InvalidValue {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
}

/// Result type alias for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
