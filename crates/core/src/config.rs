//! Environment configuration loader
//!
//! Builds the process-wide [`ConfigStore`] from environment variables.
//! The store schema is fixed here; hosts only ever overwrite its values.

use crate::error::{ConfigError, ConfigResult};
use crate::store::ConfigStore;
use serde_json::{Map, Value, json};
use std::env;

/// Default application environment when neither `APP_ENV` nor `NODE_ENV` is set
pub const DEFAULT_ENV: &str = "dev";

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "debug";

/// Default directory for log files
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Store with the full schema and placeholder values
///
/// Required values (`discord.token`, `discord.user_id`) are empty strings.
#[must_use]
pub fn defaults() -> ConfigStore {
    let data: Map<String, Value> = [
        ("env", json!(DEFAULT_ENV)),
        ("discord", json!({ "token": "", "user_id": "" })),
        (
            "log",
            json!({
                "level": DEFAULT_LOG_LEVEL,
                "dir": DEFAULT_LOG_DIR,
                "file": true
            }),
        ),
    ]
    .into_iter()
    .map(|(key, value)| (key.to_string(), value))
    .collect();

    ConfigStore::from(data)
}

/// Load configuration from environment variables
///
/// This will also initialize dotenv if it hasn't been done yet.
pub fn load_from_env() -> ConfigResult<ConfigStore> {
    // Load .env file if it exists
    dotenvy::dotenv().ok();

    load_with(|name| env::var(name).ok())
}

/// Load configuration using `lookup` to resolve variable names
pub fn load_with<F>(lookup: F) -> ConfigResult<ConfigStore>
where
    F: Fn(&str) -> Option<String>,
{
    let required =
        |name: &str| lookup(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()));

    let token = required("DISCORD_TOKEN")?;
    let user_id = required("DISCORD_USER_ID")?;

    let app_env = lookup("APP_ENV")
        .or_else(|| lookup("NODE_ENV"))
        .unwrap_or_else(|| DEFAULT_ENV.to_string());

    let file_logging = lookup("ENABLE_FILE_LOGGING")
        .map(|v| v.to_lowercase() != "false" && v != "0")
        .unwrap_or(true);

    let overrides = json!({
        "env": app_env,
        "discord": {
            "token": token,
            "user_id": user_id
        },
        "log": {
            "level": lookup("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            "dir": lookup("LOG_DIR").unwrap_or_else(|| DEFAULT_LOG_DIR.to_string()),
            "file": Value::Bool(file_logging)
        }
    });

    let mut store = defaults();
    store.import(overrides)?;

    tracing::debug!(env = %app_env, "configuration loaded from environment");
    Ok(store)
}
