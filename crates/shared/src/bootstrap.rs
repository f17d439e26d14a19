use anyhow::{Context, Result};
use immobot_core::ConfigStore;
use immobot_core::config::{DEFAULT_LOG_DIR, DEFAULT_LOG_LEVEL};
use serde::Deserialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Logger settings read from the `log` section of the configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LogSettings {
    /// Default level when `RUST_LOG` is not set
    pub level: String,

    /// Directory for the JSON log file
    pub dir: String,

    /// Whether to write the JSON log file at all
    pub file: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            dir: DEFAULT_LOG_DIR.to_string(),
            file: true,
        }
    }
}

impl LogSettings {
    /// Read settings from the `log` sub-configuration
    pub fn from_store(store: &ConfigStore) -> Result<Self> {
        store
            .get_as("log")
            .context("log configuration is missing or malformed")
    }

    /// Filter directive used when `RUST_LOG` is not set
    pub fn default_filter(&self, service_name: &str) -> String {
        format!("{level},{service_name}={level}", level = self.level)
    }
}

/// Initialize dotenvy
pub fn init_env() {
    dotenvy::dotenv().ok();
}

/// Initialize tracing: coloured console output plus optional JSON file logging
///
/// The returned guard must be kept alive for the duration of the program to
/// ensure file logs are flushed.
pub fn init_tracing(
    service_name: &str,
    settings: &LogSettings,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| settings.default_filter(service_name).into());

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_ansi(true)
        .with_target(true);

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer);

    if settings.file {
        let now = chrono::Local::now().format("%y-%m-%d-%H-%M-%S").to_string();
        let filename = format!("immobot-{service_name}.log.{now}.jsonl");

        let file_appender = tracing_appender::rolling::never(&settings.dir, filename);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        let file_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(non_blocking)
            .json();

        registry.with(file_layer).init();

        Some(guard)
    } else {
        registry.init();
        None
    }
}
