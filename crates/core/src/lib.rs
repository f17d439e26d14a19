//! Immobot Core - Configuration model
//!
//! This crate contains the schema-locked configuration store and the
//! loader that fills it from the process environment.
//! Nothing here performs network I/O.

pub mod config;
pub mod error;
pub mod store;

pub use error::{ConfigError, ConfigResult};
pub use store::{ConfigStore, Entry};
