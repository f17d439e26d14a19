//! Immobot Shared - Process bootstrap
//!
//! Environment loading and tracing setup used by every binary.

pub mod bootstrap;

pub use bootstrap::{LogSettings, init_env, init_tracing};
