//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Core config struct definitions (Config, ServerConfig, ListenConfig)
//! - [`limits`]: Resource limits (LimitsConfig)
//! - [`validation`]: Startup validation of the loaded file and of the CLI arguments

mod limits;
mod types;
pub mod validation;

pub use limits::LimitsConfig;
pub use types::{Config, ConfigError, ListenConfig, ServerConfig};
