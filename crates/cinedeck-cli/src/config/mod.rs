//! Application configuration module.
//!
//! Manages the TOML config file: catalog language, file-search endpoint,
//! trailer player host and the placeholder credits.

#[allow(clippy::module_inception)]
mod config;
mod paths;

#[allow(clippy::module_name_repetitions)]
pub use config::AppConfig;
pub use paths::resolve_config_path;
