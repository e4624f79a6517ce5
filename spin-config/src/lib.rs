//! Configuration system for the spin command-line client.
//!
//! This crate owns `~/.spin/config`. It includes:
//!
//! - The config document model (`Config`, `AuthConfig`), which preserves
//!   every section it does not interpret
//! - Shell-style `$VAR` / `${VAR}` expansion applied to the raw file text
//! - Path resolution, loading, and mode-preserving saves
//! - `ConfigCookieWriter`, which stores a session cookie in the config

pub mod auth;
pub mod config;
pub mod cookie;
pub mod env_vars;
pub mod error;
pub mod persistence;

// Re-export main types for convenience
pub use auth::AuthConfig;
pub use config::Config;
pub use cookie::{ConfigCookieWriter, StatusSink};
pub use env_vars::{Environment, ProcessEnv, expand_env_with};
pub use error::ConfigError;
pub use persistence::{
    ConfigLocation, DEFAULT_DIR_MODE, DEFAULT_FILE_MODE, LoadedConfig, ensure_config_dir,
    load_config, save_config,
};
