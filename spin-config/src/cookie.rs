//! Persisting a session cookie into the config file.
//!
//! [`ConfigCookieWriter::set_cookie`] runs one linear sequence: resolve the
//! path, prepare the directory, load the existing document, set
//! `auth.cookie`, and write the document back with its original mode. Any
//! failing step aborts the rest, and the status message is only emitted once
//! the file is on disk.
//!
//! There is no locking: two concurrent invocations may lose one update.

use crate::env_vars::{Environment, ProcessEnv};
use crate::error::ConfigError;
use crate::persistence::{ConfigLocation, ensure_config_dir, load_config, save_config};
use std::path::PathBuf;

/// Receiver for user-facing informational messages.
pub trait StatusSink {
    fn info(&self, message: &str);
}

/// Writes the session cookie into the config file.
pub struct ConfigCookieWriter<'a, E: Environment = ProcessEnv> {
    location: Option<ConfigLocation>,
    env: E,
    status: Option<&'a dyn StatusSink>,
}

impl ConfigCookieWriter<'_, ProcessEnv> {
    /// Writer for `~/.spin/config`, expanding variables from the process environment.
    pub fn new() -> Self {
        Self {
            location: None,
            env: ProcessEnv,
            status: None,
        }
    }
}

impl Default for ConfigCookieWriter<'_, ProcessEnv> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, E: Environment> ConfigCookieWriter<'a, E> {
    /// Use `location` instead of resolving `~/.spin/config`.
    pub fn with_location(mut self, location: ConfigLocation) -> Self {
        self.location = Some(location);
        self
    }

    /// Expand variables in the existing config from `env`.
    pub fn with_env<E2: Environment>(self, env: E2) -> ConfigCookieWriter<'a, E2> {
        ConfigCookieWriter {
            location: self.location,
            env,
            status: self.status,
        }
    }

    /// Send the success message to `status`.
    pub fn with_status(mut self, status: &'a dyn StatusSink) -> Self {
        self.status = Some(status);
        self
    }

    /// Store `cookie` as `auth.cookie`, keeping every other setting.
    ///
    /// The value is stored verbatim; variable expansion only applies to the
    /// text already on disk. Returns the path of the written file.
    pub fn set_cookie(&self, cookie: &str) -> Result<PathBuf, ConfigError> {
        let location = match &self.location {
            Some(location) => location.clone(),
            None => ConfigLocation::default_location()?,
        };
        log::debug!("Storing cookie in {:?}", location.path());

        ensure_config_dir(&location)?;

        let mut loaded = load_config(&location, &self.env)?;
        loaded.config.set_cookie(cookie);

        save_config(&location, &loaded.config, loaded.existing_mode)?;

        let path = location.path().to_path_buf();
        log::info!("Cookie stored in {:?}", path);
        if let Some(status) = self.status {
            status.info(&format!("Cookie updated and stored in {}", path.display()));
        }
        Ok(path)
    }
}
