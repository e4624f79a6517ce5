//! Typed error variants for the spin-config crate.
//!
//! Every step of the cookie persist routine maps onto exactly one variant, so
//! callers can match on the failure mode instead of inspecting strings.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading, merging, or saving the config file.
///
/// Each variant aborts the whole operation; nothing is retried and no
/// partial write happens before the failing step.
///
/// # Example
///
/// ```rust,no_run
/// use spin_config::ConfigError;
///
/// fn describe(e: &ConfigError) {
///     match e {
///         ConfigError::HomeDirUnavailable => eprintln!("no home directory"),
///         ConfigError::Parse { path, .. } => eprintln!("fix {}", path.display()),
///         other => eprintln!("{other}"),
///     }
/// }
/// ```
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The user's home directory could not be determined.
    #[error("unable to determine user home directory")]
    HomeDirUnavailable,

    /// The directory that holds the config file could not be created.
    #[error("unable to create config directory {}: {source}", .path.display())]
    DirectoryCreateFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file exists but could not be read as UTF-8 text.
    #[error("unable to read existing config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file (after variable expansion) is not a valid config document.
    #[error("failed to parse existing config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },

    /// The in-memory config could not be encoded as YAML.
    #[error("failed to marshal config: {0}")]
    Serialize(#[source] serde_yaml_ng::Error),

    /// Writing the encoded config back to disk failed.
    #[error("failed to write config {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_display_includes_path_and_cause() {
        let err = ConfigError::Write {
            path: PathBuf::from("/tmp/home/.spin/config"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/tmp/home/.spin/config"), "got: {msg}");
        assert!(msg.contains("denied"), "got: {msg}");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_home_dir_unavailable_message() {
        let err = ConfigError::HomeDirUnavailable;
        assert!(err.source().is_none());
        assert_eq!(err.to_string(), "unable to determine user home directory");
    }
}
