//! Config file location and disk I/O.
//!
//! Covers:
//! - Path resolution (`ConfigLocation`, `~/.spin/config` by default)
//! - Directory preparation with owner-only permissions
//! - Loading with variable expansion and strict parsing
//! - Writing with mode preservation via temp file + rename
//!
//! Saving replaces the config file rather than writing through it: if
//! `config` is a symlink, the link itself is replaced by a regular file.

use crate::config::Config;
use crate::env_vars::{Environment, expand_env_with};
use crate::error::ConfigError;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Directory under the home directory that holds the config file.
pub const CONFIG_DIR_NAME: &str = ".spin";

/// File name of the config file inside [`CONFIG_DIR_NAME`].
pub const CONFIG_FILE_NAME: &str = "config";

/// Mode for a newly created config file (owner read/write).
pub const DEFAULT_FILE_MODE: u32 = 0o600;

/// Mode for a newly created config directory (owner only).
pub const DEFAULT_DIR_MODE: u32 = 0o700;

/// Where the config file lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLocation {
    path: PathBuf,
}

impl ConfigLocation {
    /// Use an explicit config file path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<home>/.spin/config` for the given home directory.
    pub fn in_home(home: &Path) -> Self {
        Self::at(home.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// `<home>/.spin/config` for the current user.
    pub fn default_location() -> Result<Self, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeDirUnavailable)?;
        Ok(Self::in_home(&home))
    }

    /// Path of the config file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory that contains the config file.
    pub fn dir(&self) -> Option<&Path> {
        self.path.parent().filter(|p| !p.as_os_str().is_empty())
    }
}

/// A config document read from disk, along with the state needed to write it back.
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub config: Config,
    /// Permission bits of the file as found, or `None` when it did not exist.
    pub existing_mode: Option<u32>,
}

/// Create the config directory (and any missing ancestors) with mode 0700.
///
/// An already existing directory is left as-is, permissions included.
pub fn ensure_config_dir(location: &ConfigLocation) -> Result<(), ConfigError> {
    let Some(dir) = location.dir() else {
        return Ok(());
    };

    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DEFAULT_DIR_MODE);
    }

    match builder.create(dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && dir.is_dir() => Ok(()),
        Err(source) => Err(ConfigError::DirectoryCreateFailed {
            path: dir.to_path_buf(),
            source,
        }),
    }
}

/// Load the config file, expanding variables from `env` before parsing.
///
/// A missing file yields an empty config. Any other read failure is an
/// error, so an unreadable file is never silently replaced.
pub fn load_config<E: Environment + ?Sized>(
    location: &ConfigLocation,
    env: &E,
) -> Result<LoadedConfig, ConfigError> {
    let path = location.path();

    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::info!("Config file not found at {:?}, starting from empty config", path);
            return Ok(LoadedConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let existing_mode = file_mode(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    warn_if_insecure(path, existing_mode);

    let raw = String::from_utf8(bytes).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        source: io::Error::new(io::ErrorKind::InvalidData, e),
    })?;

    log::debug!("Loading existing config from {:?}", path);
    let expanded = expand_env_with(&raw, env);
    let config = Config::from_yaml(&expanded).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(LoadedConfig {
        config,
        existing_mode: Some(existing_mode),
    })
}

/// Encode `config` and write it to `location`.
///
/// The file gets `mode` (Unix permission bits), or [`DEFAULT_FILE_MODE`] when
/// `None`. The bytes go to a sibling temp file first, which is then renamed
/// over the target, so a failed write leaves the previous file intact.
pub fn save_config(
    location: &ConfigLocation,
    config: &Config,
    mode: Option<u32>,
) -> Result<(), ConfigError> {
    let yaml = config.to_yaml().map_err(ConfigError::Serialize)?;
    write_with_mode(location.path(), yaml.as_bytes(), mode.unwrap_or(DEFAULT_FILE_MODE))
}

/// Write `bytes` to `path` through a temp file carrying `mode`.
///
/// A stale temp file (or symlink) left by an earlier run is removed first and
/// the temp file is created exclusively, so nothing at that path is followed.
fn write_with_mode(path: &Path, bytes: &[u8], mode: u32) -> Result<(), ConfigError> {
    let write_err = |source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };

    let temp_path = temp_path_for(path);
    match fs::remove_file(&temp_path) {
        Ok(()) => log::debug!("Removed stale temp file {:?}", temp_path),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(write_err(e)),
    }

    let mut file = open_with_mode(&temp_path, mode).map_err(write_err)?;
    let result = file
        .write_all(bytes)
        .and_then(|()| file.sync_all())
        .and_then(|()| set_mode(&temp_path, mode))
        .and_then(|()| fs::rename(&temp_path, path));
    drop(file);

    if let Err(e) = result {
        let _ = fs::remove_file(&temp_path);
        return Err(write_err(e));
    }

    log::debug!("Wrote {} bytes to {:?} (mode {:04o})", bytes.len(), path, mode);
    Ok(())
}

/// `config` -> `config.tmp`, in the same directory so the rename stays on one filesystem.
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| CONFIG_FILE_NAME.into());
    name.push(".tmp");
    path.with_file_name(name)
}

fn open_with_mode(path: &Path, mode: u32) -> io::Result<fs::File> {
    let mut opts = fs::OpenOptions::new();
    opts.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        opts.mode(mode);
    }
    #[cfg(not(unix))]
    {
        let _ = mode;
    }
    opts.open(path)
}

/// Apply `mode` exactly, since the mode given at creation is narrowed by the umask.
fn set_mode(path: &Path, mode: u32) -> io::Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(mode))?;
    }
    #[cfg(not(unix))]
    {
        let _ = (path, mode);
    }
    Ok(())
}

/// Permission bits of an existing file.
fn file_mode(path: &Path) -> io::Result<u32> {
    let metadata = fs::metadata(path)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        Ok(metadata.permissions().mode() & 0o7777)
    }
    #[cfg(not(unix))]
    {
        Ok(if metadata.permissions().readonly() {
            0o444
        } else {
            DEFAULT_FILE_MODE
        })
    }
}

/// Whether `mode` lets group or others read the file. Always false off Unix,
/// where mode bits are synthesized.
fn is_insecure(mode: u32) -> bool {
    cfg!(unix) && mode & 0o044 != 0
}

/// The config may hold session cookies and other credentials; flag files
/// readable by group or others.
fn warn_if_insecure(path: &Path, mode: u32) {
    if is_insecure(mode) {
        log::warn!(
            "Config file {:?} has insecure permissions (mode {:04o}). \
             It is readable by group or others, which may expose the stored \
             session cookie. Run: chmod 600 {:?}",
            path,
            mode,
            path,
        );
    }
}
