//! File System Utilities
//!
//! Platform directory resolution and file write helpers.

use crate::constants::{
    APP_NAME, APP_ORGANIZATION, APP_QUALIFIER, CONFIG_FILE_NAME, HOME_ENV_VAR, PHOTO_FILE_NAME,
};
use crate::error::{Error, Result};
use directories::ProjectDirs;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Supplies the platform directories the app stores its state in.
pub trait PathResolver {
    /// Directory holding the persisted config file
    fn config_dir(&self) -> Result<PathBuf>;
    /// Directory holding the fixed image slot
    fn cache_dir(&self) -> Result<PathBuf>;
}

/// Resolves directories through the platform conventions
///
/// Platform-specific locations:
/// - **Linux**: `~/.local/share/camera-proto/` and `~/.cache/camera-proto/`
/// - **macOS**: `~/Library/Application Support/com.ivsoftware.camera-proto/` and `~/Library/Caches/com.ivsoftware.camera-proto/`
/// - **Windows**: `C:\Users\<User>\AppData\Local\ivsoftware\camera-proto\data\` and `...\cache\`
#[derive(Debug, Default, Clone, Copy)]
pub struct ProjectPathResolver;

impl ProjectPathResolver {
    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME).ok_or_else(|| {
            Error::Invalid {
                message: "Could not determine project directories".to_string(),
            }
        })
    }
}

impl PathResolver for ProjectPathResolver {
    fn config_dir(&self) -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        get_or_create_dir(dirs.data_local_dir())
    }

    fn cache_dir(&self) -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        get_or_create_dir(dirs.cache_dir())
    }
}

/// Resolves to explicitly chosen directories
#[derive(Debug, Clone)]
pub struct FixedPathResolver {
    config_dir: PathBuf,
    cache_dir: PathBuf,
}

impl FixedPathResolver {
    /// Use the given config and cache directories as-is
    pub fn new(config_dir: impl Into<PathBuf>, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
            cache_dir: cache_dir.into(),
        }
    }

    /// Place `config/` and `cache/` under a single root
    pub fn under(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self::new(root.join("config"), root.join("cache"))
    }

    /// Build from the `CAMERA_PROTO_HOME` override, if set
    pub fn from_env() -> Option<Self> {
        std::env::var_os(HOME_ENV_VAR)
            .filter(|v| !v.is_empty())
            .map(|root| Self::under(PathBuf::from(root)))
    }
}

impl PathResolver for FixedPathResolver {
    fn config_dir(&self) -> Result<PathBuf> {
        get_or_create_dir(&self.config_dir)
    }

    fn cache_dir(&self) -> Result<PathBuf> {
        get_or_create_dir(&self.cache_dir)
    }
}

/// The two files the app owns, computed once per process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    /// Persisted config JSON
    pub config_file: PathBuf,
    /// Fixed image slot, overwritten in place
    pub photo_file: PathBuf,
}

impl AppPaths {
    /// Resolve both file paths, creating their directories if needed
    pub fn resolve(resolver: &dyn PathResolver) -> Result<Self> {
        Ok(Self {
            config_file: resolver.config_dir()?.join(CONFIG_FILE_NAME),
            photo_file: resolver.cache_dir()?.join(PHOTO_FILE_NAME),
        })
    }
}

fn get_or_create_dir(dir: &Path) -> Result<PathBuf> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(dir.to_path_buf())
}

/// Replace `path` with `contents` through a sibling temp file
///
/// Readers see either the old or the new contents, never a torn write.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)?;
    Ok(())
}
