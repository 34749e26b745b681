//! Application Constants
//!
//! File names, directory identifiers and display strings shared across the app.

/// `ProjectDirs` qualifier
pub const APP_QUALIFIER: &str = "com";
/// `ProjectDirs` organization
pub const APP_ORGANIZATION: &str = "ivsoftware";
/// `ProjectDirs` application name
pub const APP_NAME: &str = "camera-proto";

/// Environment variable that relocates config and cache under one root
pub const HOME_ENV_VAR: &str = "CAMERA_PROTO_HOME";

/// Persisted config file name (inside the local app data directory)
pub const CONFIG_FILE_NAME: &str = "config-for-test.json";

/// Fixed image slot file name (inside the cache directory)
pub const PHOTO_FILE_NAME: &str = "photo-slot.img";

/// Log file prefix for the rolling appender
pub const LOG_FILE_NAME: &str = "camera-proto.log";

/// Bundle-relative directory of the fallback images
pub const IMAGE_ASSET_DIR: &str = "Resources/Images";

/// Maximum number of decoded image handles kept in memory
pub const IMAGE_CACHE_CAPACITY: usize = 8;

/// Status text shown while a captured photo is displayed
pub const STATUS_EXPECTING_PHOTO: &str = "Expecting Photo";
