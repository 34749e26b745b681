//! Error types for camera-proto
//!
//! Centralized error handling using snafu for ergonomic error definitions.

use snafu::Snafu;

/// Main error type for the application
#[derive(Debug, Snafu)]
pub enum Error {
    /// Invalid input or configuration
    #[snafu(display("Invalid: {message}"))]
    Invalid { message: String },

    /// IO error (config file, photo slot, capture stream)
    #[snafu(display("IO error: {source}"))]
    Io { source: std::io::Error },

    /// JSON serialization/deserialization error
    #[snafu(display("JSON error: {source}"))]
    Json { source: serde_json::Error },

    /// A color rotation has no bundled image
    #[snafu(display("Embedded resource not found: {name}"))]
    ResourceNotFound { name: String },

    /// A resource key matches more than one bundled image
    #[snafu(display("Embedded resource key {key} is ambiguous: {matches:?}"))]
    AmbiguousResource { key: String, matches: Vec<String> },

    /// The capture collaborator failed to hand over a photo
    #[snafu(display("Capture error: {message}"))]
    Capture { message: String },
}

impl Error {
    /// Whether this error means the bundled assets and `ColorRotation` are out of sync.
    ///
    /// These are build/packaging mistakes, not runtime conditions.
    pub fn is_packaging_fault(&self) -> bool {
        matches!(
            self,
            Error::ResourceNotFound { .. } | Error::AmbiguousResource { .. }
        )
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io { source }
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Error::Json { source }
    }
}

impl From<tempfile::PersistError> for Error {
    fn from(err: tempfile::PersistError) -> Self {
        Error::Io { source: err.error }
    }
}

/// Result type alias for convenience
pub type Result<T, E = Error> = std::result::Result<T, E>;
