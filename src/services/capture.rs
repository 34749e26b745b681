//! Photo Capture
//!
//! Boundary to the platform camera. The app only needs "maybe a photo file"
//! back from it; a cancelled capture is `Ok(None)`.

use crate::error::{Error, Result};
use std::fs::File;
use std::future::Future;
use std::path::{Path, PathBuf};

/// A photo handed back by the capture collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedPhoto {
    path: PathBuf,
}

impl CapturedPhoto {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|n| n.to_str())
    }

    /// Open the captured image for reading
    pub fn open_read(&self) -> Result<File> {
        File::open(&self.path).map_err(|e| Error::Capture {
            message: format!("cannot open {}: {e}", self.path.display()),
        })
    }
}

/// Something that can take a photo
pub trait PhotoCapture {
    /// Take a photo, suspending until the user finishes or cancels
    fn capture_photo(&self) -> impl Future<Output = Result<Option<CapturedPhoto>>> + Send;
}

/// Capture stand-in that "takes" an existing image file
///
/// No path, or a path that does not exist, behaves like a cancelled capture.
#[derive(Debug, Clone, Default)]
pub struct FileCapture {
    source: Option<PathBuf>,
}

impl FileCapture {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: Some(source.into()),
        }
    }

    /// A capture the user cancels
    pub fn cancelled() -> Self {
        Self { source: None }
    }
}

impl PhotoCapture for FileCapture {
    fn capture_photo(&self) -> impl Future<Output = Result<Option<CapturedPhoto>>> + Send {
        let source = self.source.clone();
        async move {
            let Some(path) = source else {
                return Ok(None);
            };
            if !path.is_file() {
                tracing::info!(path = ?path, "Capture source missing, treating as cancelled");
                return Ok(None);
            }
            Ok(Some(CapturedPhoto::new(path)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[tokio::test]
    async fn test_file_capture_returns_photo() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shot.jpg");
        std::fs::write(&path, b"jpeg").unwrap();

        let photo = FileCapture::new(&path).capture_photo().await.unwrap().unwrap();
        assert_eq!(photo.file_name(), Some("shot.jpg"));

        let mut bytes = Vec::new();
        photo.open_read().unwrap().read_to_end(&mut bytes).unwrap();
        assert_eq!(bytes, b"jpeg");
    }

    #[tokio::test]
    async fn test_cancelled_and_missing_are_none() {
        assert!(FileCapture::cancelled().capture_photo().await.unwrap().is_none());

        let dir = tempfile::tempdir().unwrap();
        let missing = FileCapture::new(dir.path().join("none.jpg"));
        assert!(missing.capture_photo().await.unwrap().is_none());
    }

    #[test]
    fn test_open_read_reports_capture_error() {
        let err = CapturedPhoto::new("/definitely/not/here.jpg")
            .open_read()
            .unwrap_err();
        assert!(matches!(err, Error::Capture { .. }));
    }
}
