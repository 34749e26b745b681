//! Image Cache
//!
//! Turns a file path into a displayable in-memory image, re-reading the file
//! only when its modification time moves.

use crate::constants::IMAGE_CACHE_CAPACITY;
use crate::error::Result;
use hashlink::LruCache;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

#[derive(Debug)]
struct ImageData {
    path: PathBuf,
    bytes: Vec<u8>,
    modified: SystemTime,
}

/// Shared handle to an image read from disk
///
/// Equality is identity: two handles are equal only if they come from the
/// same read.
#[derive(Clone, Debug)]
pub struct ImageHandle(Arc<ImageData>);

impl ImageHandle {
    fn new(path: &Path, bytes: Vec<u8>, modified: SystemTime) -> Self {
        Self(Arc::new(ImageData {
            path: path.to_path_buf(),
            bytes,
            modified,
        }))
    }

    pub fn path(&self) -> &Path {
        &self.0.path
    }

    pub fn bytes(&self) -> &[u8] {
        &self.0.bytes
    }

    /// Modification time of the file when it was read
    pub fn modified(&self) -> SystemTime {
        self.0.modified
    }

    pub fn len(&self) -> usize {
        self.0.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.bytes.is_empty()
    }
}

impl PartialEq for ImageHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for ImageHandle {}

/// Path-keyed cache of image handles
pub struct ImageCache {
    entries: LruCache<PathBuf, ImageHandle>,
    reads: u64,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::with_capacity(IMAGE_CACHE_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: LruCache::new(capacity),
            reads: 0,
        }
    }

    /// Resolve `path` to an image handle
    ///
    /// Returns `None` for an empty path or a missing file. The cached handle
    /// is returned as-is while the file's modification time is unchanged;
    /// otherwise the file is read again and a new handle replaces it.
    pub fn resolve(&mut self, path: &Path) -> Result<Option<ImageHandle>> {
        if path.as_os_str().is_empty() {
            return Ok(None);
        }

        let metadata = match fs::metadata(path) {
            Ok(m) if m.is_file() => m,
            Ok(_) => return Ok(None),
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let modified = metadata.modified()?;

        if let Some(cached) = self.entries.get(path) {
            if cached.modified() == modified {
                return Ok(Some(cached.clone()));
            }
        }

        let bytes = fs::read(path)?;
        self.reads += 1;
        tracing::debug!(path = ?path, bytes = bytes.len(), "Image reloaded from disk");

        let handle = ImageHandle::new(path, bytes, modified);
        self.entries.insert(path.to_path_buf(), handle.clone());
        Ok(Some(handle))
    }

    /// Forget the cached handle for `path`
    pub fn invalidate(&mut self, path: &Path) {
        self.entries.remove(path);
    }

    /// Number of file reads performed so far
    pub fn reads(&self) -> u64 {
        self.reads
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ImageCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn write_with_mtime(path: &Path, bytes: &[u8], secs: u64) {
        fs::write(path, bytes).unwrap();
        fs::File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
            .unwrap();
    }

    #[test]
    fn test_resolve_missing_or_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = ImageCache::new();

        assert!(cache.resolve(Path::new("")).unwrap().is_none());
        assert!(cache.resolve(&dir.path().join("nope.png")).unwrap().is_none());
        assert!(cache.resolve(dir.path()).unwrap().is_none());
        assert_eq!(cache.reads(), 0);
    }

    #[test]
    fn test_resolve_twice_reads_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slot");
        write_with_mtime(&path, b"first", 1_000);
        let mut cache = ImageCache::new();

        let a = cache.resolve(&path).unwrap().unwrap();
        let b = cache.resolve(&path).unwrap().unwrap();

        assert_eq!(a, b);
        assert_eq!(a.bytes(), b"first");
        assert_eq!(cache.reads(), 1);
    }

    #[test]
    fn test_resolve_reloads_on_mtime_change() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slot");
        write_with_mtime(&path, b"first", 1_000);
        let mut cache = ImageCache::new();
        let before = cache.resolve(&path).unwrap().unwrap();

        write_with_mtime(&path, b"second", 2_000);
        let after = cache.resolve(&path).unwrap().unwrap();

        assert_ne!(before, after);
        assert_eq!(after.bytes(), b"second");
        assert_eq!(
            after.modified(),
            SystemTime::UNIX_EPOCH + Duration::from_secs(2_000)
        );
        assert_eq!(cache.reads(), 2);
    }

    #[test]
    fn test_same_mtime_keeps_stale_handle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slot");
        write_with_mtime(&path, b"first", 1_000);
        let mut cache = ImageCache::new();
        let before = cache.resolve(&path).unwrap().unwrap();

        write_with_mtime(&path, b"other", 1_000);
        let after = cache.resolve(&path).unwrap().unwrap();

        assert_eq!(before, after);
        assert_eq!(after.bytes(), b"first");

        cache.invalidate(&path);
        assert_eq!(cache.resolve(&path).unwrap().unwrap().bytes(), b"other");
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = ImageCache::with_capacity(2);
        for name in ["a", "b", "c"] {
            let path = dir.path().join(name);
            write_with_mtime(&path, name.as_bytes(), 1_000);
            cache.resolve(&path).unwrap();
        }
        assert_eq!(cache.len(), 2);

        cache.resolve(&dir.path().join("a")).unwrap();
        assert_eq!(cache.reads(), 4);
    }
}
