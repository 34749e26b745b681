//! Embedded assets for camera-proto
//!
//! Uses rust-embed to bundle the fallback color images at compile time.

use crate::domain::ColorRotation;
use crate::error::{Error, Result};
use rust_embed::RustEmbed;
use std::borrow::Cow;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Named binary assets, looked up by name
pub trait ResourceStore: Send + Sync {
    /// Load the bytes of an asset
    fn load(&self, name: &str) -> Option<Cow<'static, [u8]>>;
    /// Names of every available asset
    fn list(&self) -> Vec<String>;
}

/// Fallback images embedded from `assets/images`
#[derive(RustEmbed)]
#[folder = "assets/images"]
#[include = "*.png"]
pub struct EmbeddedImages;

impl ResourceStore for EmbeddedImages {
    fn load(&self, name: &str) -> Option<Cow<'static, [u8]>> {
        if name.is_empty() {
            return None;
        }
        <Self as RustEmbed>::get(name).map(|f| f.data)
    }

    fn list(&self) -> Vec<String> {
        <Self as RustEmbed>::iter().map(|p| p.into_owned()).collect()
    }
}

/// Validated mapping from each `ColorRotation` to its bundled image
///
/// Built once at startup so an asset/enum mismatch fails before any rotation.
#[derive(Clone)]
pub struct ResourceMap {
    store: Arc<dyn ResourceStore>,
    names: [String; 4],
}

impl ResourceMap {
    /// Match every rotation to exactly one asset whose name ends with its key
    pub fn validate(store: Arc<dyn ResourceStore>) -> Result<Self> {
        let available = store.list();
        let mut names: [String; 4] = Default::default();

        for rotation in ColorRotation::ALL {
            let key = rotation.resource_key();
            let matches: Vec<String> = available
                .iter()
                .filter(|name| name.to_lowercase().ends_with(&key))
                .cloned()
                .collect();

            names[rotation as usize] = match matches.len() {
                0 => return Err(Error::ResourceNotFound { name: key }),
                1 => matches.into_iter().next().unwrap_or_default(),
                _ => return Err(Error::AmbiguousResource { key, matches }),
            };
        }

        tracing::debug!(resources = ?names, "Validated embedded color resources");
        Ok(Self { store, names })
    }

    /// Map using the images embedded in the binary
    pub fn embedded() -> Result<Self> {
        Self::validate(Arc::new(EmbeddedImages))
    }

    /// Asset name mapped to a rotation
    pub fn name(&self, rotation: ColorRotation) -> &str {
        &self.names[rotation as usize]
    }

    /// Copy the rotation's image over `dest`, replacing any existing content
    pub fn materialize(&self, rotation: ColorRotation, dest: &Path) -> Result<()> {
        let name = self.name(rotation);
        let Some(data) = self.store.load(name) else {
            return Err(Error::ResourceNotFound {
                name: name.to_string(),
            });
        };
        fs::write(dest, &data)?;
        tracing::debug!(
            resource = name,
            asset = %rotation.asset_path(),
            dest = ?dest,
            bytes = data.len(),
            "Materialized resource"
        );
        Ok(())
    }
}

impl std::fmt::Debug for ResourceMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceMap")
            .field("names", &self.names)
            .finish()
    }
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    #[test]
    fn test_embedded_images_cover_every_rotation() {
        let map = ResourceMap::embedded().unwrap();
        for rotation in ColorRotation::ALL {
            assert_eq!(map.name(rotation), rotation.resource_key());
        }

        let red = EmbeddedImages.load("red.png").unwrap();
        assert!(red.starts_with(b"\x89PNG"));
    }

    #[test]
    fn test_suffix_match_is_case_insensitive() {
        let store = MemoryResources::default();
        store.insert("Images/RED.PNG", vec![1]);
        store.insert("Images/Green.png", vec![2]);
        store.insert("Images/yellow.png", vec![3]);
        store.insert("Images/blue.png", vec![4]);

        let map = ResourceMap::validate(Arc::new(store)).unwrap();
        assert_eq!(map.name(ColorRotation::Red), "Images/RED.PNG");
        assert_eq!(map.name(ColorRotation::Green), "Images/Green.png");
    }

    #[test]
    fn test_missing_resource_fails_validation() {
        let store = MemoryResources::colors();
        store.remove("Camera.Resources.Images.blue.png");

        let err = ResourceMap::validate(Arc::new(store)).unwrap_err();
        assert!(err.is_packaging_fault());
        assert!(matches!(err, Error::ResourceNotFound { ref name } if name == "blue.png"));
    }

    #[test]
    fn test_ambiguous_resource_fails_validation() {
        let store = MemoryResources::colors();
        store.insert("thumbs/green.png", vec![9]);

        let err = ResourceMap::validate(Arc::new(store)).unwrap_err();
        assert!(matches!(err, Error::AmbiguousResource { ref key, .. } if key == "green.png"));
    }

    #[test]
    fn test_materialize_overwrites_destination() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("slot");
        fs::write(&dest, b"a much longer previous payload").unwrap();

        let map = color_map();
        map.materialize(ColorRotation::Yellow, &dest).unwrap();

        assert_eq!(fs::read(&dest).unwrap(), color_bytes(ColorRotation::Yellow));
    }

    #[test]
    fn test_materialize_reports_vanished_resource() {
        let store = Arc::new(MemoryResources::colors());
        let map = ResourceMap::validate(store.clone()).unwrap();
        store.remove("Camera.Resources.Images.red.png");

        let dir = tempfile::tempdir().unwrap();
        let err = map
            .materialize(ColorRotation::Red, &dir.path().join("slot"))
            .unwrap_err();
        assert!(err.is_packaging_fault());
    }
}
