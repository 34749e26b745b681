//! Config Store
//!
//! Self-loading, self-saving display configuration. Every recognized mutation
//! outside of the load sequence is persisted immediately, and color changes
//! rewrite the fixed image slot from the bundled resources.

use crate::assets::ResourceMap;
use crate::domain::{ColorRotation, PersistedConfig};
use crate::error::Result;
use crate::helpers::{AppPaths, write_atomic};
use crossbeam_channel::{Receiver, Sender};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Change notification raised after a config field was mutated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigChange {
    ColorRotation(ColorRotation),
    IsPhoto(bool),
}

/// The process-wide display configuration
pub struct ConfigStore {
    /// Current fallback image selector
    color_rotation: ColorRotation,
    /// Whether the slot holds a captured photo
    is_photo: bool,
    /// Suppresses autosave and materialization while loading
    is_loading: bool,
    /// Config file and image slot locations
    paths: AppPaths,
    /// Rotation to bundled image mapping
    resources: ResourceMap,
    /// Change subscribers
    subscribers: Vec<Sender<ConfigChange>>,
}

impl ConfigStore {
    /// Load the config, falling back to a fresh default on a missing or
    /// unreadable file
    ///
    /// The returned store is never in the loading state and its config file
    /// exists on disk.
    pub fn load(paths: AppPaths, resources: ResourceMap) -> Result<Self> {
        let mut store = Self {
            color_rotation: ColorRotation::default(),
            is_photo: false,
            is_loading: true,
            paths,
            resources,
            subscribers: Vec::new(),
        };

        let loaded = if store.paths.config_file.exists() {
            info!(path = ?store.paths.config_file, "Loading config file");
            match read_persisted(&store.paths.config_file) {
                Ok(persisted) => Some(persisted),
                Err(e) => {
                    warn!(
                        error = %e,
                        path = ?store.paths.config_file,
                        "ADVISORY: Load failure will fall back to new config"
                    );
                    None
                }
            }
        } else {
            None
        };

        match loaded {
            Some(persisted) => {
                store.set_color_rotation(persisted.color_rotation)?;
                store.set_is_photo(persisted.is_photo)?;
                store.is_loading = false;

                if !store.is_photo && !store.paths.photo_file.exists() {
                    info!(path = ?store.paths.photo_file, "Image slot missing, restoring color");
                    store.restore_slot()?;
                }
            }
            None => {
                // Either new install or failed load.
                store.set_color_rotation(ColorRotation::Red)?;
                store.save()?;
                store.is_loading = false;
                store.restore_slot()?;
                info!(path = ?store.paths.config_file, "Created default config");
            }
        }

        Ok(store)
    }

    // ==================== Getters ====================

    pub fn color_rotation(&self) -> ColorRotation {
        self.color_rotation
    }

    pub fn is_photo(&self) -> bool {
        self.is_photo
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// The single image slot shared by fallback colors and captured photos
    pub fn fixed_photo_path(&self) -> &Path {
        &self.paths.photo_file
    }

    pub fn config_file_path(&self) -> &Path {
        &self.paths.config_file
    }

    /// Snapshot of the persisted fields
    pub fn persisted(&self) -> PersistedConfig {
        PersistedConfig {
            color_rotation: self.color_rotation,
            is_photo: self.is_photo,
        }
    }

    // ==================== Setters ====================

    /// Set the color, rewriting the image slot and persisting on change
    pub fn set_color_rotation(&mut self, value: ColorRotation) -> Result<()> {
        if self.color_rotation == value {
            return Ok(());
        }
        if self.is_loading {
            self.color_rotation = value;
            return Ok(());
        }

        // Nothing is committed until both the slot and the config file are written.
        self.resources.materialize(value, &self.paths.photo_file)?;
        let next = PersistedConfig {
            color_rotation: value,
            ..self.persisted()
        };
        if let Err(e) = self.write_persisted(&next) {
            if let Err(restore) = self.restore_slot() {
                warn!(error = %restore, "Failed to restore image slot");
            }
            return Err(e);
        }
        self.color_rotation = value;
        self.notify(ConfigChange::ColorRotation(value));
        Ok(())
    }

    /// Set the photo flag, persisting on change
    ///
    /// The flag only changes once the config file holds the new value.
    pub fn set_is_photo(&mut self, value: bool) -> Result<()> {
        if self.is_photo == value {
            return Ok(());
        }
        if self.is_loading {
            self.is_photo = value;
            return Ok(());
        }

        self.write_persisted(&PersistedConfig {
            is_photo: value,
            ..self.persisted()
        })?;
        self.is_photo = value;
        self.notify(ConfigChange::IsPhoto(value));
        Ok(())
    }

    /// Advance to the next color and persist
    pub fn rotate(&mut self) -> Result<ColorRotation> {
        let next = self.color_rotation.next();
        self.set_color_rotation(next)?;
        // The setter already saved; the second write carries identical content.
        self.save()?;
        Ok(next)
    }

    /// Write the persisted fields over the config file
    pub fn save(&self) -> Result<()> {
        self.write_persisted(&self.persisted())
    }

    /// Rewrite the image slot from the current color unless a photo is shown
    pub fn restore_slot(&self) -> Result<()> {
        if self.is_photo {
            return Ok(());
        }
        self.resources
            .materialize(self.color_rotation, &self.paths.photo_file)
    }

    fn write_persisted(&self, persisted: &PersistedConfig) -> Result<()> {
        let json = persisted.to_json()?;
        write_atomic(&self.paths.config_file, json.as_bytes())?;
        debug!(
            path = ?self.paths.config_file,
            color = %persisted.color_rotation,
            is_photo = persisted.is_photo,
            "Config saved"
        );
        Ok(())
    }

    // ==================== Notifications ====================

    /// Receive every subsequent change notification
    pub fn subscribe(&mut self) -> Receiver<ConfigChange> {
        let (tx, rx) = crossbeam_channel::unbounded();
        self.subscribers.push(tx);
        rx
    }

    fn notify(&mut self, change: ConfigChange) {
        self.subscribers.retain(|tx| tx.send(change).is_ok());
    }
}

impl std::fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigStore")
            .field("color_rotation", &self.color_rotation)
            .field("is_photo", &self.is_photo)
            .field("is_loading", &self.is_loading)
            .field("paths", &self.paths)
            .finish()
    }
}

fn read_persisted(path: &Path) -> Result<PersistedConfig> {
    let content = fs::read_to_string(path)?;
    Ok(PersistedConfig::from_json(&content)?)
}
