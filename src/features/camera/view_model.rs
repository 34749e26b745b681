//! Camera View Model
//!
//! Wires rotate and capture actions into the config store and image cache,
//! and exposes the status text and displayed image to the view.

use crate::assets::ResourceMap;
use crate::constants::STATUS_EXPECTING_PHOTO;
use crate::eventing::AppEvent;
use crate::error::Result;
use crate::helpers::AppPaths;
use crate::services::{CapturedPhoto, PhotoCapture};
use crate::states::{ConfigChange, ConfigStore, ImageCache, ImageHandle};
use crossbeam_channel::{Receiver, Sender};
use std::fs;
use std::io::Read;
use tracing::{debug, info, warn};

/// View model of the main camera page
pub struct CameraViewModel {
    config: ConfigStore,
    images: ImageCache,
    /// Status line, e.g. "Expecting Green"
    info_text: String,
    /// Currently displayed image
    source: Option<ImageHandle>,
    /// Property change events to the view
    events: Sender<AppEvent>,
    config_changes: Receiver<ConfigChange>,
}

impl CameraViewModel {
    /// Load the config and show whatever the image slot currently holds
    pub fn load(paths: AppPaths, resources: ResourceMap, events: Sender<AppEvent>) -> Result<Self> {
        let mut config = ConfigStore::load(paths, resources)?;
        let config_changes = config.subscribe();

        let mut vm = Self {
            config,
            images: ImageCache::new(),
            info_text: String::new(),
            source: None,
            events,
            config_changes,
        };
        vm.refresh()?;
        info!(status = %vm.info_text, "Camera view loaded");
        Ok(vm)
    }

    // ==================== Getters ====================

    pub fn info_text(&self) -> &str {
        &self.info_text
    }

    pub fn source(&self) -> Option<&ImageHandle> {
        self.source.as_ref()
    }

    pub fn config(&self) -> &ConfigStore {
        &self.config
    }

    // ==================== Commands ====================

    /// Rotate to the next fallback color and show it
    pub fn rotate(&mut self) -> Result<()> {
        let color = self.config.rotate()?;
        self.config.set_is_photo(false)?;
        debug!(color = %color, "Rotated color");

        self.images.invalidate(self.config.fixed_photo_path());
        self.refresh()
    }

    /// Take a photo through `capture` and show it
    pub async fn take_photo<C: PhotoCapture>(&mut self, capture: &C) -> Result<()> {
        let photo = capture.capture_photo().await?;
        self.on_photo_captured(photo)
    }

    /// Store a captured photo in the image slot and show it
    ///
    /// A cancelled (`None`) or empty capture leaves everything unchanged.
    pub fn on_photo_captured(&mut self, photo: Option<CapturedPhoto>) -> Result<()> {
        let Some(photo) = photo else {
            debug!("Capture cancelled");
            return Ok(());
        };

        // Buffer fully so the capture stream is closed before the slot is written.
        let mut bytes = Vec::new();
        {
            let mut input = photo.open_read()?;
            input.read_to_end(&mut bytes)?;
        }
        if bytes.is_empty() {
            warn!(path = ?photo.path(), "Captured photo is empty, ignoring");
            return Ok(());
        }

        let slot = self.config.fixed_photo_path().to_path_buf();
        fs::write(&slot, &bytes)?;
        info!(path = ?slot, bytes = bytes.len(), "Captured photo stored");

        let result = self.config.set_is_photo(true);
        if let Err(e) = &result {
            warn!(error = %e, "Failed to persist captured photo, restoring color");
            if let Err(restore) = self.config.restore_slot() {
                warn!(error = %restore, "Failed to restore image slot");
            }
        }
        self.images.invalidate(&slot);
        match result {
            Ok(()) => self.refresh(),
            Err(e) => {
                if let Err(refresh) = self.refresh() {
                    warn!(error = %refresh, "Failed to refresh view");
                }
                Err(e)
            }
        }
    }

    /// Recompute the status text and displayed image from the config
    pub fn refresh(&mut self) -> Result<()> {
        self.forward_config_changes();

        let text = if self.config.is_photo() {
            STATUS_EXPECTING_PHOTO.to_string()
        } else {
            format!("Expecting {}", self.config.color_rotation())
        };
        self.set_info_text(text);

        let source = self.images.resolve(self.config.fixed_photo_path())?;
        self.set_source(source);
        Ok(())
    }

    // ==================== Setters ====================

    fn set_info_text(&mut self, text: String) {
        if self.info_text != text {
            self.info_text = text;
            self.emit(AppEvent::info_text(self.info_text.clone()));
        }
    }

    fn set_source(&mut self, source: Option<ImageHandle>) {
        if self.source != source {
            self.source = source;
            self.emit(AppEvent::source(self.source.clone()));
        }
    }

    fn forward_config_changes(&mut self) {
        while let Ok(change) = self.config_changes.try_recv() {
            self.emit(change.into());
        }
    }

    fn emit(&self, event: AppEvent) {
        // The view may already be gone during shutdown.
        self.events.send(event).ok();
    }
}
