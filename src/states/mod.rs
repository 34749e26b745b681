//! State Management Layer
//!
//! The persisted display configuration and the image cache derived from it.
//!
//! ```text
//! UI Action → ConfigStore mutation → autosave + slot rewrite → ImageCache::resolve → UI Refresh
//! ```

mod config;
mod image;

pub use config::*;
pub use image::*;
