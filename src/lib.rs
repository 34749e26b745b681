//! Camera Prototype Library
//!
//! A camera capture page bound to a persisted, self-saving display
//! configuration. The image slot on disk shows either the last captured
//! photo or one of four bundled fallback colors.

pub mod app;
pub mod assets;
pub mod constants;
pub mod domain;
pub mod error;
pub mod eventing;
pub mod features;
pub mod helpers;
pub mod services;
pub mod states;
