//! Feature Pages
//!
//! Page-level view models.

pub mod camera;
