//! Service Layer
//!
//! External collaborators (photo capture) and the async runtime bridge.

pub mod capture;
pub mod runtime;

pub use capture::{CapturedPhoto, FileCapture, PhotoCapture};
