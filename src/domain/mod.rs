//! Domain - Core Data Types

pub mod config;

pub use config::{ColorRotation, PersistedConfig};
