//! Config - Persisted Display Configuration

use crate::constants::IMAGE_ASSET_DIR;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fallback image selector, cycled by the rotate command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorRotation {
    #[default]
    Red,
    Green,
    Yellow,
    Blue,
}

impl ColorRotation {
    /// All variants in rotation order
    pub const ALL: [ColorRotation; 4] = [
        ColorRotation::Red,
        ColorRotation::Green,
        ColorRotation::Yellow,
        ColorRotation::Blue,
    ];

    /// Next value in the cycle, wrapping Blue back to Red
    pub fn next(self) -> Self {
        match self {
            ColorRotation::Red => ColorRotation::Green,
            ColorRotation::Green => ColorRotation::Yellow,
            ColorRotation::Yellow => ColorRotation::Blue,
            ColorRotation::Blue => ColorRotation::Red,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ColorRotation::Red => "Red",
            ColorRotation::Green => "Green",
            ColorRotation::Yellow => "Yellow",
            ColorRotation::Blue => "Blue",
        }
    }

    /// Lookup key of the bundled image, e.g. `red.png`
    pub fn resource_key(self) -> String {
        format!("{}.png", self.name().to_lowercase())
    }

    /// Bundle-relative location of the image, e.g. `Resources/Images/red.png`
    pub fn asset_path(self) -> String {
        format!("{}/{}", IMAGE_ASSET_DIR, self.resource_key())
    }
}

impl fmt::Display for ColorRotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The subset of the config that is written to disk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedConfig {
    /// Current fallback image selector
    #[serde(default)]
    pub color_rotation: ColorRotation,
    /// Whether the last captured photo is displayed instead of a color
    #[serde(default)]
    pub is_photo: bool,
}

impl PersistedConfig {
    /// Render as indented, human-readable JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_cycle() {
        let mut value = ColorRotation::Red;
        let mut visited = Vec::new();
        for _ in 0..4 {
            value = value.next();
            visited.push(value);
        }
        assert_eq!(
            visited,
            vec![
                ColorRotation::Green,
                ColorRotation::Yellow,
                ColorRotation::Blue,
                ColorRotation::Red,
            ]
        );
    }

    #[test]
    fn test_resource_names() {
        assert_eq!(ColorRotation::Yellow.resource_key(), "yellow.png");
        assert_eq!(ColorRotation::Blue.asset_path(), "Resources/Images/blue.png");
        assert_eq!(ColorRotation::Green.to_string(), "Green");
    }

    #[test]
    fn test_json_shape() {
        let config = PersistedConfig {
            color_rotation: ColorRotation::Blue,
            is_photo: true,
        };
        let json = config.to_json().unwrap();
        assert!(json.contains('\n'));

        let fields: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(&json).unwrap();
        let mut keys: Vec<&str> = fields.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["colorRotation", "isPhoto"]);
        assert_eq!(fields["colorRotation"], "Blue");
        assert_eq!(fields["isPhoto"], true);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = PersistedConfig::from_json(r#"{ "isPhoto": true, "extra": 1 }"#).unwrap();
        assert_eq!(config.color_rotation, ColorRotation::Red);
        assert!(config.is_photo);
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(PersistedConfig::from_json("\u{1}\u{2}not json").is_err());
        assert!(PersistedConfig::from_json("null").is_err());
        assert!(PersistedConfig::from_json(r#"{ "colorRotation": "Purple" }"#).is_err());
    }
}
