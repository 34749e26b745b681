//! AppEvent - Application Event Enum
//!
//! Property change events sent from the view model to the UI layer.

use crate::states::{ConfigChange, ImageHandle};

/// Application events for view model -> UI communication
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Status line changed
    InfoTextChanged { text: String },

    /// Displayed image changed (None clears the image)
    SourceChanged { source: Option<ImageHandle> },

    /// A persisted config field changed
    ConfigChanged { change: ConfigChange },
}

impl AppEvent {
    pub fn info_text(text: impl Into<String>) -> Self {
        Self::InfoTextChanged { text: text.into() }
    }

    pub fn source(source: Option<ImageHandle>) -> Self {
        Self::SourceChanged { source }
    }
}

impl From<ConfigChange> for AppEvent {
    fn from(change: ConfigChange) -> Self {
        Self::ConfigChanged { change }
    }
}
