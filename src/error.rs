//! Error types for scene setup and teardown.
//!
//! None of these ever reach the page: the host logs them and draws nothing.

use std::fmt;

/// Errors that can occur while mounting, configuring or tearing down a scene.
#[derive(Debug)]
pub enum SceneError {
    /// The container element is missing or has no layout box.
    ContainerUnavailable,
    /// No 2D drawing context could be obtained.
    ContextUnavailable,
    /// A configuration value is out of range.
    InvalidConfig(String),
    /// Configuration JSON could not be parsed.
    ConfigParse(serde_json::Error),
    /// Removing a listener or cancelling a frame failed.
    Detach(String),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::ContainerUnavailable => write!(f, "Scene container is not available"),
            SceneError::ContextUnavailable => write!(f, "2D drawing context is not available"),
            SceneError::InvalidConfig(msg) => write!(f, "Invalid scene config: {}", msg),
            SceneError::ConfigParse(e) => write!(f, "Failed to parse scene config: {}", e),
            SceneError::Detach(msg) => write!(f, "Teardown step failed: {}", msg),
        }
    }
}

impl std::error::Error for SceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SceneError::ConfigParse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SceneError {
    fn from(e: serde_json::Error) -> Self {
        SceneError::ConfigParse(e)
    }
}
