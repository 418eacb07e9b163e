//! Session persistence: the whiteboard document as a JSON file.
//!
//! A session file carries the elements, their z-order, and the saved view.
//! Selection and in-flight interaction state are deliberately not part of
//! the format.

use crate::camera::Camera;
use crate::store::ElementStore;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Current session file format version.
pub const FILE_VERSION: u32 = 1;
/// Name given to a session that was never renamed.
pub const DEFAULT_SESSION_NAME: &str = "Untitled Co-Creation Canvas";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed session file: {0}")]
    Format(#[from] serde_json::Error),
    #[error("unsupported session file version {0} (newest supported: {FILE_VERSION})")]
    Version(u32),
}

/// A complete whiteboard document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default = "default_session_name")]
    pub session_name: String,
    pub elements: ElementStore,
    #[serde(default)]
    pub view: Camera,
}

fn default_version() -> u32 {
    FILE_VERSION
}

fn default_session_name() -> String {
    DEFAULT_SESSION_NAME.to_string()
}

impl Default for Session {
    fn default() -> Self {
        Self {
            version: FILE_VERSION,
            session_name: default_session_name(),
            elements: ElementStore::new(),
            view: Camera::new(),
        }
    }
}

impl Session {
    pub fn new(session_name: impl Into<String>) -> Self {
        Self {
            session_name: session_name.into(),
            ..Self::default()
        }
    }

    pub fn to_json(&self) -> Result<String, StorageError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a session from JSON. Files written by a newer format are
    /// rejected; the saved zoom is clamped back into the valid range, so
    /// a hand-edited file cannot produce an unusable view.
    pub fn from_json(json: &str) -> Result<Self, StorageError> {
        let mut session: Session = serde_json::from_str(json)?;
        if session.version > FILE_VERSION {
            return Err(StorageError::Version(session.version));
        }
        session.view.clamp_zoom();
        Ok(session)
    }

    pub fn save(&self, path: &Path) -> Result<(), StorageError> {
        let json = self.to_json()?;
        fs::write(path, json)?;
        log::info!(
            "saved session '{}' ({} elements) to {}",
            self.session_name,
            self.elements.len(),
            path.display()
        );
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, StorageError> {
        let json = fs::read_to_string(path)?;
        let session = Self::from_json(&json)?;
        log::info!(
            "loaded session '{}' ({} elements) from {}",
            session.session_name,
            session.elements.len(),
            path.display()
        );
        Ok(session)
    }
}
