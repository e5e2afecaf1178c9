//! Presentation state and the persisted theme preference.
//!
//! [`PresentationState`] is the (language, theme) pair that governs every
//! render. It is created once per session and only changes through the
//! controller's toggle operations.
//!
//! The theme choice survives across sessions through a [`PreferenceStore`]:
//! a single key holding `"dark"` or `"light"`, read once at boot and written
//! once per toggle. [`MemoryStore`] backs tests and previews; [`FileStore`]
//! keeps the entries in a small JSON file.

use crate::types::{Lang, Theme};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The pair governing all rendering output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresentationState {
    pub language: Lang,
    pub theme: Theme,
}

impl PresentationState {
    pub fn new(language: Lang, theme: Theme) -> Self {
        Self { language, theme }
    }

    /// Root element class list for this state, theme marker included.
    pub fn root_classes(&self) -> Vec<String> {
        let mut classes = vec![
            "scroll-smooth".to_string(),
            format!("lang-{}", self.language.code()),
        ];
        if self.theme.has_marker() {
            classes.push(Theme::LIGHT_MARKER.to_string());
        }
        classes
    }
}

impl Default for PresentationState {
    fn default() -> Self {
        Self::new(Lang::Th, Theme::Dark)
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("corrupt preference file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Key-value storage for presentation preferences.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store, lives as long as the session.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with one entry.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(key.to_string(), value.to_string());
        Self { entries }
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preferences persisted as a flat JSON object on disk.
///
/// The file is read on every `get` and rewritten on every `set`; there is
/// one entry and it changes at human speed.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&entries)?)?;
        Ok(())
    }
}

/// Resolve the boot-time theme: a valid stored value wins over `default`.
///
/// An unrecognized stored value is ignored with a warning rather than
/// failing the page.
pub fn restore_theme(
    store: &impl PreferenceStore,
    key: &str,
    default: Theme,
) -> Result<Theme, StoreError> {
    let Some(stored) = store.get(key)? else {
        return Ok(default);
    };
    match stored.parse::<Theme>() {
        Ok(theme) => Ok(theme),
        Err(e) => {
            tracing::warn!(key, value = %stored, "ignoring stored theme: {e}");
            Ok(default)
        }
    }
}
