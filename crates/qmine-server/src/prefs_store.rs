//! Per-player preference persistence.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::warn;

use qmine_world::PlayerPrefs;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access prefs store: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode prefs store: {0}")]
    Encode(#[from] serde_json::Error),
}

/// JSON-backed store of player preferences, keyed by player name.
/// Unknown players read as the defaults.
#[derive(Debug)]
pub struct PrefsStore {
    path: PathBuf,
    records: HashMap<String, PlayerPrefs>,
}

impl PrefsStore {
    /// Open the store at `path`. A missing file starts empty; a corrupt
    /// one is discarded with a warning rather than blocking startup.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let records = match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(records) => records,
                Err(e) => {
                    warn!(path = %path.display(), "discarding unreadable prefs store: {e}");
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, records })
    }

    pub fn get(&self, player: &str) -> PlayerPrefs {
        self.records.get(player).cloned().unwrap_or_default()
    }

    /// Update a player's record and persist the whole store.
    pub fn set(&mut self, player: impl Into<String>, prefs: PlayerPrefs) -> Result<(), StoreError> {
        self.records.insert(player.into(), prefs);
        self.save()
    }

    pub fn save(&self) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir)?;
            }
        }
        let json = serde_json::to_string_pretty(&self.records)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
