//! Persisted session state.
//!
//! A single JSON object on disk, one entry per key. Reads fall back to
//! `None` for missing or corrupt data and writes never fail the caller:
//! storage problems are logged and dropped.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::DateTime;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use aa_dice::{Anchor, DieFace, RollResult, Total};

/// Key for the selected question id.
pub const KEY_SELECTED_QUESTION: &str = "aa_selected_question_id";
/// Key for the anchor of the last roll.
pub const KEY_LAST_ANCHOR: &str = "aa_last_anchor";
/// Key for the faces and time of the last roll.
pub const KEY_LAST_RESULT: &str = "aa_last_result";

/// The stored form of a completed roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRoll {
    /// First face.
    pub d1: DieFace,
    /// Second face.
    pub d2: DieFace,
    /// Sum of both faces.
    pub total: Total,
    /// Resolve time in milliseconds since the Unix epoch.
    pub ts: i64,
}

impl From<&RollResult> for StoredRoll {
    fn from(result: &RollResult) -> Self {
        Self {
            d1: result.face1(),
            d2: result.face2(),
            total: result.total(),
            ts: result.timestamp().timestamp_millis(),
        }
    }
}

impl StoredRoll {
    /// Rebuild the roll made under `anchor`, or `None` if the record is
    /// inconsistent.
    pub fn to_result(&self, anchor: Anchor) -> Option<RollResult> {
        let timestamp = DateTime::from_timestamp_millis(self.ts)?;
        let result = RollResult::at(self.d1, self.d2, anchor, timestamp);
        (result.is_consistent() && result.total() == self.total).then_some(result)
    }
}

/// File-backed key/value store for session state.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Use the state file at `path`. Nothing is read or created yet.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the state file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Store `value` under `key`.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) {
        let value = match serde_json::to_value(value) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(key, error = %e, "could not serialize session value");
                return;
            }
        };
        let mut entries = self.read_all();
        entries.insert(key.to_string(), value);
        self.write_all(&entries);
    }

    /// Read the value under `key`, or `None` if absent or unreadable.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.read_all().remove(key)?;
        match serde_json::from_value(value) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!(key, error = %e, "ignoring corrupt session value");
                None
            }
        }
    }

    /// Drop the value under `key`.
    pub fn remove(&self, key: &str) {
        let mut entries = self.read_all();
        if entries.remove(key).is_some() {
            self.write_all(&entries);
        }
    }

    /// Delete all stored state.
    pub fn clear(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "could not clear session state");
            }
        }
    }

    /// The saved question id.
    pub fn selected_question_id(&self) -> Option<String> {
        self.load(KEY_SELECTED_QUESTION)
    }

    /// Save the selected question id.
    pub fn save_selected_question_id(&self, id: &str) {
        self.save(KEY_SELECTED_QUESTION, &id);
    }

    /// The anchor of the last roll. Unknown stored names read as `low`.
    pub fn last_anchor(&self) -> Option<Anchor> {
        self.load::<String>(KEY_LAST_ANCHOR)
            .map(|s| Anchor::parse_or_low(&s))
    }

    /// The last roll, if one is stored and consistent.
    pub fn last_result(&self) -> Option<RollResult> {
        let anchor = self.last_anchor().unwrap_or(Anchor::Low);
        let stored: StoredRoll = self.load(KEY_LAST_RESULT)?;
        let result = stored.to_result(anchor);
        if result.is_none() {
            tracing::warn!(?stored, "ignoring inconsistent stored roll");
        }
        result
    }

    /// Save a completed roll as `{anchor}` and `{d1, d2, total, ts}`.
    pub fn save_roll(&self, result: &RollResult) {
        self.save(KEY_LAST_ANCHOR, &result.anchor());
        self.save(KEY_LAST_RESULT, &StoredRoll::from(result));
    }

    fn read_all(&self) -> Map<String, Value> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Map::new(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "could not read session state");
                return Map::new();
            }
        };
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(entries)) => entries,
            Ok(_) | Err(_) => {
                tracing::warn!(path = %self.path.display(), "session state is corrupt, starting fresh");
                Map::new()
            }
        }
    }

    fn write_all(&self, entries: &Map<String, Value>) {
        if let Err(e) = self.try_write_all(entries) {
            tracing::warn!(path = %self.path.display(), error = %e, "could not write session state");
        }
    }

    fn try_write_all(&self, entries: &Map<String, Value>) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, json)
    }
}
