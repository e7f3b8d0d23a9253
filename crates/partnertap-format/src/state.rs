//! Bookmark state for resuming a run.

use partnertap_streams::StreamName;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::FormatError;

/// Resume position of one stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    /// Last day window fully emitted (`YYYY-MM-DD`).
    pub start_date: String,
}

impl Bookmark {
    /// Creates a bookmark at `day`.
    #[must_use]
    pub fn new(day: impl Into<String>) -> Self {
        Self {
            start_date: day.into(),
        }
    }
}

/// Per-stream bookmarks.
///
/// Resuming from a bookmark re-requests the bookmarked day, so consumers see
/// each record at least once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    /// Bookmarks keyed by stream name.
    #[serde(default)]
    pub bookmarks: BTreeMap<String, Bookmark>,
}

impl State {
    /// Loads state from a JSON file. A missing file yields empty state.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, FormatError> {
        match std::fs::read_to_string(path) {
            Ok(contents) if contents.trim().is_empty() => Ok(Self::default()),
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Writes state to a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), FormatError> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents + "\n")?;
        Ok(())
    }

    /// Returns the bookmarked day for `stream`.
    #[must_use]
    pub fn bookmark(&self, stream: StreamName) -> Option<&str> {
        self.bookmarks
            .get(stream.as_str())
            .map(|b| b.start_date.as_str())
    }

    /// Moves the bookmark of `stream` to `day`.
    pub fn set_bookmark(&mut self, stream: StreamName, day: &str) {
        self.bookmarks
            .insert(stream.as_str().to_string(), Bookmark::new(day));
    }
}

/// Tracks the day of the records flowing to a sink.
///
/// Records arrive ordered by day, so the first record of a new day means the
/// previous day has been fully emitted.
#[derive(Debug, Clone, Default)]
pub struct BookmarkTracker {
    current: Option<String>,
}

impl BookmarkTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub const fn new() -> Self {
        Self { current: None }
    }

    /// Observes the day of the next record.
    ///
    /// Returns the previous day when `day` starts a new one.
    pub fn observe(&mut self, day: &str) -> Option<String> {
        if self.current.as_deref() == Some(day) {
            return None;
        }
        self.current.replace(day.to_string())
    }

    /// Returns the day of the last observed record.
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }
}
