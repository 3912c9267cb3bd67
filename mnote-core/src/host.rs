//! # Host Interfaces
//!
//! The note workflow never touches a filesystem, an editor or a settings file directly.
//! It talks to the host through the traits in this module:
//!
//! - [`NoteStore`] - looks up, reads and creates files inside the vault
//! - [`EditorHost`] - opens files in panes and inserts text into the active editor
//! - [`SettingsPersistence`] - loads and saves the opaque settings blob
//! - [`Notifier`] - shows transient messages to the user
//!
//! [`crate::file_storage`] implements the storage traits on top of a directory, and
//! [`crate::memory`] provides in-memory implementations of all four.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What a vault path points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Folder,
}

/// How a newly created note is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaneMode {
    /// Split the current pane and open the note next to it.
    #[default]
    Split,
    /// Open the note in a new tab.
    Tab,
}

/// A position inside an editor buffer. Both fields are 0-based, `ch` counts characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub line: usize,
    pub ch: usize,
}

#[async_trait]
pub trait NoteStore: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns what `path` points at, or `None` if nothing is there.
    async fn lookup(&self, path: &str) -> Result<Option<EntryKind>, Self::Error>;

    async fn exists(&self, path: &str) -> Result<bool, Self::Error> {
        Ok(self.lookup(path).await?.is_some())
    }

    async fn read(&self, path: &str) -> Result<String, Self::Error>;

    /// Creates a new file. Fails if anything already exists at `path`.
    async fn create(&self, path: &str, content: &str) -> Result<(), Self::Error>;
}

#[async_trait]
pub trait EditorHost: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn open_in_pane(&self, path: &str, mode: PaneMode) -> Result<(), Self::Error>;

    /// Inserts `text` at the cursor of the active markdown editor.
    ///
    /// Returns `Ok(false)` when no markdown editor is active.
    async fn insert_at_cursor(&self, text: &str) -> Result<bool, Self::Error>;
}

#[async_trait]
pub trait SettingsPersistence: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Loads the persisted blob, `None` if nothing was saved yet.
    async fn load(&self) -> Result<Option<Value>, Self::Error>;

    /// Replaces the persisted blob.
    async fn save(&self, data: &Value) -> Result<(), Self::Error>;
}

pub trait Notifier: Send + Sync {
    fn show(&self, message: &str);
}

/// Inserts `text` into `document` at `cursor`.
///
/// A line past the end of the document appends, a `ch` past the end of its line
/// inserts at the end of that line.
pub fn insert_text_at(document: &mut String, cursor: Cursor, text: &str) {
    let mut line_start = 0;
    for _ in 0..cursor.line {
        match document[line_start..].find('\n') {
            Some(offset) => line_start += offset + 1,
            None => {
                document.push_str(text);
                return;
            }
        }
    }

    let line_end = document[line_start..]
        .find('\n')
        .map_or(document.len(), |offset| line_start + offset);

    let offset = document[line_start..line_end]
        .char_indices()
        .nth(cursor.ch)
        .map_or(line_end, |(index, _)| line_start + index);

    document.insert_str(offset, text);
}
