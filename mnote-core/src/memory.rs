//! In-memory implementations of the host interfaces.
//!
//! Used by the test suites and by front-ends that want to preview the workflow
//! without touching the disk.

use crate::error::VaultError;
use crate::host::{Cursor, EditorHost, EntryKind, NoteStore, Notifier, PaneMode, SettingsPersistence, insert_text_at};
use crate::vault_path::{check_path, is_markdown, normalize_path};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::convert::Infallible;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Clone)]
enum Entry {
    File(String),
    Folder,
}

/// A vault held in a map of normalized paths.
#[derive(Debug, Default)]
pub struct MemoryVault {
    entries: Mutex<BTreeMap<String, Entry>>,
}

impl MemoryVault {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: &str, content: &str) -> Self {
        lock(&self.entries).insert(normalize_path(path), Entry::File(content.to_string()));
        self
    }

    pub fn with_folder(self, path: &str) -> Self {
        lock(&self.entries).insert(normalize_path(path), Entry::Folder);
        self
    }

    /// Content of the file at `path`, if there is one.
    pub fn file(&self, path: &str) -> Option<String> {
        match lock(&self.entries).get(&normalize_path(path)) {
            Some(Entry::File(content)) => Some(content.clone()),
            _ => None,
        }
    }

    /// Paths of all files, sorted.
    pub fn files(&self) -> Vec<String> {
        lock(&self.entries)
            .iter()
            .filter(|(_, entry)| matches!(entry, Entry::File(_)))
            .map(|(path, _)| path.clone())
            .collect()
    }
}

#[async_trait]
impl NoteStore for MemoryVault {
    type Error = VaultError;

    async fn lookup(&self, path: &str) -> Result<Option<EntryKind>, VaultError> {
        Ok(lock(&self.entries).get(&normalize_path(path)).map(|entry| match entry {
            Entry::File(_) => EntryKind::File,
            Entry::Folder => EntryKind::Folder,
        }))
    }

    async fn read(&self, path: &str) -> Result<String, VaultError> {
        self.file(path).ok_or_else(|| VaultError::NotFound(normalize_path(path)))
    }

    async fn create(&self, path: &str, content: &str) -> Result<(), VaultError> {
        let path = normalize_path(path);
        check_path(&path)?;

        let mut entries = lock(&self.entries);
        if entries.contains_key(&path) {
            return Err(VaultError::AlreadyExists(path));
        }
        entries.insert(path, Entry::File(content.to_string()));
        Ok(())
    }
}

/// The markdown document the user was editing before the dialog opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveDocument {
    pub path: String,
    pub text: String,
    pub cursor: Cursor,
}

/// Records every pane opened and edits the active document in place.
#[derive(Debug, Default)]
pub struct RecordingEditor {
    opened: Mutex<Vec<(String, PaneMode)>>,
    active: Mutex<Option<ActiveDocument>>,
}

impl RecordingEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_active_document(self, path: &str, text: &str, cursor: Cursor) -> Self {
        *lock(&self.active) = Some(ActiveDocument {
            path: path.to_string(),
            text: text.to_string(),
            cursor,
        });
        self
    }

    pub fn opened(&self) -> Vec<(String, PaneMode)> {
        lock(&self.opened).clone()
    }

    pub fn active_document(&self) -> Option<ActiveDocument> {
        lock(&self.active).clone()
    }
}

#[async_trait]
impl EditorHost for RecordingEditor {
    type Error = Infallible;

    async fn open_in_pane(&self, path: &str, mode: PaneMode) -> Result<(), Infallible> {
        lock(&self.opened).push((path.to_string(), mode));
        Ok(())
    }

    async fn insert_at_cursor(&self, text: &str) -> Result<bool, Infallible> {
        let mut active = lock(&self.active);
        match active.as_mut() {
            Some(document) if is_markdown(&document.path) => {
                insert_text_at(&mut document.text, document.cursor, text);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

/// Keeps every message shown.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        lock(&self.messages).clone()
    }
}

impl Notifier for RecordingNotifier {
    fn show(&self, message: &str) {
        lock(&self.messages).push(message.to_string());
    }
}

/// Settings blob kept in memory, counting saves.
#[derive(Debug, Default)]
pub struct MemoryPersistence {
    blob: Mutex<Option<Value>>,
    saves: AtomicUsize,
}

impl MemoryPersistence {
    pub fn with_blob(blob: Value) -> Self {
        Self {
            blob: Mutex::new(Some(blob)),
            saves: AtomicUsize::new(0),
        }
    }

    pub fn blob(&self) -> Option<Value> {
        lock(&self.blob).clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SettingsPersistence for MemoryPersistence {
    type Error = Infallible;

    async fn load(&self) -> Result<Option<Value>, Infallible> {
        Ok(self.blob())
    }

    async fn save(&self, data: &Value) -> Result<(), Infallible> {
        *lock(&self.blob) = Some(data.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
