//! # File Storage
//!
//! This module backs the host interfaces with the local filesystem.
//!
//! - [`FileVault`] implements [`NoteStore`] over a vault directory. Notes and templates
//!   are plain markdown files addressed by their vault-relative path.
//! - [`JsonFilePersistence`] implements [`SettingsPersistence`] with a JSON file.
//!
//! # Examples
//!
//! ```rust
//! use mnote_core::file_storage::FileVault;
//! use mnote_core::host::NoteStore;
//! use tempfile::TempDir;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let temp_dir = TempDir::new().unwrap();
//! let vault = FileVault {
//!     base_path: temp_dir.path().to_path_buf(),
//! };
//!
//! vault.create("Meeting Notes/2024-03-01 - Standup.md", "# Standup").await.expect("Failed to create note");
//! assert!(vault.exists("Meeting Notes/2024-03-01 - Standup.md").await.unwrap());
//! # }
//! ```

use crate::error::{PersistenceError, VaultError};
use crate::host::{EntryKind, NoteStore, SettingsPersistence};
use crate::vault_path::{check_path, normalize_path};
use async_trait::async_trait;
use serde_json::Value;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

/// Folder inside the vault holding the tool's own files.
pub const CONFIG_DIR: &str = ".mnote";

/// File name of the persisted settings blob.
pub const SETTINGS_FILE: &str = "settings.json";

/// A vault on the local file system.
pub struct FileVault {
    /// The vault's root directory. All note paths are relative to it.
    pub base_path: PathBuf,
}

#[async_trait]
impl NoteStore for FileVault {
    type Error = VaultError;

    /// Finds out what a vault path points at.
    ///
    /// Paths that could never name a vault file resolve to `None` rather than an error.
    async fn lookup(&self, path: &str) -> Result<Option<EntryKind>, VaultError> {
        let Ok(file_path) = self.resolve(path) else {
            return Ok(None);
        };

        match fs::metadata(&file_path).await {
            Ok(metadata) if metadata.is_file() => Ok(Some(EntryKind::File)),
            Ok(metadata) if metadata.is_dir() => Ok(Some(EntryKind::Folder)),
            Ok(_) => Ok(None),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(VaultError::Io(e)),
        }
    }

    /// Reads a whole file as text. Invalid UTF-8 is replaced with `U+FFFD`.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The file content.
    /// * `VaultError::NotFound` - If there is no file at `path`.
    async fn read(&self, path: &str) -> Result<String, VaultError> {
        let file_path = self.resolve(path)?;
        match fs::read(&file_path).await {
            Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(VaultError::NotFound(normalize_path(path))),
            Err(e) => Err(VaultError::Io(e)),
        }
    }

    /// Creates a new file with `content`.
    ///
    /// Missing parent folders are created first. An existing file is never
    /// overwritten, and a file whose write failed is removed again.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the file was written.
    /// * `VaultError::AlreadyExists` - If something already exists at `path`.
    /// * `VaultError::InvalidPath` / `VaultError::InvalidFileName` - If `path` is not a valid vault path.
    /// * `VaultError::InvalidBasePath` - If the vault root is not a directory.
    async fn create(&self, path: &str, content: &str) -> Result<(), VaultError> {
        let file_path = self.resolve(path)?;
        self.ensure_base_directory_exists().await?;

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let mut file = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&file_path)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(VaultError::AlreadyExists(normalize_path(path)));
            }
            Err(e) => return Err(VaultError::Io(e)),
        };

        let written = async {
            file.write_all(content.as_bytes()).await?;
            file.flush().await
        }
        .await;

        if let Err(e) = written {
            drop(file);
            let _ = fs::remove_file(&file_path).await;
            return Err(VaultError::Io(e));
        }

        info!(path = %file_path.display(), "note created");
        Ok(())
    }
}

impl FileVault {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Where the settings blob of this vault lives.
    pub fn settings_path(&self) -> PathBuf {
        self.base_path.join(CONFIG_DIR).join(SETTINGS_FILE)
    }

    /// Maps a vault path onto the file system.
    pub fn resolve(&self, path: &str) -> Result<PathBuf, VaultError> {
        let normalized = normalize_path(path);
        check_path(&normalized)?;
        Ok(normalized
            .split('/')
            .fold(self.base_path.clone(), |file_path, segment| file_path.join(segment)))
    }

    pub async fn ensure_base_directory_exists(&self) -> Result<(), VaultError> {
        match fs::metadata(&self.base_path).await {
            Ok(metadata) if metadata.is_dir() => Ok(()),
            Ok(_) => Err(VaultError::InvalidBasePath(self.base_path.display().to_string())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.base_path.display(), "creating vault directory");
                fs::create_dir_all(&self.base_path).await?;
                Ok(())
            }
            Err(e) => Err(VaultError::Io(e)),
        }
    }
}

/// Settings blob stored as pretty-printed JSON.
pub struct JsonFilePersistence {
    pub path: PathBuf,
}

impl JsonFilePersistence {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SettingsPersistence for JsonFilePersistence {
    type Error = PersistenceError;

    async fn load(&self) -> Result<Option<Value>, PersistenceError> {
        match fs::read_to_string(&self.path).await {
            Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PersistenceError::Io(e)),
        }
    }

    async fn save(&self, data: &Value) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized).await?;
        Ok(())
    }
}
