//! # mnote Core
//!
//! This crate provides the core functionality of mnote, a helper that creates dated
//! meeting notes inside a vault.
//!
//! A command opens a dialog asking for a title. Submitting it resolves a template
//! (the built-in one, or a user template with `{{date}}` filled in), writes
//! `<folder>/<date> - <title>.md` and opens the new note in an editor pane.
//!
//! # Modules
//!
//! - [`host`] - Interfaces to the host: note store, editor, settings persistence, notifier
//! - [`settings`] - The settings and the store shared by dialog and panel
//! - [`template`] - Template resolution
//! - [`note`] - The note creation workflow
//! - [`dialog`] - The note creation dialog
//! - [`panel`] - The settings panel
//! - [`plugin`] - The entry point registering the command and the panel
//! - [`file_storage`] - Filesystem-backed note store and settings persistence
//! - [`memory`] - In-memory host implementations
//! - [`vault_path`] - Vault path normalization
//!
//! # Examples
//!
//! ```rust
//! use mnote_core::memory::{MemoryPersistence, MemoryVault, RecordingEditor, RecordingNotifier};
//! use mnote_core::note::SubmitOptions;
//! use mnote_core::plugin::MeetingNotesPlugin;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let plugin = MeetingNotesPlugin::install(
//!     MemoryPersistence::default(),
//!     MemoryVault::new(),
//!     RecordingEditor::new(),
//!     RecordingNotifier::new(),
//!     SubmitOptions::default(),
//! )
//! .await
//! .expect("Failed to load settings");
//!
//! let mut dialog = plugin.run_command("create-meeting-note").expect("Unknown command");
//! dialog.set_title("Standup");
//!
//! let created = dialog.submit().await.unwrap().expect("Failed to create note");
//! assert!(created.path.starts_with("Meeting Notes/"));
//! # }
//! ```

pub mod dialog;
pub mod error;
pub mod file_storage;
pub mod host;
pub mod memory;
pub mod note;
pub mod panel;
pub mod plugin;
pub mod settings;
pub mod template;
pub mod vault_path;
