//! # Note Creation
//!
//! The workflow behind a dialog submission: resolve the template, create the file,
//! link it from the active editor and open it. The steps always run in that order and
//! stop at the first failure.

use crate::error::SubmitError;
use crate::host::{EditorHost, NoteStore, Notifier, PaneMode, SettingsPersistence};
use crate::settings::{Settings, SettingsStore};
use crate::template::resolve_template;
use crate::vault_path::{note_base_path, note_path, wiki_link};
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, info};

/// Format of the date in note names and templates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Which submission variant runs after the note file exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitOptions {
    /// How the new note is opened.
    pub pane_mode: PaneMode,
    /// Insert a link to the new note into the previously active markdown editor.
    pub insert_link: bool,
}

impl Default for SubmitOptions {
    fn default() -> Self {
        Self {
            pane_mode: PaneMode::Split,
            insert_link: true,
        }
    }
}

/// Everything the plugin needs from its host.
pub struct HostServices<P, S, E, N> {
    pub settings: Arc<SettingsStore<P>>,
    pub store: S,
    pub editor: E,
    pub notifier: N,
    pub options: SubmitOptions,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedNote {
    /// Normalized vault path of the new file.
    pub path: String,
    /// Whether a link was inserted into the active editor.
    pub linked: bool,
}

/// Creates the meeting note for `date` and `title`.
///
/// # Arguments
///
/// * `store` - Where the template is read from and the note is written to.
/// * `editor` - Opens the new note and receives the link.
/// * `settings` - The settings as they are when the note is submitted.
/// * `date` - The `YYYY-MM-DD` date captured when the dialog opened.
/// * `title` - The title typed by the user, used verbatim.
/// * `options` - The submission variant.
///
/// # Returns
///
/// * `Ok(CreatedNote)` - If the note was created and opened.
/// * `SubmitError::Store` - If the template could not be read or the note could not be created.
/// * `SubmitError::Editor` - If the link could not be inserted or the note could not be opened.
pub async fn create_meeting_note<S, E>(
    store: &S,
    editor: &E,
    settings: &Settings,
    date: &str,
    title: &str,
    options: SubmitOptions,
) -> Result<CreatedNote, SubmitError<S::Error, E::Error>>
where
    S: NoteStore + ?Sized,
    E: EditorHost + ?Sized,
{
    let content = resolve_template(store, date, &settings.meeting_note_template_path)
        .await
        .map_err(SubmitError::Store)?;

    let path = note_path(&settings.meeting_notes_folder, date, title);
    store.create(&path, &content).await.map_err(SubmitError::Store)?;
    info!(%path, "meeting note created");

    let mut linked = false;
    if options.insert_link {
        let link = wiki_link(&note_base_path(&settings.meeting_notes_folder, date, title));
        linked = editor.insert_at_cursor(&link).await.map_err(SubmitError::Editor)?;
        if !linked {
            debug!("no active markdown editor, link not inserted");
        }
    }

    editor
        .open_in_pane(&path, options.pane_mode)
        .await
        .map_err(SubmitError::Editor)?;

    Ok(CreatedNote { path, linked })
}

impl<P, S, E, N> HostServices<P, S, E, N>
where
    P: SettingsPersistence,
    S: NoteStore,
    E: EditorHost,
    N: Notifier,
{
    /// Runs one submission against the current settings.
    ///
    /// A failure is shown through the notifier exactly once and yields `None`.
    pub async fn submit(&self, date: &str, title: &str) -> Option<CreatedNote> {
        let settings = self.settings.current().await;
        match create_meeting_note(&self.store, &self.editor, &settings, date, title, self.options).await {
            Ok(note) => Some(note),
            Err(e) => {
                debug!(error = %e, "meeting note not created");
                self.notifier.show(&e.to_string());
                None
            }
        }
    }
}
