//! # Note Creation Dialog
//!
//! [`NoteDialog`] is the state behind the "Create meeting note" dialog. A front-end
//! renders [`NoteDialog::heading`], [`NoteDialog::preview`] and a title input bound
//! to [`NoteDialog::set_title`], and ends the dialog with either
//! [`NoteDialog::submit`] or [`NoteDialog::dismiss`]. Both consume the dialog, so a
//! closed dialog cannot be submitted twice.

use crate::host::{EditorHost, NoteStore, Notifier, SettingsPersistence};
use crate::note::{CreatedNote, HostServices, format_date};
use chrono::{Local, NaiveDate};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::debug;

pub const DIALOG_HEADING: &str = "Create meeting note";

pub struct NoteDialog<P, S, E, N> {
    host: Arc<HostServices<P, S, E, N>>,
    date: String,
    title: String,
}

impl<P, S, E, N> NoteDialog<P, S, E, N>
where
    P: SettingsPersistence + 'static,
    S: NoteStore + 'static,
    E: EditorHost + 'static,
    N: Notifier + 'static,
{
    /// Opens the dialog for today's local date.
    pub fn open(host: Arc<HostServices<P, S, E, N>>) -> Self {
        Self::open_on(host, Local::now().date_naive())
    }

    /// Opens the dialog for a fixed date.
    pub fn open_on(host: Arc<HostServices<P, S, E, N>>, date: NaiveDate) -> Self {
        let date = format_date(date);
        debug!(%date, "meeting note dialog opened");
        Self {
            host,
            date,
            title: String::new(),
        }
    }

    pub fn heading(&self) -> &'static str {
        DIALOG_HEADING
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// The preview line, `<date> - <title>`.
    pub fn preview(&self) -> String {
        format!("{} - {}", self.date, self.title)
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Closes the dialog without creating anything.
    pub fn dismiss(self) {
        debug!("meeting note dialog dismissed");
    }

    /// Closes the dialog and creates the note in the background.
    ///
    /// Settings are read when the task runs, not when the dialog was opened. A failure
    /// is reported through the host's notifier and the task yields `None`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit(self) -> JoinHandle<Option<CreatedNote>> {
        let NoteDialog { host, date, title } = self;
        debug!(%date, %title, "meeting note dialog submitted");
        tokio::spawn(async move { host.submit(&date, &title).await })
    }
}
