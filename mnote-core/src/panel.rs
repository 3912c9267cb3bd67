//! # Settings Panel
//!
//! One text field per setting. Every change is written to the [`SettingsStore`]
//! and persisted before the call returns.

use crate::error::SettingsError;
use crate::host::SettingsPersistence;
use crate::settings::{Settings, SettingsStore};
use std::sync::Arc;
use tracing::debug;

pub const PANEL_HEADING: &str = "Meeting Notes";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    MeetingNotesFolder,
    MeetingNoteTemplatePath,
}

impl SettingKey {
    pub const ALL: [SettingKey; 2] = [SettingKey::MeetingNotesFolder, SettingKey::MeetingNoteTemplatePath];

    pub fn name(self) -> &'static str {
        match self {
            SettingKey::MeetingNotesFolder => "Meeting Note Folder",
            SettingKey::MeetingNoteTemplatePath => "Meeting Note Template Path",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            SettingKey::MeetingNotesFolder => "New meeting notes will be created in this folder",
            SettingKey::MeetingNoteTemplatePath => "Template to be used for new notes",
        }
    }

    fn value(self, settings: &Settings) -> &str {
        match self {
            SettingKey::MeetingNotesFolder => &settings.meeting_notes_folder,
            SettingKey::MeetingNoteTemplatePath => &settings.meeting_note_template_path,
        }
    }

    fn field_mut(self, settings: &mut Settings) -> &mut String {
        match self {
            SettingKey::MeetingNotesFolder => &mut settings.meeting_notes_folder,
            SettingKey::MeetingNoteTemplatePath => &mut settings.meeting_note_template_path,
        }
    }
}

/// A rendered text field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingField {
    pub key: SettingKey,
    pub name: &'static str,
    pub description: &'static str,
    pub value: String,
}

pub struct SettingsPanel<P> {
    store: Arc<SettingsStore<P>>,
}

impl<P: SettingsPersistence> SettingsPanel<P> {
    pub fn new(store: Arc<SettingsStore<P>>) -> Self {
        Self { store }
    }

    pub fn heading(&self) -> &'static str {
        PANEL_HEADING
    }

    /// The fields with their current values.
    pub async fn display(&self) -> Vec<SettingField> {
        let settings = self.store.current().await;
        SettingKey::ALL
            .iter()
            .map(|&key| SettingField {
                key,
                name: key.name(),
                description: key.description(),
                value: key.value(&settings).to_string(),
            })
            .collect()
    }

    /// Handles an edit of one field. The value is stored as typed.
    pub async fn change(&self, key: SettingKey, value: &str) -> Result<(), SettingsError<P::Error>> {
        debug!(setting = key.name(), value, "setting changed");
        self.store
            .update(|settings| *key.field_mut(settings) = value.to_string())
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryPersistence;
    use serde_json::json;

    async fn panel(persistence: MemoryPersistence) -> SettingsPanel<MemoryPersistence> {
        SettingsPanel::new(Arc::new(SettingsStore::load(persistence).await.unwrap()))
    }

    #[tokio::test]
    async fn test_display_shows_current_values() {
        let panel = panel(MemoryPersistence::with_blob(json!({ "meetingNoteTemplatePath": "Templates/meeting" }))).await;

        let fields = panel.display().await;

        assert_eq!("Meeting Notes", panel.heading());
        assert_eq!(2, fields.len());
        assert_eq!(SettingKey::MeetingNotesFolder, fields[0].key);
        assert_eq!("Meeting Note Folder", fields[0].name);
        assert_eq!("Meeting Notes", fields[0].value);
        assert_eq!("Meeting Note Template Path", fields[1].name);
        assert_eq!("Templates/meeting", fields[1].value);
    }

    #[tokio::test]
    async fn test_change_persists_whole_object() {
        let panel = panel(MemoryPersistence::default()).await;

        panel.change(SettingKey::MeetingNotesFolder, "Standups").await.unwrap();

        assert_eq!(
            Some(json!({ "meetingNotesFolder": "Standups", "meetingNoteTemplatePath": "" })),
            panel.store.persistence().blob()
        );
    }

    #[tokio::test]
    async fn test_every_keystroke_is_saved() {
        let panel = panel(MemoryPersistence::default()).await;

        for value in ["T", "Te", "Tem"] {
            panel.change(SettingKey::MeetingNoteTemplatePath, value).await.unwrap();
        }

        assert_eq!(3, panel.store.persistence().save_count());
        assert_eq!("Tem", panel.store.current().await.meeting_note_template_path);
    }

    #[tokio::test]
    async fn test_change_accepts_empty_values() {
        let panel = panel(MemoryPersistence::with_blob(json!({ "meetingNoteTemplatePath": "Templates/meeting" }))).await;

        panel.change(SettingKey::MeetingNoteTemplatePath, "").await.unwrap();

        assert_eq!("", panel.store.current().await.meeting_note_template_path);
    }
}
