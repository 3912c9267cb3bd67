//! # Settings Store
//!
//! Holds the meeting-note settings shared by the dialog and the settings panel.
//! The dialog only ever calls [`SettingsStore::current`], the panel goes through
//! [`SettingsStore::update`], which persists the whole object after every change.

use crate::error::SettingsError;
use crate::host::SettingsPersistence;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use tracing::debug;

pub const DEFAULT_MEETING_NOTES_FOLDER: &str = "Meeting Notes";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Folder new meeting notes are created in.
    pub meeting_notes_folder: String,
    /// Template path without the `.md` extension. Empty selects the built-in template.
    pub meeting_note_template_path: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            meeting_notes_folder: DEFAULT_MEETING_NOTES_FOLDER.to_string(),
            meeting_note_template_path: String::new(),
        }
    }
}

impl Settings {
    /// Merges a persisted blob over the defaults.
    ///
    /// Persisted keys win, unknown keys are dropped and missing or `null` keys keep
    /// their default. Anything that is not an object (including `null`) yields the defaults.
    pub fn merged(persisted: Option<Value>) -> Result<Settings, serde_json::Error> {
        let Some(Value::Object(persisted)) = persisted else {
            return Ok(Settings::default());
        };

        let Value::Object(mut merged) = serde_json::to_value(Settings::default())? else {
            return Ok(Settings::default());
        };
        let known: Map<String, Value> = persisted
            .into_iter()
            .filter(|(key, value)| !value.is_null() && merged.contains_key(key))
            .collect();
        merged.extend(known);

        serde_json::from_value(Value::Object(merged))
    }
}

pub struct SettingsStore<P> {
    persistence: P,
    current: RwLock<Settings>,
}

impl<P: SettingsPersistence> SettingsStore<P> {
    /// Loads the persisted settings and merges them over the defaults.
    pub async fn load(persistence: P) -> Result<Self, SettingsError<P::Error>> {
        let persisted = persistence.load().await.map_err(SettingsError::Persistence)?;
        let settings = Settings::merged(persisted)?;
        debug!(?settings, "settings loaded");

        Ok(Self {
            persistence,
            current: RwLock::new(settings),
        })
    }

    /// A copy of the active settings.
    pub async fn current(&self) -> Settings {
        self.current.read().await.clone()
    }

    /// Persists the active settings, overwriting whatever was saved before.
    pub async fn save(&self) -> Result<(), SettingsError<P::Error>> {
        let settings = self.current.read().await;
        self.persist(&settings).await
    }

    /// Applies `change` to the active settings and persists the result right away.
    ///
    /// The active settings only change once the save succeeded. Returns the settings
    /// as they were saved.
    pub async fn update<F>(&self, change: F) -> Result<Settings, SettingsError<P::Error>>
    where
        F: FnOnce(&mut Settings),
    {
        let mut current = self.current.write().await;
        let mut updated = current.clone();
        change(&mut updated);
        self.persist(&updated).await?;
        *current = updated.clone();
        Ok(updated)
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    async fn persist(&self, settings: &Settings) -> Result<(), SettingsError<P::Error>> {
        let data = serde_json::to_value(settings)?;
        self.persistence
            .save(&data)
            .await
            .map_err(SettingsError::Persistence)?;
        debug!(?settings, "settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryPersistence;
    use async_trait::async_trait;
    use serde_json::json;
    use std::io;

    struct ReadOnlyPersistence;

    #[async_trait]
    impl SettingsPersistence for ReadOnlyPersistence {
        type Error = io::Error;

        async fn load(&self) -> Result<Option<Value>, io::Error> {
            Ok(None)
        }

        async fn save(&self, _data: &Value) -> Result<(), io::Error> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
        }
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!("Meeting Notes", settings.meeting_notes_folder);
        assert_eq!("", settings.meeting_note_template_path);
    }

    #[test]
    fn test_serialized_keys() {
        let value = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(
            json!({ "meetingNotesFolder": "Meeting Notes", "meetingNoteTemplatePath": "" }),
            value
        );
    }

    #[test]
    fn test_merge_nothing_persisted() {
        assert_eq!(Settings::default(), Settings::merged(None).unwrap());
        assert_eq!(Settings::default(), Settings::merged(Some(Value::Null)).unwrap());
    }

    #[test]
    fn test_merge_persisted_values_win() {
        let persisted = json!({ "meetingNotesFolder": "Work/Meetings", "meetingNoteTemplatePath": "Templates/meeting" });
        let settings = Settings::merged(Some(persisted)).unwrap();
        assert_eq!("Work/Meetings", settings.meeting_notes_folder);
        assert_eq!("Templates/meeting", settings.meeting_note_template_path);
    }

    #[test]
    fn test_merge_missing_key_falls_back_to_default() {
        let settings = Settings::merged(Some(json!({ "meetingNotesFolder": "Meetings" }))).unwrap();
        assert_eq!("Meetings", settings.meeting_notes_folder);
        assert_eq!("", settings.meeting_note_template_path);
    }

    #[test]
    fn test_merge_ignores_unknown_keys() {
        let settings = Settings::merged(Some(json!({ "somethingElse": 42 }))).unwrap();
        assert_eq!(Settings::default(), settings);
    }

    #[test]
    fn test_merge_null_value_falls_back_to_default() {
        let persisted = json!({ "meetingNotesFolder": null, "meetingNoteTemplatePath": "Templates/meeting" });
        let settings = Settings::merged(Some(persisted)).unwrap();
        assert_eq!("Meeting Notes", settings.meeting_notes_folder);
        assert_eq!("Templates/meeting", settings.meeting_note_template_path);
    }

    #[test]
    fn test_merge_rejects_wrong_types() {
        assert!(Settings::merged(Some(json!({ "meetingNotesFolder": 42 }))).is_err());
    }

    #[tokio::test]
    async fn test_load_from_persistence() {
        let persistence = MemoryPersistence::with_blob(json!({ "meetingNotesFolder": "Standups" }));
        let store = SettingsStore::load(persistence).await.unwrap();
        assert_eq!("Standups", store.current().await.meeting_notes_folder);
        assert_eq!(0, store.persistence().save_count());
    }

    #[tokio::test]
    async fn test_update_persists_immediately() {
        let store = SettingsStore::load(MemoryPersistence::default()).await.unwrap();

        let saved = store
            .update(|s| s.meeting_note_template_path = "Templates/meeting".to_string())
            .await
            .unwrap();

        assert_eq!("Templates/meeting", saved.meeting_note_template_path);
        assert_eq!(1, store.persistence().save_count());
        assert_eq!(
            Some(json!({ "meetingNotesFolder": "Meeting Notes", "meetingNoteTemplatePath": "Templates/meeting" })),
            store.persistence().blob()
        );
    }

    #[tokio::test]
    async fn test_every_update_is_saved_separately() {
        let store = SettingsStore::load(MemoryPersistence::default()).await.unwrap();
        store.update(|s| s.meeting_notes_folder = "A".to_string()).await.unwrap();
        store.update(|s| s.meeting_note_template_path = "B".to_string()).await.unwrap();
        assert_eq!(2, store.persistence().save_count());
    }

    #[tokio::test]
    async fn test_save_twice_is_idempotent() {
        let store = SettingsStore::load(MemoryPersistence::default()).await.unwrap();
        store.update(|s| s.meeting_notes_folder = "Team".to_string()).await.unwrap();

        store.save().await.unwrap();
        let once = store.persistence().blob();
        store.save().await.unwrap();
        let twice = store.persistence().blob();

        assert_eq!(once, twice);
        assert_eq!(store.current().await, Settings::merged(twice).unwrap());
    }

    #[tokio::test]
    async fn test_failed_update_keeps_current_settings() {
        let store = SettingsStore::load(ReadOnlyPersistence).await.unwrap();

        let result = store.update(|s| s.meeting_notes_folder = "X".to_string()).await;

        assert!(matches!(result, Err(SettingsError::Persistence(_))));
        assert_eq!(Settings::default(), store.current().await);
    }
}
