//! # Plugin Entry Point
//!
//! [`MeetingNotesPlugin::install`] loads the settings and registers the command and the
//! settings panel. Dropping the plugin (or calling [`MeetingNotesPlugin::uninstall`])
//! releases everything it registered.

use crate::dialog::NoteDialog;
use crate::error::SettingsError;
use crate::host::{EditorHost, NoteStore, Notifier, SettingsPersistence};
use crate::note::{HostServices, SubmitOptions};
use crate::panel::SettingsPanel;
use crate::settings::SettingsStore;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    pub id: &'static str,
    pub name: &'static str,
}

pub const CREATE_MEETING_NOTE: CommandSpec = CommandSpec {
    id: "create-meeting-note",
    name: "Create meeting note",
};

pub struct MeetingNotesPlugin<P, S, E, N> {
    host: Arc<HostServices<P, S, E, N>>,
    commands: Vec<CommandSpec>,
}

impl<P, S, E, N> MeetingNotesPlugin<P, S, E, N>
where
    P: SettingsPersistence + 'static,
    S: NoteStore + 'static,
    E: EditorHost + 'static,
    N: Notifier + 'static,
{
    pub async fn install(
        persistence: P,
        store: S,
        editor: E,
        notifier: N,
        options: SubmitOptions,
    ) -> Result<Self, SettingsError<P::Error>> {
        let settings = SettingsStore::load(persistence).await?;

        let plugin = Self {
            host: Arc::new(HostServices {
                settings: Arc::new(settings),
                store,
                editor,
                notifier,
                options,
            }),
            commands: vec![CREATE_MEETING_NOTE],
        };
        info!(commands = plugin.commands.len(), "meeting notes plugin installed");
        Ok(plugin)
    }

    pub fn commands(&self) -> &[CommandSpec] {
        &self.commands
    }

    /// Runs a registered command. Returns the opened dialog, or `None` for an unknown id.
    pub fn run_command(&self, id: &str) -> Option<NoteDialog<P, S, E, N>> {
        if id == CREATE_MEETING_NOTE.id {
            return Some(self.create_meeting_note());
        }
        debug!(id, "unknown command");
        None
    }

    pub fn create_meeting_note(&self) -> NoteDialog<P, S, E, N> {
        NoteDialog::open(self.host.clone())
    }

    pub fn settings_panel(&self) -> SettingsPanel<P> {
        SettingsPanel::new(self.host.settings.clone())
    }

    pub fn host(&self) -> &Arc<HostServices<P, S, E, N>> {
        &self.host
    }

    pub fn uninstall(self) {
        debug!("meeting notes plugin uninstalled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryPersistence, MemoryVault, RecordingEditor, RecordingNotifier};
    use crate::panel::SettingKey;
    use serde_json::json;

    type TestPlugin = MeetingNotesPlugin<MemoryPersistence, MemoryVault, RecordingEditor, RecordingNotifier>;

    async fn install(persistence: MemoryPersistence) -> TestPlugin {
        MeetingNotesPlugin::install(
            persistence,
            MemoryVault::new(),
            RecordingEditor::new(),
            RecordingNotifier::new(),
            SubmitOptions::default(),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_install_registers_single_command() {
        let plugin = install(MemoryPersistence::default()).await;
        assert_eq!(&[CREATE_MEETING_NOTE], plugin.commands());
        assert_eq!("Create meeting note", plugin.commands()[0].name);
    }

    #[tokio::test]
    async fn test_install_loads_settings() {
        let plugin = install(MemoryPersistence::with_blob(json!({ "meetingNotesFolder": "One on ones" }))).await;
        assert_eq!("One on ones", plugin.host().settings.current().await.meeting_notes_folder);
    }

    #[tokio::test]
    async fn test_run_command() {
        let plugin = install(MemoryPersistence::default()).await;

        let dialog = plugin.run_command("create-meeting-note").expect("dialog should open");
        assert_eq!("Create meeting note", dialog.heading());
        assert!(plugin.run_command("something-else").is_none());
    }

    #[tokio::test]
    async fn test_panel_and_dialog_share_settings() {
        let plugin = install(MemoryPersistence::default()).await;
        let mut dialog = plugin.create_meeting_note();
        dialog.set_title("Planning");

        plugin
            .settings_panel()
            .change(SettingKey::MeetingNotesFolder, "Planning")
            .await
            .unwrap();

        let created = dialog.submit().await.unwrap().unwrap();
        assert!(created.path.starts_with("Planning/"));
        assert!(created.path.ends_with(" - Planning.md"));
    }
}
