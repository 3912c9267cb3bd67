use crate::constants::MNOTE_CLI;
use confy::ConfyError;
use mnote_core::file_storage::{FileVault, JsonFilePersistence};
use mnote_core::host::PaneMode;
use mnote_core::note::SubmitOptions;
use serde::{Deserialize, Serialize};
use std::env::home_dir;
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize)]
pub struct MnoteCliConfig {
    pub vault_path: String,
    pub pane_mode: PaneMode,
    pub insert_link: bool,
    pub(crate) editor: EditorConfig,
}

/// Commands used to open a new note. `{path}` is replaced by the note's path.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct EditorConfig {
    pub tab_command: Option<String>,
    pub split_command: Option<String>,
}

impl Default for MnoteCliConfig {
    fn default() -> Self {
        let vault_path = home_dir()
            .map(|p| p.join("notes"))
            .unwrap_or_else(|| PathBuf::from("notes"));

        Self {
            vault_path: vault_path.display().to_string(),
            pane_mode: PaneMode::default(),
            insert_link: true,
            editor: EditorConfig::default(),
        }
    }
}

impl MnoteCliConfig {
    pub fn submit_options(&self) -> SubmitOptions {
        SubmitOptions {
            pane_mode: self.pane_mode,
            insert_link: self.insert_link,
        }
    }

    /// The vault and its settings file, `vault_override` taking precedence over the config.
    pub fn vault(&self, vault_override: Option<PathBuf>) -> (FileVault, JsonFilePersistence) {
        let base_path = vault_override.unwrap_or_else(|| PathBuf::from(&self.vault_path));
        let vault = FileVault::new(base_path);
        let persistence = JsonFilePersistence::new(vault.settings_path());
        (vault, persistence)
    }
}

pub fn load_config() -> MnoteCliConfig {
    let config: Result<MnoteCliConfig, ConfyError> = confy::load(MNOTE_CLI, None);
    match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: Problem loading config: {}. Exiting...", e);
            std::process::exit(exitcode::CONFIG);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MnoteCliConfig::default();
        assert!(config.vault_path.ends_with("notes"));
        assert_eq!(PaneMode::Split, config.pane_mode);
        assert!(config.insert_link);
        assert!(config.editor.tab_command.is_none());
    }

    #[test]
    fn test_vault_override() {
        let config = MnoteCliConfig::default();
        let (vault, persistence) = config.vault(Some(PathBuf::from("/tmp/vault")));
        assert_eq!(PathBuf::from("/tmp/vault"), vault.base_path);
        assert_eq!(PathBuf::from("/tmp/vault/.mnote/settings.json"), persistence.path);
    }

    #[test]
    fn test_submit_options() {
        let config = MnoteCliConfig {
            pane_mode: PaneMode::Tab,
            insert_link: false,
            ..MnoteCliConfig::default()
        };
        let options = config.submit_options();
        assert_eq!(PaneMode::Tab, options.pane_mode);
        assert!(!options.insert_link);
    }
}
