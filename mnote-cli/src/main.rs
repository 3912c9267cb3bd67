mod config;
mod constants;
mod terminal;

use crate::config::{MnoteCliConfig, load_config};
use crate::constants::MNOTE_CLI;
use crate::terminal::{ActiveNote, TerminalEditor, TerminalNotifier};
use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use mnote_core::dialog::NoteDialog;
use mnote_core::file_storage::{FileVault, JsonFilePersistence};
use mnote_core::host::PaneMode;
use mnote_core::note::SubmitOptions;
use mnote_core::panel::SettingKey;
use mnote_core::plugin::{CREATE_MEETING_NOTE, MeetingNotesPlugin};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

type Plugin = MeetingNotesPlugin<JsonFilePersistence, FileVault, TerminalEditor, TerminalNotifier>;
type Dialog = NoteDialog<JsonFilePersistence, FileVault, TerminalEditor, TerminalNotifier>;

#[derive(Parser, Debug)]
#[command(version,
display_name = "mnote",
bin_name = "mnote",
about = "Create dated meeting notes from a template",
long_about = "Create dated meeting notes from a template.\n\n\
Notes are written to '<folder>/<YYYY-MM-DD> - <title>.md' inside the vault, using either \
the built-in meeting template or a template file in which every {{date}} is replaced.")]
struct Args {
    /// Vault directory, overrides the configured vault path
    #[arg(short = 'v', long)]
    vault: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Create a meeting note. Asks for the title when none is given.
    New {
        title: Option<String>,
        /// Open the note in a new tab
        #[arg(long, conflicts_with = "split")]
        tab: bool,
        /// Open the note in a split pane
        #[arg(long)]
        split: bool,
        /// Do not insert a link to the new note
        #[arg(long)]
        no_link: bool,
        /// Markdown note to insert the link into, as FILE[:LINE[:COLUMN]]
        #[arg(short = 'l', long)]
        link_into: Option<ActiveNote>,
    },
    /// Show or edit the meeting note settings of the vault
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
    /// List the registered commands
    Commands,
    /// Print shell completions
    Completions { shell: Shell },
}

#[derive(Subcommand, Debug, Clone)]
enum SettingsAction {
    Show,
    Set {
        /// Folder new meeting notes are created in
        #[arg(short = 'f', long)]
        folder: Option<String>,
        /// Template path without '.md', empty for the built-in template
        #[arg(short = 't', long)]
        template_path: Option<String>,
    },
}

enum DialogOutcome {
    Created(String),
    Failed,
    Dismissed,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn install(
    config: MnoteCliConfig,
    vault_override: Option<PathBuf>,
    link_into: Option<ActiveNote>,
    options: SubmitOptions,
) -> anyhow::Result<Plugin> {
    let (vault, persistence) = config.vault(vault_override);
    let editor = TerminalEditor::new(vault.base_path.clone(), config.editor, link_into);
    let settings_path = persistence.path().display().to_string();

    MeetingNotesPlugin::install(persistence, vault, editor, TerminalNotifier, options)
        .await
        .with_context(|| format!("Problem loading settings from {}", settings_path))
}

async fn run_dialog(mut dialog: Dialog, title: Option<String>) -> anyhow::Result<DialogOutcome> {
    let title = match title {
        Some(title) => title,
        None => {
            println!("{}", dialog.heading());
            println!("{}", dialog.preview());
            eprint!("Title: ");

            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            match lines.next_line().await? {
                Some(line) => line,
                None => {
                    dialog.dismiss();
                    return Ok(DialogOutcome::Dismissed);
                }
            }
        }
    };

    dialog.set_title(title);
    println!("{}", dialog.preview());

    let created = dialog.submit().await.context("Note creation task failed")?;
    Ok(match created {
        Some(note) => DialogOutcome::Created(note.path),
        None => DialogOutcome::Failed,
    })
}

async fn show_settings(plugin: &Plugin) {
    let panel = plugin.settings_panel();
    println!("{}", panel.heading());
    for field in panel.display().await {
        println!("  {}: {}", field.name, field.value);
        println!("    {}", field.description);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing();

    if let Commands::Completions { shell } = &args.cmd {
        clap_complete::generate(*shell, &mut Args::command(), MNOTE_CLI, &mut std::io::stdout());
        return Ok(());
    }

    let config = load_config();
    let mut options = config.submit_options();

    match args.cmd {
        Commands::New { title, tab, split, no_link, link_into } => {
            if tab {
                options.pane_mode = PaneMode::Tab;
            } else if split {
                options.pane_mode = PaneMode::Split;
            }
            if no_link {
                options.insert_link = false;
            }

            let plugin = install(config, args.vault, link_into, options).await?;
            let dialog = plugin
                .run_command(CREATE_MEETING_NOTE.id)
                .context("Meeting note command is not registered")?;

            match run_dialog(dialog, title).await? {
                DialogOutcome::Created(path) => println!("Created {}", path),
                DialogOutcome::Dismissed => {}
                DialogOutcome::Failed => std::process::exit(exitcode::CANTCREAT),
            }
        }
        Commands::Settings { action } => {
            let plugin = install(config, args.vault, None, options).await?;
            match action {
                SettingsAction::Show => show_settings(&plugin).await,
                SettingsAction::Set { folder, template_path } => {
                    let panel = plugin.settings_panel();
                    if let Some(folder) = folder {
                        panel.change(SettingKey::MeetingNotesFolder, &folder).await?;
                    }
                    if let Some(template_path) = template_path {
                        panel.change(SettingKey::MeetingNoteTemplatePath, &template_path).await?;
                    }
                    show_settings(&plugin).await;
                }
            }
        }
        Commands::Commands => {
            let plugin = install(config, args.vault, None, options).await?;
            for command in plugin.commands() {
                println!("{}\t{}", command.id, command.name);
            }
        }
        Commands::Completions { .. } => {}
    }

    Ok(())
}
