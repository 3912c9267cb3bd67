//! Host implementations for running the workflow from a terminal.

use crate::config::EditorConfig;
use crate::constants::PATH_PLACEHOLDER;
use async_trait::async_trait;
use mnote_core::host::{Cursor, EditorHost, Notifier, PaneMode, insert_text_at};
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tokio::fs;
use tokio::process::Command;
use tracing::debug;

/// The note the user was working in, given as `FILE[:LINE[:COLUMN]]` (1-based).
///
/// Without a line the link is appended to the end of the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveNote {
    pub path: PathBuf,
    pub cursor: Option<Cursor>,
}

impl FromStr for ActiveNote {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut path = s;
        let mut numbers = Vec::new();
        while numbers.len() < 2 {
            let Some((rest, number)) = path.rsplit_once(':') else {
                break;
            };
            let Ok(number) = number.parse::<usize>() else {
                break;
            };
            numbers.push(number);
            path = rest;
        }
        numbers.reverse();

        if path.is_empty() {
            return Err(format!("missing file in '{}'", s));
        }

        let cursor = match numbers.as_slice() {
            [line, column] => Some(Cursor {
                line: line.saturating_sub(1),
                ch: column.saturating_sub(1),
            }),
            [line] => Some(Cursor {
                line: line.saturating_sub(1),
                ch: 0,
            }),
            _ => None,
        };

        Ok(ActiveNote {
            path: PathBuf::from(path),
            cursor,
        })
    }
}

impl ActiveNote {
    fn is_markdown(&self) -> bool {
        self.path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
    }
}

/// Opens notes with the configured editor commands and writes links into `--link-into`.
pub struct TerminalEditor {
    vault_root: PathBuf,
    config: EditorConfig,
    active: Option<ActiveNote>,
}

impl TerminalEditor {
    pub fn new(vault_root: PathBuf, config: EditorConfig, active: Option<ActiveNote>) -> Self {
        Self {
            vault_root,
            config,
            active,
        }
    }

    fn command_for(&self, mode: PaneMode) -> Option<&str> {
        let (preferred, fallback) = match mode {
            PaneMode::Split => (&self.config.split_command, &self.config.tab_command),
            PaneMode::Tab => (&self.config.tab_command, &self.config.split_command),
        };
        preferred.as_deref().or(fallback.as_deref())
    }
}

/// Splits `command` into program and arguments, putting `file` where `{path}` is.
///
/// Without a placeholder the file becomes the last argument.
pub fn command_line(command: &str, file: &Path) -> Option<(String, Vec<String>)> {
    let file = file.display().to_string();
    let mut words = command.split_whitespace();
    let program = words.next()?.to_string();

    let mut placed = false;
    let mut args: Vec<String> = words
        .map(|word| {
            if word.contains(PATH_PLACEHOLDER) {
                placed = true;
                word.replace(PATH_PLACEHOLDER, &file)
            } else {
                word.to_string()
            }
        })
        .collect();
    if !placed {
        args.push(file);
    }

    Some((program, args))
}

#[async_trait]
impl EditorHost for TerminalEditor {
    type Error = io::Error;

    async fn open_in_pane(&self, path: &str, mode: PaneMode) -> Result<(), io::Error> {
        let file = path
            .split('/')
            .fold(self.vault_root.clone(), |file, segment| file.join(segment));

        let Some(command) = self.command_for(mode) else {
            debug!("no editor command configured");
            return Ok(());
        };
        let Some((program, args)) = command_line(command, &file) else {
            return Err(io::Error::other("editor command is empty"));
        };

        debug!(%program, ?args, ?mode, "opening note");
        let status = Command::new(&program).args(&args).status().await?;
        if !status.success() {
            return Err(io::Error::other(format!("{} exited with {}", program, status)));
        }
        Ok(())
    }

    async fn insert_at_cursor(&self, text: &str) -> Result<bool, io::Error> {
        let Some(active) = &self.active else {
            return Ok(false);
        };
        if !active.is_markdown() {
            debug!(path = %active.path.display(), "active note is not markdown, link not inserted");
            return Ok(false);
        }

        let mut document = fs::read_to_string(&active.path).await?;
        let cursor = active.cursor.unwrap_or(Cursor {
            line: usize::MAX,
            ch: 0,
        });
        insert_text_at(&mut document, cursor, text);
        fs::write(&active.path, document).await?;
        Ok(true)
    }
}

/// Prints notifications to stderr.
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn show(&self, message: &str) {
        eprintln!("{}", message);
    }
}
