//! # Template Resolution
//!
//! A meeting note body comes from one of two places:
//!
//! - the built-in template, with the date written straight into its frontmatter
//! - a user template file at `<template path>.md`, where every `{{date}}` is replaced
//!
//! A configured template that does not resolve to a file yields an empty body.

use crate::host::{EntryKind, NoteStore};
use crate::vault_path::{check_path, template_file_path};
use tracing::{debug, warn};

/// The only placeholder recognized in user templates.
pub const DATE_PLACEHOLDER: &str = "{{date}}";

const BUILT_IN_SECTIONS: &str = concat!(
    "## Context\n",
    "*Link relevant projects, technologies, people.*\n",
    "\n",
    "## Attendees\n",
    "*Link attendees to the meeting.*\n",
    "\n",
    "## Outline Notes\n",
    "*Take outlining notes.*\n",
    "- \n",
    "\n",
    "## Decisions\n",
    "*Take note of any decisions that were taken during the meeting.*\n",
    "- \n",
    "\n",
    "## Action Items\n",
    "*Any action items for myself.*\n",
    "- \n",
);

/// The built-in meeting note for `date`.
pub fn built_in_template(date: &str) -> String {
    format!("---\ndate: {}\n---\n\n{}", date, BUILT_IN_SECTIONS)
}

/// Replaces every occurrence of [`DATE_PLACEHOLDER`] in `template` with `date`.
pub fn fill_date(template: &str, date: &str) -> String {
    template.replace(DATE_PLACEHOLDER, date)
}

/// Produces the note body for `date`.
///
/// # Arguments
///
/// * `store` - The store the template file is read from.
/// * `date` - The `YYYY-MM-DD` date of the note.
/// * `template_path` - The configured template path, empty for the built-in template.
///
/// # Returns
///
/// * `Ok(String)` - The note body. Empty if `template_path` is not a valid vault path or
///   does not point at a file.
/// * `Err(S::Error)` - If the store failed while looking up or reading the template.
pub async fn resolve_template<S>(store: &S, date: &str, template_path: &str) -> Result<String, S::Error>
where
    S: NoteStore + ?Sized,
{
    if template_path.is_empty() {
        debug!("using built-in template");
        return Ok(built_in_template(date));
    }

    let path = template_file_path(template_path);
    if let Err(e) = check_path(&path) {
        warn!(template = %path, error = %e, "template path is not a valid vault path, creating an empty note");
        return Ok(String::new());
    }

    match store.lookup(&path).await? {
        Some(EntryKind::File) => {
            debug!(template = %path, "using template file");
            let content = store.read(&path).await?;
            Ok(fill_date(&content, date))
        }
        Some(EntryKind::Folder) => {
            warn!(template = %path, "template path is a folder, creating an empty note");
            Ok(String::new())
        }
        None => {
            warn!(template = %path, "template file not found, creating an empty note");
            Ok(String::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_storage::FileVault;
    use crate::memory::MemoryVault;
    use tempfile::TempDir;

    const EXPECTED_BUILT_IN: &str = concat!(
        "---\ndate: 2024-03-01\n---\n\n",
        "## Context\n*Link relevant projects, technologies, people.*\n\n",
        "## Attendees\n*Link attendees to the meeting.*\n\n",
        "## Outline Notes\n*Take outlining notes.*\n- \n\n",
        "## Decisions\n*Take note of any decisions that were taken during the meeting.*\n- \n\n",
        "## Action Items\n*Any action items for myself.*\n- \n",
    );

    #[test]
    fn test_built_in_template() {
        assert_eq!(EXPECTED_BUILT_IN, built_in_template("2024-03-01"));
    }

    #[test]
    fn test_built_in_template_keeps_list_markers() {
        let body = built_in_template("2024-03-01");
        assert_eq!(3, body.lines().filter(|line| *line == "- ").count());
        assert!(body.ends_with("- \n"));
    }

    #[test]
    fn test_fill_date_replaces_every_occurrence() {
        let filled = fill_date("{{date}} | {{date}} | {{date}}", "2024-03-01");
        assert_eq!("2024-03-01 | 2024-03-01 | 2024-03-01", filled);
    }

    #[test]
    fn test_fill_date_without_placeholder() {
        assert_eq!("# Notes {{title}}", fill_date("# Notes {{title}}", "2024-03-01"));
    }

    #[tokio::test]
    async fn test_resolve_empty_path_uses_built_in() {
        let vault = MemoryVault::new();
        let body = resolve_template(&vault, "2024-03-01", "").await.unwrap();

        assert_eq!(built_in_template("2024-03-01"), body);
        assert!(!body.contains(DATE_PLACEHOLDER));
    }

    #[tokio::test]
    async fn test_resolve_template_file() {
        let vault = MemoryVault::new().with_file("Templates/meeting.md", "# {{date}} notes");
        let body = resolve_template(&vault, "2024-03-01", "Templates/meeting").await.unwrap();
        assert_eq!("# 2024-03-01 notes", body);
    }

    #[tokio::test]
    async fn test_resolve_keeps_the_rest_of_the_template() {
        let content = "---\ncreated: {{date}}\n---\n{{ date }} stays, {{date}} goes\n";
        let vault = MemoryVault::new().with_file("meeting.md", content);
        let body = resolve_template(&vault, "2024-03-01", "meeting").await.unwrap();
        assert_eq!("---\ncreated: 2024-03-01\n---\n{{ date }} stays, 2024-03-01 goes\n", body);
    }

    #[tokio::test]
    async fn test_resolve_missing_template_is_empty() {
        let vault = MemoryVault::new();
        let body = resolve_template(&vault, "2024-03-01", "Templates/missing").await.unwrap();
        assert_eq!("", body);
    }

    #[tokio::test]
    async fn test_resolve_folder_template_is_empty() {
        let vault = MemoryVault::new().with_folder("Templates/meeting.md");
        let body = resolve_template(&vault, "2024-03-01", "Templates/meeting").await.unwrap();
        assert_eq!("", body);
    }

    #[tokio::test]
    async fn test_resolve_does_not_use_path_with_extension() {
        let vault = MemoryVault::new().with_file("Templates/meeting.md", "{{date}}");
        let body = resolve_template(&vault, "2024-03-01", "Templates/meeting.md").await.unwrap();
        assert_eq!("", body);
    }

    #[tokio::test]
    async fn test_resolve_template_with_invalid_utf8() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("meeting.md"), b"# {{date}} \xff notes").unwrap();
        let vault = FileVault::new(temp_dir.path());

        let body = resolve_template(&vault, "2024-03-01", "meeting").await.unwrap();
        assert_eq!("# 2024-03-01 \u{FFFD} notes", body);
    }

    #[tokio::test]
    async fn test_resolve_invalid_template_path_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("Q1: plan.md"), "{{date}}").unwrap();
        let vault = FileVault::new(temp_dir.path());

        let body = resolve_template(&vault, "2024-03-01", "Q1: plan").await.unwrap();
        assert_eq!("", body);
        assert_eq!("", resolve_template(&vault, "2024-03-01", "../meeting").await.unwrap());
    }
}
