//! Vault-relative path handling.
//!
//! Every path handed to a [`NoteStore`](crate::host::NoteStore) goes through
//! [`normalize_path`] first, so stores only ever see `/`-separated paths without
//! leading, trailing or repeated separators.

use crate::error::VaultError;

/// Characters a file or folder name inside the vault may not contain.
///
/// Backslashes never reach this check since [`normalize_path`] turns them into separators.
pub const FORBIDDEN_NAME_CHARS: [char; 7] = ['*', '"', '<', '>', ':', '|', '?'];

/// Normalizes a vault path.
///
/// Backslashes become `/`, non-breaking spaces become plain spaces, and empty
/// segments are dropped. The vault root normalizes to `/`.
pub fn normalize_path(path: &str) -> String {
    let cleaned: String = path
        .chars()
        .map(|c| match c {
            '\\' => '/',
            '\u{00A0}' | '\u{202F}' => ' ',
            c => c,
        })
        .collect();

    let joined = cleaned
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<&str>>()
        .join("/");

    if joined.is_empty() {
        "/".to_string()
    } else {
        joined
    }
}

/// Checks a normalized path before anything is written to it.
///
/// `.` and `..` segments would escape or alias the vault, and names with
/// [`FORBIDDEN_NAME_CHARS`] are refused.
pub fn check_path(normalized: &str) -> Result<(), VaultError> {
    if normalized == "/" {
        return Err(VaultError::InvalidPath(normalized.to_string()));
    }
    for segment in normalized.split('/') {
        if segment == "." || segment == ".." {
            return Err(VaultError::InvalidPath(normalized.to_string()));
        }
        if segment.contains(FORBIDDEN_NAME_CHARS) {
            return Err(VaultError::InvalidFileName(normalized.to_string()));
        }
    }
    Ok(())
}

/// Path of the note file, without the `.md` extension.
///
/// Folder and title are used verbatim; only the separators are normalized.
pub fn note_base_path(folder: &str, date: &str, title: &str) -> String {
    normalize_path(&format!("{}/{} - {}", folder, date, title))
}

/// Full, normalized path of the note file.
pub fn note_path(folder: &str, date: &str, title: &str) -> String {
    normalize_path(&format!("{}/{} - {}.md", folder, date, title))
}

/// Path of the user template file for a configured template path.
pub fn template_file_path(template_path: &str) -> String {
    format!("{}.md", normalize_path(template_path))
}

/// Wiki link pointing at a note, e.g. `[[Meeting Notes/2024-03-01 - Standup]]`.
pub fn wiki_link(base_path: &str) -> String {
    format!("[[{}]]", base_path)
}

/// Returns true if `path` has a `.md` extension.
pub fn is_markdown(path: &str) -> bool {
    path.rsplit('/')
        .next()
        .and_then(|name| name.rsplit_once('.'))
        .is_some_and(|(stem, ext)| !stem.is_empty() && ext.eq_ignore_ascii_case("md"))
}
