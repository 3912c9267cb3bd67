pub const MNOTE_CLI: &str = "mnote";

/// Placeholder in editor commands replaced by the absolute path of the new note.
pub const PATH_PLACEHOLDER: &str = "{path}";
