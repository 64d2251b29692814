use std::path::Path;

/// Content type for a file, derived only from its extension.
///
/// Unknown or missing extensions yield an empty string.
pub fn content_type(path: &Path) -> &'static str {
    mime_guess::from_path(path).first_raw().unwrap_or("")
}
