//! Codec for the comma-delimited dependency column used by task storage.
//!
//! Only the persistence boundary deals in delimited strings; everything past
//! `decode_dependencies` works with `Vec<String>`.

const SEPARATOR: char = ',';

/// Decode a stored dependency column into a list of titles.
///
/// Entries are trimmed and blanks are dropped. Order is preserved.
pub fn decode_dependencies(stored: Option<&str>) -> Vec<String> {
    let Some(stored) = stored else {
        return Vec::new();
    };

    stored
        .split(SEPARATOR)
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .map(str::to_string)
        .collect()
}

/// Encode a list of titles into the stored column form.
///
/// An empty list is stored as `None`.
pub fn encode_dependencies(titles: &[String]) -> Option<String> {
    if titles.is_empty() {
        return None;
    }
    Some(titles.join(&SEPARATOR.to_string()))
}
