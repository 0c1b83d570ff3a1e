//! Cell cleanup applied to every extracted cell before anything else looks at it.

use crate::Row;
use crate::source::RawCell;

/// Canonical text for a raw cell: line breaks become spaces, outer
/// whitespace is trimmed, a missing cell becomes the empty string.
pub fn normalize_cell(cell: Option<&str>) -> String {
    match cell {
        Some(text) => text
            .replace("\r\n", " ")
            .replace(['\n', '\r'], " ")
            .trim()
            .to_string(),
        None => String::new(),
    }
}

/// Normalize every cell of a raw row. Width is preserved.
pub fn normalize_row(raw: &[RawCell]) -> Row {
    raw.iter().map(|c| normalize_cell(c.as_deref())).collect()
}
