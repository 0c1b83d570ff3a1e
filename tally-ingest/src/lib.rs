//! tally-ingest: document adapters that turn statements into raw tables.

pub mod error;
pub mod layout;
pub mod pdf;
pub mod text;

pub use error::IngestError;
pub use layout::{Segment, TableLayout, tables_from_text};
pub use pdf::PdfSource;
pub use text::TextSource;

use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Pdf,
    /// Column-aligned text, e.g. the output of `pdftotext -layout`.
    LayoutText,
}

impl SourceKind {
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("txt") | Some("text") => SourceKind::LayoutText,
            _ => SourceKind::Pdf,
        }
    }
}
