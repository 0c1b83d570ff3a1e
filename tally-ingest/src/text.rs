//! Layout-text statements: pages separated by form feeds.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use tally_core::{RawPage, TableSource};
use tracing::debug;

use crate::error::IngestError;
use crate::layout::TableLayout;

pub struct TextSource {
    path: PathBuf,
    text: String,
}

impl TextSource {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, IngestError> {
        let path = path.as_ref().to_path_buf();
        if !path.is_file() {
            return Err(IngestError::NotFound { path });
        }
        let text = fs::read_to_string(&path).map_err(|source| IngestError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(Self { path, text })
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            path: PathBuf::from("<memory>"),
            text: text.into(),
        }
    }
}

impl TableSource for TextSource {
    fn pages(&mut self) -> Result<Vec<RawPage>> {
        let layout = TableLayout::new()?;
        let pages: Vec<RawPage> = self
            .text
            .split('\x0c')
            .enumerate()
            .filter(|(_, page)| !page.trim().is_empty())
            .map(|(i, page)| RawPage {
                number: i as u32 + 1,
                tables: layout.tables(page),
            })
            .collect();

        if pages.is_empty() {
            return Err(IngestError::NoPages {
                path: self.path.clone(),
            }
            .into());
        }
        debug!(path = %self.path.display(), pages = pages.len(), "split layout text");
        Ok(pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_form_feed_splits_pages() {
        let mut src = TextSource::from_text(
            "Date   Amount\n2024-01-01   1.00\n\x0cDate   Amount\n2024-01-02   2.00\n",
        );
        let pages = src.pages().unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].number, 2);
        assert_eq!(pages[1].tables[0].rows[1][0].as_deref(), Some("2024-01-02"));
    }

    #[test]
    fn test_missing_file() {
        let err = TextSource::open("/definitely/not/here.txt").err().unwrap();
        assert!(matches!(err, IngestError::NotFound { .. }));
    }

    #[test]
    fn test_blank_file_has_no_pages() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "   ").unwrap();
        let mut src = TextSource::open(f.path()).unwrap();
        let err = src.pages().unwrap_err();
        assert!(matches!(err.downcast_ref::<IngestError>(), Some(IngestError::NoPages { .. })));
    }
}
