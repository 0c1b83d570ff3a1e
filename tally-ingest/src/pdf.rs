//! PDF statements via lopdf.
//!
//! Page text is pulled in document order and cut into tables by
//! [`TableLayout`]. Encrypted documents must be unlocked before
//! [`TableSource::pages`] is called.

use std::path::{Path, PathBuf};

use anyhow::Result;
use lopdf::Document;
use tally_core::{RawPage, TableSource};
use tracing::{info, warn};

use crate::error::IngestError;
use crate::layout::TableLayout;

pub struct PdfSource {
    path: PathBuf,
    doc: Document,
    locked: bool,
}

impl PdfSource {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, IngestError> {
        let path = path.as_ref().to_path_buf();
        if !path.is_file() {
            return Err(IngestError::NotFound { path });
        }

        let doc = Document::load(&path).map_err(|source| IngestError::Unreadable {
            path: path.clone(),
            source,
        })?;
        let locked = doc.is_encrypted();
        info!(path = %path.display(), pages = doc.get_pages().len(), encrypted = locked, "opened statement");

        Ok(Self { path, doc, locked })
    }

    pub fn is_encrypted(&self) -> bool {
        self.locked
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    pub fn unlock(&mut self, password: &str) -> Result<(), IngestError> {
        if !self.locked {
            return Ok(());
        }
        self.doc
            .decrypt(password)
            .map_err(|source| IngestError::Decryption {
                path: self.path.clone(),
                source,
            })?;
        self.locked = false;
        info!(path = %self.path.display(), "decrypted statement");
        Ok(())
    }
}

impl TableSource for PdfSource {
    fn pages(&mut self) -> Result<Vec<RawPage>> {
        if self.locked {
            return Err(IngestError::Locked {
                path: self.path.clone(),
            }
            .into());
        }

        let numbers: Vec<u32> = self.doc.get_pages().keys().copied().collect();
        if numbers.is_empty() {
            return Err(IngestError::NoPages {
                path: self.path.clone(),
            }
            .into());
        }

        let layout = TableLayout::new()?;
        let mut pages = Vec::with_capacity(numbers.len());
        for number in numbers {
            let tables = match self.doc.extract_text(&[number]) {
                Ok(text) => layout.tables(&text),
                Err(e) => {
                    warn!(page = number, error = %e, "no text extracted");
                    Vec::new()
                }
            };
            pages.push(RawPage { number, tables });
        }
        Ok(pages)
    }
}
