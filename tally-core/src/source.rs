//! Raw table input as produced by document adapters.

use anyhow::Result;

/// One cell as extracted; `None` when the extractor found no text at all.
pub type RawCell = Option<String>;

pub type RawRow = Vec<RawCell>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub rows: Vec<RawRow>,
}

impl RawTable {
    pub fn new(rows: Vec<RawRow>) -> Self {
        Self { rows }
    }

    /// Build a table from plain string cells (handy for fixtures).
    pub fn from_strs(rows: &[&[&str]]) -> Self {
        Self {
            rows: rows
                .iter()
                .map(|r| r.iter().map(|c| Some(c.to_string())).collect())
                .collect(),
        }
    }
}

/// A document page, numbered from 1, with its tables in reading order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawPage {
    pub number: u32,
    pub tables: Vec<RawTable>,
}

/// Anything that can hand over a document's tables page by page.
pub trait TableSource {
    fn pages(&mut self) -> Result<Vec<RawPage>>;
}

impl TableSource for Vec<RawPage> {
    fn pages(&mut self) -> Result<Vec<RawPage>> {
        Ok(std::mem::take(self))
    }
}
