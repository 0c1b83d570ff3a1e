//! Observable extraction events.
//!
//! The core reports what it decided through an [`EventSink`]; rendering
//! (logging, progress output) is up to the caller.

use serde::Serialize;

use crate::Row;
use crate::classify::Verdict;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// The row has no cell at the description column.
    ShortRow { width: usize, needed: usize },
    /// No header columns to go by and no cell is a bare date.
    NoDateColumn,
    /// No header columns to go by and several cells are bare dates.
    AmbiguousDateColumns { count: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ExtractionEvent {
    PageScanned { page: u32, tables: usize },
    TableScanned { page: u32, table: usize, rows: usize },
    HeaderDetected { header: Row },
    RepeatedHeaderSkipped,
    RowAccepted { row: Row },
    RowRejected { row: Row, verdict: Verdict },
    SyntheticHeader { header: Row },
    DateStripped { row: usize, column: usize, before: String, after: String },
    RelocationSkipped { row: usize, reason: SkipReason },
}

pub trait EventSink {
    fn emit(&mut self, event: ExtractionEvent);
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: ExtractionEvent) {}
}

impl EventSink for Vec<ExtractionEvent> {
    fn emit(&mut self, event: ExtractionEvent) {
        self.push(event);
    }
}
