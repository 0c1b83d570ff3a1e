//! Renders extraction events through `tracing`.

use tally_core::{EventSink, ExtractionEvent};
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&mut self, event: ExtractionEvent) {
        match event {
            ExtractionEvent::PageScanned { page, tables } => {
                info!(page, tables, "page scanned");
            }
            ExtractionEvent::TableScanned { page, table, rows } => {
                debug!(page, table, rows, "table scanned");
            }
            ExtractionEvent::HeaderDetected { header } => {
                info!(?header, "detected headers");
            }
            ExtractionEvent::RepeatedHeaderSkipped => {
                debug!("repeated header skipped");
            }
            ExtractionEvent::RowAccepted { row } => {
                debug!(?row, "transaction");
            }
            ExtractionEvent::RowRejected { row, verdict } => {
                info!(?row, reason = verdict.label(), "ignored");
            }
            ExtractionEvent::SyntheticHeader { header } => {
                warn!(?header, "no header row found, using generated column names");
            }
            ExtractionEvent::DateStripped { row, column, before, after } => {
                debug!(row, column, %before, %after, "date removed from cell");
            }
            ExtractionEvent::RelocationSkipped { row, reason } => {
                debug!(row, ?reason, "date relocation skipped");
            }
        }
    }
}

/// One line per event for `tally inspect`.
pub fn describe(event: &ExtractionEvent) -> String {
    match event {
        ExtractionEvent::PageScanned { page, tables } => format!("Page {page}: {tables} table(s)"),
        ExtractionEvent::TableScanned { table, rows, .. } => format!("  Table {table}: {rows} row(s)"),
        ExtractionEvent::HeaderDetected { header } => format!("    header   {header:?}"),
        ExtractionEvent::RepeatedHeaderSkipped => "    repeat   (header)".to_string(),
        ExtractionEvent::RowAccepted { row } => format!("    keep     {row:?}"),
        ExtractionEvent::RowRejected { row, verdict } => {
            format!("    ignore   {row:?} ({})", verdict.label())
        }
        ExtractionEvent::SyntheticHeader { header } => format!("Generated header {header:?}"),
        ExtractionEvent::DateStripped { row, column, before, after } => {
            format!("Row {row}, column {}: {before:?} -> {after:?}", column + 1)
        }
        ExtractionEvent::RelocationSkipped { row, reason } => {
            format!("Row {row}: relocation skipped ({reason:?})")
        }
    }
}
