//! The extraction context: one mutable object carried through a whole
//! document scan, holding the header slot and the accepted-row accumulator.

use serde::Serialize;

use crate::Row;
use crate::classify::{DEFAULT_MIN_CELLS, RowClassifier, Verdict};
use crate::error::ExtractError;
use crate::events::{EventSink, ExtractionEvent};
use crate::header::{DEFAULT_HEADER_KEYWORD, HeaderDetector, HeaderOutcome, HeaderSource};
use crate::normalize::normalize_row;
use crate::patterns::PatternLibrary;
use crate::relocate::{
    DEFAULT_DATE_KEYWORD, DEFAULT_DESCRIPTION_KEYWORD, DateRelocator, RelocationReport,
};
use crate::source::{RawCell, RawPage, RawTable, TableSource};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorSettings {
    pub min_cells: usize,
    pub header_keyword: String,
    pub description_keyword: String,
    pub date_keyword: String,
}

impl Default for ExtractorSettings {
    fn default() -> Self {
        Self {
            min_cells: DEFAULT_MIN_CELLS,
            header_keyword: DEFAULT_HEADER_KEYWORD.to_string(),
            description_keyword: DEFAULT_DESCRIPTION_KEYWORD.to_string(),
            date_keyword: DEFAULT_DATE_KEYWORD.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractSummary {
    pub pages: usize,
    pub tables: usize,
    pub rows_seen: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub repeated_headers: usize,
    pub cells_stripped: usize,
    pub relocation_skips: usize,
}

/// Final header plus accepted rows, after relocation.
#[derive(Debug, Clone, Serialize)]
pub struct Statement {
    pub header: Row,
    pub header_source: HeaderSource,
    pub rows: Vec<Row>,
    pub relocation: RelocationReport,
    pub summary: ExtractSummary,
}

pub struct Extractor {
    patterns: PatternLibrary,
    settings: ExtractorSettings,
    header: HeaderDetector,
    rows: Vec<Row>,
    summary: ExtractSummary,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(PatternLibrary::default(), ExtractorSettings::default())
    }
}

impl Extractor {
    pub fn new(patterns: PatternLibrary, settings: ExtractorSettings) -> Self {
        let header = HeaderDetector::new(settings.header_keyword.clone());
        Self {
            patterns,
            settings,
            header,
            rows: Vec::new(),
            summary: ExtractSummary::default(),
        }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn summary(&self) -> &ExtractSummary {
        &self.summary
    }

    /// Feed one raw row. Returns the classifier verdict, or `None` when the
    /// row was taken as a header (new or repeated).
    pub fn push_row(&mut self, raw: &[RawCell], sink: &mut dyn EventSink) -> Option<Verdict> {
        let row = normalize_row(raw);
        self.summary.rows_seen += 1;

        match self.header.observe(&row) {
            HeaderOutcome::Established => {
                sink.emit(ExtractionEvent::HeaderDetected { header: row });
                return None;
            }
            HeaderOutcome::Repeated => {
                self.summary.repeated_headers += 1;
                sink.emit(ExtractionEvent::RepeatedHeaderSkipped);
                return None;
            }
            HeaderOutcome::Data => {}
        }

        let verdict = RowClassifier::new(&self.patterns)
            .with_min_cells(self.settings.min_cells)
            .classify(&row);

        if verdict.is_accepted() {
            self.summary.accepted += 1;
            sink.emit(ExtractionEvent::RowAccepted { row: row.clone() });
            self.rows.push(row);
        } else {
            self.summary.rejected += 1;
            sink.emit(ExtractionEvent::RowRejected { row, verdict });
        }
        Some(verdict)
    }

    pub fn push_table(&mut self, page: u32, index: usize, table: &RawTable, sink: &mut dyn EventSink) {
        self.summary.tables += 1;
        sink.emit(ExtractionEvent::TableScanned {
            page,
            table: index + 1,
            rows: table.rows.len(),
        });
        for raw in &table.rows {
            self.push_row(raw, sink);
        }
    }

    pub fn push_page(&mut self, page: &RawPage, sink: &mut dyn EventSink) {
        self.summary.pages += 1;
        sink.emit(ExtractionEvent::PageScanned {
            page: page.number,
            tables: page.tables.len(),
        });
        for (i, table) in page.tables.iter().enumerate() {
            self.push_table(page.number, i, table, sink);
        }
    }

    /// Pull every page from `source`, then finish.
    pub fn run(
        mut self,
        source: &mut dyn TableSource,
        sink: &mut dyn EventSink,
    ) -> Result<Statement, ExtractError> {
        let pages = source.pages()?;
        for page in &pages {
            self.push_page(page, sink);
        }
        self.finish(sink)
    }

    /// Settle the header and run date relocation over everything accepted.
    pub fn finish(mut self, sink: &mut dyn EventSink) -> Result<Statement, ExtractError> {
        if self.rows.is_empty() {
            return Err(ExtractError::NoTransactions {
                rows_seen: self.summary.rows_seen,
            });
        }

        let (header, header_source) = self.header.finalize(&self.rows);
        if header_source == HeaderSource::Synthetic {
            sink.emit(ExtractionEvent::SyntheticHeader {
                header: header.clone(),
            });
        }

        let relocation = DateRelocator::new(&*self.patterns.date)
            .with_keywords(&self.settings.description_keyword, &self.settings.date_keyword)
            .relocate(&header, &mut self.rows, sink);
        self.summary.cells_stripped = relocation.cells_stripped;
        self.summary.relocation_skips = relocation.rows_skipped;

        Ok(Statement {
            header,
            header_source,
            rows: self.rows,
            relocation,
            summary: self.summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::NullSink;

    fn raw(cells: &[&str]) -> Vec<RawCell> {
        cells.iter().map(|c| Some(c.to_string())).collect()
    }

    #[test]
    fn test_header_rows_not_classified() {
        let mut ex = Extractor::default();
        let mut sink = NullSink;
        assert_eq!(ex.push_row(&raw(&["Date", "Description", "Amount"]), &mut sink), None);
        assert_eq!(
            ex.push_row(&raw(&["2024-01-05", "Coffee", "3.20"]), &mut sink),
            Some(Verdict::Accepted)
        );
        assert_eq!(ex.push_row(&raw(&["Date", "Description", "Amount"]), &mut sink), None);
        assert_eq!(ex.rows().len(), 1);
        assert_eq!(ex.summary().repeated_headers, 1);
    }

    #[test]
    fn test_multiline_cells_normalized_before_classification() {
        let mut ex = Extractor::default();
        let verdict = ex.push_row(
            &[Some("2024-01-05".into()), Some("Card\npurchase".into()), None, Some("€1,020.10\n".into())],
            &mut NullSink,
        );
        assert_eq!(verdict, Some(Verdict::Accepted));
        assert_eq!(ex.rows()[0], vec!["2024-01-05", "Card purchase", "", "€1,020.10"]);
    }

    #[test]
    fn test_empty_document_is_an_error() {
        let ex = Extractor::default();
        let err = ex.finish(&mut NullSink).unwrap_err();
        assert!(matches!(err, ExtractError::NoTransactions { rows_seen: 0 }));
    }

    #[test]
    fn test_source_failure_propagates() {
        struct Broken;
        impl TableSource for Broken {
            fn pages(&mut self) -> anyhow::Result<Vec<RawPage>> {
                anyhow::bail!("cannot open statement.pdf")
            }
        }
        let err = Extractor::default().run(&mut Broken, &mut NullSink).unwrap_err();
        assert!(matches!(err, ExtractError::Source(_)));
        assert_eq!(err.to_string(), "cannot open statement.pdf");
    }
}
