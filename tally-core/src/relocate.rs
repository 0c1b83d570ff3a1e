//! Date relocation pass.
//!
//! Runs once over all accepted rows after the header is final. When the
//! header names both a description and a date column, date tokens are
//! stripped from the description cell; the date column is left alone. Without
//! those columns, each row is inspected on its own: if exactly one cell is a
//! bare date, date tokens are stripped from every other cell.

use serde::Serialize;

use crate::Row;
use crate::events::{EventSink, ExtractionEvent, SkipReason};
use crate::patterns::TokenRecognizer;

pub const DEFAULT_DESCRIPTION_KEYWORD: &str = "description";
pub const DEFAULT_DATE_KEYWORD: &str = "date";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RelocationMode {
    ByHeader { date_column: usize, description_column: usize },
    ByContent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RelocationReport {
    #[serde(flatten)]
    pub mode: RelocationMode,
    pub cells_stripped: usize,
    pub rows_skipped: usize,
}

pub struct DateRelocator<'a> {
    date: &'a dyn TokenRecognizer,
    description_keyword: String,
    date_keyword: String,
}

impl<'a> DateRelocator<'a> {
    pub fn new(date: &'a dyn TokenRecognizer) -> Self {
        Self {
            date,
            description_keyword: DEFAULT_DESCRIPTION_KEYWORD.to_string(),
            date_keyword: DEFAULT_DATE_KEYWORD.to_string(),
        }
    }

    pub fn with_keywords(mut self, description: &str, date: &str) -> Self {
        self.description_keyword = description.to_lowercase();
        self.date_keyword = date.to_lowercase();
        self
    }

    /// Column roles from header text: `(date, description)`.
    pub fn column_roles(&self, header: &[String]) -> (Option<usize>, Option<usize>) {
        let description = find_column(header, &self.description_keyword, None);
        let date = find_column(header, &self.date_keyword, description);
        (date, description)
    }

    pub fn relocate(
        &self,
        header: &[String],
        rows: &mut [Row],
        sink: &mut dyn EventSink,
    ) -> RelocationReport {
        match self.column_roles(header) {
            (Some(date_column), Some(description_column)) => {
                let mut report = RelocationReport {
                    mode: RelocationMode::ByHeader {
                        date_column,
                        description_column,
                    },
                    cells_stripped: 0,
                    rows_skipped: 0,
                };
                for (i, row) in rows.iter_mut().enumerate() {
                    if description_column >= row.len() {
                        report.rows_skipped += 1;
                        sink.emit(ExtractionEvent::RelocationSkipped {
                            row: i,
                            reason: SkipReason::ShortRow {
                                width: row.len(),
                                needed: description_column + 1,
                            },
                        });
                        continue;
                    }
                    if self.strip_cell(i, description_column, row, sink) {
                        report.cells_stripped += 1;
                    }
                }
                report
            }
            _ => {
                let mut report = RelocationReport {
                    mode: RelocationMode::ByContent,
                    cells_stripped: 0,
                    rows_skipped: 0,
                };
                for (i, row) in rows.iter_mut().enumerate() {
                    let date_cells: Vec<usize> = row
                        .iter()
                        .enumerate()
                        .filter(|(_, cell)| self.date.matches_exactly(cell))
                        .map(|(j, _)| j)
                        .collect();

                    let keep = match date_cells.as_slice() {
                        [only] => *only,
                        [] => {
                            report.rows_skipped += 1;
                            sink.emit(ExtractionEvent::RelocationSkipped {
                                row: i,
                                reason: SkipReason::NoDateColumn,
                            });
                            continue;
                        }
                        many => {
                            report.rows_skipped += 1;
                            sink.emit(ExtractionEvent::RelocationSkipped {
                                row: i,
                                reason: SkipReason::AmbiguousDateColumns { count: many.len() },
                            });
                            continue;
                        }
                    };

                    for column in 0..row.len() {
                        if column != keep && self.strip_cell(i, column, row, sink) {
                            report.cells_stripped += 1;
                        }
                    }
                }
                report
            }
        }
    }

    fn strip_cell(&self, row_index: usize, column: usize, row: &mut Row, sink: &mut dyn EventSink) -> bool {
        let Some(cell) = row.get_mut(column) else {
            return false;
        };
        match self.date.strip(cell) {
            Some(stripped) if stripped != *cell => {
                sink.emit(ExtractionEvent::DateStripped {
                    row: row_index,
                    column,
                    before: cell.clone(),
                    after: stripped.clone(),
                });
                *cell = stripped;
                true
            }
            _ => false,
        }
    }
}

fn find_column(header: &[String], keyword: &str, exclude: Option<usize>) -> Option<usize> {
    header
        .iter()
        .enumerate()
        .find(|(i, name)| Some(*i) != exclude && name.to_lowercase().contains(keyword))
        .map(|(i, _)| i)
}
