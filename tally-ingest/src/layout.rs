//! Table reconstruction from column-aligned page text.
//!
//! Expected input (one page of extracted text):
//!   Date         Description                      Amount
//!   2024-03-01   Rent                             -850.00
//!   2024-03-04   Card purchase SUPERVALU          -42.10
//!                DUBLIN 4
//!
//! Cells are separated by a tab or by two or more spaces. A lone cell that
//! lines up under a cell of the row above is a wrapped continuation and is
//! joined to that cell with a line break.

use anyhow::Result;
use regex::Regex;
use tally_core::{RawRow, RawTable};

/// A cell cut out of a line, with the character column it starts at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub column: usize,
    pub text: String,
}

pub struct TableLayout {
    separator: Regex,
    min_columns: usize,
    align_tolerance: usize,
}

impl TableLayout {
    pub fn new() -> Result<Self> {
        Ok(Self {
            separator: Regex::new(r"\t+|\s{2,}")?,
            min_columns: 2,
            align_tolerance: 2,
        })
    }

    pub fn split_cells(&self, line: &str) -> Vec<Segment> {
        let mut out = Vec::new();
        let mut last = 0;
        for m in self.separator.find_iter(line) {
            push_segment(line, last, m.start(), &mut out);
            last = m.end();
        }
        push_segment(line, last, line.len(), &mut out);
        out
    }

    pub fn tables(&self, text: &str) -> Vec<RawTable> {
        let mut tables = Vec::new();
        let mut current: Vec<RawRow> = Vec::new();
        let mut starts: Vec<usize> = Vec::new();

        for line in text.lines() {
            let segments = self.split_cells(line);

            if segments.len() >= self.min_columns {
                starts = segments.iter().map(|s| s.column).collect();
                current.push(segments.into_iter().map(|s| Some(s.text)).collect());
                continue;
            }

            if let [only] = segments.as_slice() {
                if let Some(idx) = self.aligned_with(&starts, only.column) {
                    if let Some(Some(cell)) = current.last_mut().and_then(|r| r.get_mut(idx)) {
                        cell.push('\n');
                        cell.push_str(&only.text);
                        continue;
                    }
                }
            }

            if !current.is_empty() {
                tables.push(RawTable::new(std::mem::take(&mut current)));
            }
            starts.clear();
        }

        if !current.is_empty() {
            tables.push(RawTable::new(current));
        }
        tables
    }

    fn aligned_with(&self, starts: &[usize], column: usize) -> Option<usize> {
        starts
            .iter()
            .position(|&s| s.abs_diff(column) <= self.align_tolerance)
    }
}

/// Split one page of layout text into tables.
pub fn tables_from_text(text: &str) -> Result<Vec<RawTable>> {
    Ok(TableLayout::new()?.tables(text))
}

fn push_segment(line: &str, start: usize, end: usize, out: &mut Vec<Segment>) {
    let piece = &line[start..end];
    let text = piece.trim();
    if text.is_empty() {
        return;
    }
    let byte_start = start + (piece.len() - piece.trim_start().len());
    out.push(Segment {
        column: line[..byte_start].chars().count(),
        text: text.to_string(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "\
ACME BANK                                   Statement 3 of 12

Date         Description                      Amount      Balance
2024-03-01   Rent                             -850.00     1,150.00
2024-03-04   Card purchase SUPERVALU          -42.10      1,107.90
             DUBLIN 4
2024-03-05\tSalary\t2,400.00\t3,507.90

Page 1
";

    #[test]
    fn test_split_cells_tracks_columns() {
        let layout = TableLayout::new().unwrap();
        let cells = layout.split_cells("  2024-03-01   Rent  €5.00");
        assert_eq!(
            cells,
            vec![
                Segment { column: 2, text: "2024-03-01".into() },
                Segment { column: 15, text: "Rent".into() },
                Segment { column: 21, text: "€5.00".into() },
            ]
        );
        // single spaces stay inside a cell
        assert_eq!(layout.split_cells("Card purchase SUPERVALU").len(), 1);
    }

    #[test]
    fn test_tables_and_continuations() {
        let tables = tables_from_text(PAGE).unwrap();
        assert_eq!(tables.len(), 2);

        assert_eq!(tables[0].rows, vec![vec![Some("ACME BANK".to_string()), Some("Statement 3 of 12".to_string())]]);

        let t = &tables[1];
        assert_eq!(t.rows.len(), 4);
        assert_eq!(t.rows[0][0].as_deref(), Some("Date"));
        assert_eq!(t.rows[2][1].as_deref(), Some("Card purchase SUPERVALU\nDUBLIN 4"));
        assert_eq!(t.rows[3][2].as_deref(), Some("2,400.00"));
    }

    #[test]
    fn test_unaligned_single_cell_ends_table() {
        let text = "Date    Amount\n2024-01-01    1.00\n                        Footer\n2024-01-02    2.00\n";
        let tables = tables_from_text(text).unwrap();
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[1].rows.len(), 1);
    }
}
