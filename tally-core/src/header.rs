//! Header row detection.
//!
//! The first row with a cell containing the header keyword ("date" by
//! default, case-insensitive) becomes the established header. Later rows equal
//! to it cell for cell are repeated headers, which statements print at the
//! top of every page. Rows that are neither go on to classification.

use serde::{Deserialize, Serialize};

use crate::Row;

pub const DEFAULT_HEADER_KEYWORD: &str = "date";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderOutcome {
    /// The row just became the header.
    Established,
    /// The row equals the established header.
    Repeated,
    /// Anything else.
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderSource {
    Detected,
    Synthetic,
}

#[derive(Debug, Clone)]
pub struct HeaderDetector {
    keyword: String,
    established: Option<Row>,
}

impl Default for HeaderDetector {
    fn default() -> Self {
        Self::new(DEFAULT_HEADER_KEYWORD)
    }
}

impl HeaderDetector {
    pub fn new(keyword: impl Into<String>) -> Self {
        let keyword: String = keyword.into();
        Self {
            keyword: keyword.to_lowercase(),
            established: None,
        }
    }

    pub fn header(&self) -> Option<&Row> {
        self.established.as_ref()
    }

    fn looks_like_header(&self, row: &[String]) -> bool {
        row.iter()
            .any(|cell| !cell.is_empty() && cell.to_lowercase().contains(&self.keyword))
    }

    pub fn observe(&mut self, row: &[String]) -> HeaderOutcome {
        match &self.established {
            Some(header) if header.as_slice() == row => HeaderOutcome::Repeated,
            Some(_) => HeaderOutcome::Data,
            None if self.looks_like_header(row) => {
                self.established = Some(row.to_vec());
                HeaderOutcome::Established
            }
            None => HeaderOutcome::Data,
        }
    }

    /// The final header: the established one, or a synthetic
    /// `Column 1..Column N` sized to the widest accepted row.
    pub fn finalize(&self, rows: &[Row]) -> (Row, HeaderSource) {
        match &self.established {
            Some(header) => (header.clone(), HeaderSource::Detected),
            None => {
                let width = rows.iter().map(Vec::len).max().unwrap_or(0);
                (synthetic_header(width), HeaderSource::Synthetic)
            }
        }
    }
}

pub fn synthetic_header(width: usize) -> Row {
    (1..=width).map(|i| format!("Column {i}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Row {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_header_established_then_repeated() {
        let mut d = HeaderDetector::default();
        let header = row(&["Date", "Description", "Amount"]);
        assert_eq!(d.observe(&header), HeaderOutcome::Established);
        assert_eq!(d.observe(&row(&["2024-01-05", "Rent", "-50.00"])), HeaderOutcome::Data);
        assert_eq!(d.observe(&header), HeaderOutcome::Repeated);
        assert_eq!(d.header(), Some(&header));
    }

    #[test]
    fn test_first_row_not_forced_to_header() {
        let mut d = HeaderDetector::default();
        assert_eq!(d.observe(&row(&["Statement of account", "Page 1"])), HeaderOutcome::Data);
        assert!(d.header().is_none());
        assert_eq!(d.observe(&row(&["Value DATE", "Details"])), HeaderOutcome::Established);
    }

    #[test]
    fn test_one_cell_difference_is_not_a_repeat() {
        let mut d = HeaderDetector::default();
        d.observe(&row(&["Date", "Description", "Amount"]));
        assert_eq!(d.observe(&row(&["Date", "Description", "Amount "])), HeaderOutcome::Data);
        assert_eq!(d.observe(&row(&["Date", "Description"])), HeaderOutcome::Data);
    }

    #[test]
    fn test_synthetic_header_uses_widest_row() {
        let d = HeaderDetector::default();
        let rows = vec![row(&["a", "b"]), row(&["a", "b", "c", "d"]), row(&["a"])];
        let (header, source) = d.finalize(&rows);
        assert_eq!(source, HeaderSource::Synthetic);
        assert_eq!(header, row(&["Column 1", "Column 2", "Column 3", "Column 4"]));
    }

    #[test]
    fn test_detected_header_kept() {
        let mut d = HeaderDetector::new("Booking");
        d.observe(&row(&["Booking day", "Text", "Sum"]));
        let (header, source) = d.finalize(&[]);
        assert_eq!(source, HeaderSource::Detected);
        assert_eq!(header[0], "Booking day");
    }
}
