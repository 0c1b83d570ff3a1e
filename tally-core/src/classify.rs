//! Transaction row classification.
//!
//! A row is a transaction when it has enough cells, at least one cell with a
//! date token and at least one cell with an amount token. The classifier
//! knows nothing about headers; repeated headers are dropped before rows get
//! here.

use serde::{Deserialize, Serialize};

use crate::patterns::PatternLibrary;

pub const DEFAULT_MIN_CELLS: usize = 2;

/// Outcome of classifying one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Accepted,
    TooShort,
    MissingDate,
    MissingAmount,
    MissingBoth,
}

impl Verdict {
    pub fn is_accepted(self) -> bool {
        matches!(self, Verdict::Accepted)
    }

    pub fn label(self) -> &'static str {
        match self {
            Verdict::Accepted => "accepted",
            Verdict::TooShort => "too few cells",
            Verdict::MissingDate => "no date",
            Verdict::MissingAmount => "no amount",
            Verdict::MissingBoth => "no date or amount",
        }
    }
}

pub struct RowClassifier<'a> {
    patterns: &'a PatternLibrary,
    min_cells: usize,
}

impl<'a> RowClassifier<'a> {
    pub fn new(patterns: &'a PatternLibrary) -> Self {
        Self {
            patterns,
            min_cells: DEFAULT_MIN_CELLS,
        }
    }

    pub fn with_min_cells(mut self, min_cells: usize) -> Self {
        self.min_cells = min_cells;
        self
    }

    pub fn classify(&self, row: &[String]) -> Verdict {
        if row.is_empty() || row.len() < self.min_cells {
            return Verdict::TooShort;
        }

        let has_date = row.iter().any(|c| self.patterns.has_date(c));
        let has_amount = row.iter().any(|c| self.patterns.has_amount(c));

        match (has_date, has_amount) {
            (true, true) => Verdict::Accepted,
            (false, true) => Verdict::MissingDate,
            (true, false) => Verdict::MissingAmount,
            (false, false) => Verdict::MissingBoth,
        }
    }

    pub fn is_transaction(&self, row: &[String]) -> bool {
        self.classify(row).is_accepted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_short_rows_rejected() {
        let lib = PatternLibrary::default();
        let c = RowClassifier::new(&lib);
        assert_eq!(c.classify(&[]), Verdict::TooShort);
        assert_eq!(c.classify(&row(&["2024-01-05 100.00"])), Verdict::TooShort);
    }

    #[test]
    fn test_date_and_amount_accepted() {
        let lib = PatternLibrary::default();
        let c = RowClassifier::new(&lib);
        assert!(c.is_transaction(&row(&["ann", "2024-01-05", "100.00"])));
        assert!(c.is_transaction(&row(&["Paid 2024-01-05 rent", "€1,200.00"])));
    }

    #[test]
    fn test_one_signal_is_not_enough() {
        let lib = PatternLibrary::default();
        let c = RowClassifier::new(&lib);
        assert_eq!(c.classify(&row(&["ref-2024", "no amount here"])), Verdict::MissingAmount);
        assert_eq!(c.classify(&row(&["Opening balance", "12.00"])), Verdict::MissingDate);
        assert_eq!(c.classify(&row(&["Page", "of"])), Verdict::MissingBoth);
        assert_eq!(c.classify(&row(&["Balance", "1500.00"])), Verdict::MissingDate);
    }

    #[test]
    fn test_min_cells_configurable() {
        let lib = PatternLibrary::default();
        let c = RowClassifier::new(&lib).with_min_cells(4);
        assert_eq!(c.classify(&row(&["ann", "2024-01-05", "100.00"])), Verdict::TooShort);
    }
}
