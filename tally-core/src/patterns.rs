//! Date and amount recognizers shared by the classifier and the relocator.
//!
//! Detection is substring based: a date inside "Paid 2024-01-05 rent" still
//! counts. The relocator's "this column is only a date" test uses
//! [`TokenRecognizer::matches_exactly`] instead.

use regex::Regex;

/// Date shapes, longest first so `20240105` is not read as the year `2024`.
const DATE_SHAPES: &str = concat!(
    r"\d{4}-\d{2}-\d{2}",
    r"|\d{4}/\d{2}/\d{2}",
    r"|\d{1,2}/\d{1,2}/\d{4}",
    r"|\d{8}",
    r"|\d{4}",
);

const AMOUNT_SHAPE: &str = r"^-?\d+(?:\.\d+)?$";

/// A named token recognizer.
pub trait TokenRecognizer: Send + Sync {
    fn name(&self) -> &'static str;

    /// Whether the token appears anywhere in the cell.
    fn contains(&self, cell: &str) -> bool;

    /// Whether the whole (trimmed) cell is one token.
    fn matches_exactly(&self, cell: &str) -> bool;

    /// Remove every token from the cell, collapsing the whitespace left
    /// behind. `None` when the cell holds no token.
    fn strip(&self, cell: &str) -> Option<String>;
}

pub struct DateRecognizer {
    anywhere: Regex,
    exact: Regex,
}

impl DateRecognizer {
    pub fn new() -> Self {
        // Both patterns are compile-time constants.
        let anywhere = Regex::new(&format!(r"\b(?:{DATE_SHAPES})\b")).expect("date pattern");
        let exact = Regex::new(&format!(r"^(?:{DATE_SHAPES})$")).expect("date pattern");
        Self { anywhere, exact }
    }

    /// Byte ranges of date tokens, leaving out digits that belong to a
    /// decimal number such as the `1500` in `1500.00`.
    fn spans(&self, cell: &str) -> Vec<(usize, usize)> {
        self.anywhere
            .find_iter(cell)
            .filter(|m| !inside_number(cell, m.start(), m.end()))
            .map(|m| (m.start(), m.end()))
            .collect()
    }
}

/// A separator (`.` or `,`) directly followed or preceded by a digit on the
/// far side of the match means the match is part of a number.
fn inside_number(cell: &str, start: usize, end: usize) -> bool {
    let is_sep = |b: u8| b == b'.' || b == b',';
    let bytes = cell.as_bytes();
    let after = end + 1 < bytes.len() && is_sep(bytes[end]) && bytes[end + 1].is_ascii_digit();
    let before = start >= 2 && is_sep(bytes[start - 1]) && bytes[start - 2].is_ascii_digit();
    after || before
}

impl Default for DateRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenRecognizer for DateRecognizer {
    fn name(&self) -> &'static str {
        "date"
    }

    fn contains(&self, cell: &str) -> bool {
        !self.spans(cell).is_empty()
    }

    fn matches_exactly(&self, cell: &str) -> bool {
        self.exact.is_match(cell.trim())
    }

    fn strip(&self, cell: &str) -> Option<String> {
        let spans = self.spans(cell);
        if spans.is_empty() {
            return None;
        }
        let mut removed = String::with_capacity(cell.len());
        let mut last = 0;
        for (start, end) in spans {
            removed.push_str(&cell[last..start]);
            last = end;
        }
        removed.push_str(&cell[last..]);
        Some(collapse_whitespace(&removed))
    }
}

/// Monetary amounts such as `-7.09`, `1,234.56` or `€12.50`.
///
/// Currency symbols and thousands separators are dropped first; what is left
/// must be a whitespace-delimited number, so `ref-2024` is not an amount.
pub struct AmountRecognizer {
    shape: Regex,
    currency_symbols: Vec<String>,
}

impl AmountRecognizer {
    pub fn new() -> Self {
        Self::with_currency_symbols(["€", "$"])
    }

    pub fn with_currency_symbols<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            shape: Regex::new(AMOUNT_SHAPE).expect("amount pattern"),
            currency_symbols: symbols
                .into_iter()
                .map(Into::<String>::into)
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    fn clean(&self, text: &str) -> String {
        let mut out = text.replace(',', "");
        for sym in &self.currency_symbols {
            out = out.replace(sym.as_str(), "");
        }
        out
    }

    fn is_amount_word(&self, word: &str) -> bool {
        let cleaned = self.clean(word);
        !cleaned.is_empty() && self.shape.is_match(&cleaned)
    }
}

impl Default for AmountRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenRecognizer for AmountRecognizer {
    fn name(&self) -> &'static str {
        "amount"
    }

    fn contains(&self, cell: &str) -> bool {
        self.clean(cell)
            .split_whitespace()
            .any(|w| self.shape.is_match(w))
    }

    fn matches_exactly(&self, cell: &str) -> bool {
        self.shape.is_match(self.clean(cell).trim())
    }

    fn strip(&self, cell: &str) -> Option<String> {
        let kept: Vec<&str> = cell
            .split_whitespace()
            .filter(|w| !self.is_amount_word(w))
            .collect();
        if kept.len() == cell.split_whitespace().count() {
            return None;
        }
        Some(kept.join(" "))
    }
}

/// The recognizers used by classification and relocation.
pub struct PatternLibrary {
    pub date: Box<dyn TokenRecognizer>,
    pub amount: Box<dyn TokenRecognizer>,
}

impl PatternLibrary {
    pub fn new(date: Box<dyn TokenRecognizer>, amount: Box<dyn TokenRecognizer>) -> Self {
        Self { date, amount }
    }

    /// Default date shapes with a custom set of currency symbols.
    pub fn with_currency_symbols<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            Box::new(DateRecognizer::new()),
            Box::new(AmountRecognizer::with_currency_symbols(symbols)),
        )
    }

    pub fn has_date(&self, cell: &str) -> bool {
        self.date.contains(cell)
    }

    pub fn has_amount(&self, cell: &str) -> bool {
        self.amount.contains(cell)
    }
}

impl Default for PatternLibrary {
    fn default() -> Self {
        Self::new(Box::new(DateRecognizer::new()), Box::new(AmountRecognizer::new()))
    }
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
