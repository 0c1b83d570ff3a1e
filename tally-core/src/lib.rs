//! tally-core: row classification, header detection and date relocation for
//! transaction tables pulled out of bank statements.

pub mod classify;
pub mod error;
pub mod events;
pub mod extract;
pub mod header;
pub mod normalize;
pub mod patterns;
pub mod relocate;
pub mod source;

pub use classify::{RowClassifier, Verdict, DEFAULT_MIN_CELLS};
pub use error::ExtractError;
pub use events::{EventSink, ExtractionEvent, NullSink, SkipReason};
pub use extract::{ExtractSummary, Extractor, ExtractorSettings, Statement};
pub use header::{HeaderDetector, HeaderOutcome, HeaderSource, synthetic_header};
pub use normalize::{normalize_cell, normalize_row};
pub use patterns::{AmountRecognizer, DateRecognizer, PatternLibrary, TokenRecognizer};
pub use relocate::{DateRelocator, RelocationReport};
pub use source::{RawCell, RawPage, RawRow, RawTable, TableSource};

/// A normalized row: cell text by position.
pub type Row = Vec<String>;
