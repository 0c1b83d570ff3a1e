//! CSV output and the optional JSON run report.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::Path;
use tally_core::{ExtractSummary, HeaderSource, RelocationReport, Statement};

/// Header once, then rows in the order they were accepted. Rows narrower
/// than the header are padded with empty cells.
pub fn write_statement<W: io::Write>(writer: W, statement: &Statement) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(writer);
    wtr.write_record(&statement.header)?;
    let width = statement.header.len();
    for row in &statement.rows {
        wtr.write_record(padded(row, width))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_csv(path: &Path, statement: &Statement) -> Result<()> {
    let file = fs::File::create(path).with_context(|| format!("create {}", path.display()))?;
    write_statement(file, statement).with_context(|| format!("write {}", path.display()))
}

fn padded(row: &[String], width: usize) -> Vec<&str> {
    let mut cells: Vec<&str> = row.iter().map(String::as_str).collect();
    if cells.len() < width {
        cells.resize(width, "");
    }
    cells
}

#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub generated_at_utc: String,
    pub source: String,
    pub output: String,
    pub header_source: HeaderSource,
    pub header: &'a [String],
    pub relocation: &'a RelocationReport,
    pub summary: &'a ExtractSummary,
}

impl<'a> RunReport<'a> {
    pub fn new(source: &Path, output: &Path, statement: &'a Statement) -> Self {
        Self {
            generated_at_utc: chrono::Utc::now().to_rfc3339(),
            source: source.display().to_string(),
            output: output.display().to_string(),
            header_source: statement.header_source,
            header: &statement.header,
            relocation: &statement.relocation,
            summary: &statement.summary,
        }
    }
}

pub fn write_report(path: &Path, report: &RunReport<'_>) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::{Extractor, NullSink, RawPage, RawTable};

    fn statement(rows: &[&[&str]]) -> Statement {
        let mut pages = vec![RawPage {
            number: 1,
            tables: vec![RawTable::from_strs(rows)],
        }];
        Extractor::default().run(&mut pages, &mut NullSink).unwrap()
    }

    #[test]
    fn test_csv_header_then_rows() {
        let st = statement(&[
            &["Date", "Description", "Amount"],
            &["2024-03-01", "Rent 2024-03-01 payment", "-1,050.00"],
            &["2024-03-02", "Coffee, large", "-3.10"],
        ]);
        let mut buf = Vec::new();
        write_statement(&mut buf, &st).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "Date,Description,Amount\n2024-03-01,Rent payment,\"-1,050.00\"\n2024-03-02,\"Coffee, large\",-3.10\n"
        );
    }

    #[test]
    fn test_short_rows_padded_to_header() {
        let st = statement(&[&["2024-03-01", "Rent", "-50.00"], &["2024-03-02", "9.99"]]);
        let mut buf = Vec::new();
        write_statement(&mut buf, &st).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "Column 1,Column 2,Column 3\n2024-03-01,Rent,-50.00\n2024-03-02,9.99,\n"
        );
    }

    #[test]
    fn test_report_serializes_summary() {
        let st = statement(&[&["Date", "Amount"], &["2024-03-01", "5.00"], &["note", "x"]]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let report = RunReport::new(Path::new("jan.pdf"), Path::new("out.csv"), &st);
        write_report(&path, &report).unwrap();

        let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(v["source"], "jan.pdf");
        assert_eq!(v["header_source"], "detected");
        assert_eq!(v["summary"]["accepted"], 1);
        assert_eq!(v["summary"]["rejected"], 1);
        assert_eq!(v["relocation"]["mode"], "by_content");
    }
}
