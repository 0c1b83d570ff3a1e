//! Opening statements and turning them into CSV.

use anyhow::{Context, Result};
use std::path::Path;
use tally_core::{Extractor, Statement, TableSource};
use tally_ingest::{PdfSource, SourceKind, TextSource};
use tracing::info;

use crate::config::Config;
use crate::output;
use crate::prompt::prompt;
use crate::sink::TracingSink;

pub fn open_source(path: &Path, password: Option<String>) -> Result<Box<dyn TableSource>> {
    match SourceKind::from_path(path) {
        SourceKind::LayoutText => Ok(Box::new(TextSource::open(path)?)),
        SourceKind::Pdf => {
            let mut pdf = PdfSource::open(path)?;
            println!("PDF has {} pages.", pdf.page_count());
            if pdf.is_encrypted() {
                let password = match password {
                    Some(p) => p,
                    None => prompt("This PDF is encrypted. Enter the password")?,
                };
                pdf.unlock(&password)?;
            }
            Ok(Box::new(pdf))
        }
    }
}

/// Extract `source` and write the CSV (and optional report). Nothing is
/// written unless extraction succeeds.
pub fn extract_to(
    cfg: &Config,
    source: &mut dyn TableSource,
    source_path: &Path,
    output: &Path,
    report: Option<&Path>,
) -> Result<Statement> {
    let extractor = Extractor::new(cfg.pattern_library(), cfg.extractor_settings());
    let statement = extractor
        .run(source, &mut TracingSink)
        .with_context(|| format!("extracting {}", source_path.display()))?;

    output::write_csv(output, &statement)?;
    info!(rows = statement.rows.len(), output = %output.display(), "csv written");

    if let Some(report_path) = report {
        output::write_report(
            report_path,
            &output::RunReport::new(source_path, output, &statement),
        )?;
    }
    Ok(statement)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tally_core::ExtractError;

    const LAYOUT: &str = "\
ACME BANK                                   Statement 1 of 1

Date         Description                  Amount
2024-03-01   Rent 2024-03-01 payment      -1,050.00
2024-03-04   Card purchase SUPERVALU      -42.10
             DUBLIN 4
";

    #[test]
    fn test_layout_statement_to_csv() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("march.txt");
        let output = dir.path().join("out.csv");
        let report = dir.path().join("report.json");
        fs::write(&input, LAYOUT).unwrap();

        let mut source = open_source(&input, None).unwrap();
        let statement =
            extract_to(&Config::default(), source.as_mut(), &input, &output, Some(&report)).unwrap();

        assert_eq!(statement.rows.len(), 2);
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "Date,Description,Amount\n\
             2024-03-01,Rent payment,\"-1,050.00\"\n\
             2024-03-04,Card purchase SUPERVALU DUBLIN 4,-42.10\n"
        );
        assert!(report.exists());
    }

    #[test]
    fn test_no_transactions_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.csv");
        let report = dir.path().join("report.json");
        let mut source = TextSource::from_text("Account summary    Page 1 of 3\nOpening    balance\n");

        let err = extract_to(&Config::default(), &mut source, Path::new("memo.txt"), &output, Some(&report))
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ExtractError>(),
            Some(ExtractError::NoTransactions { .. })
        ));
        assert!(!output.exists());
        assert!(!report.exists());
    }

    #[test]
    fn test_missing_statement_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.csv");

        let err = open_source(&dir.path().join("missing.txt"), None).err().unwrap();

        assert!(matches!(
            err.downcast_ref::<tally_ingest::IngestError>(),
            Some(tally_ingest::IngestError::NotFound { .. })
        ));
        assert!(!output.exists());
    }
}
