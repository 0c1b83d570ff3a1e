use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tally_core::{ExtractError, ExtractionEvent, Extractor};

mod config;
mod logging;
mod output;
mod prompt;
mod run;
mod sink;
mod state;

use config::Config;
use prompt::prompt;

#[derive(Parser, Debug)]
#[command(name = "tally", version, about = "Extract transaction tables from bank statements")]
struct Cli {
    /// Config file (default: ~/.tally/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract transactions from a statement (PDF or layout text) into CSV
    Extract {
        /// Statement to read; prompted for when omitted
        path: Option<PathBuf>,

        /// CSV to write (default from config: extracted_transactions.csv)
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Password for encrypted PDFs; prompted for when needed
        #[arg(long)]
        password: Option<String>,

        /// Also write a JSON run report
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Show how every extracted row was classified, without writing output
    Inspect {
        path: PathBuf,

        #[arg(long)]
        password: Option<String>,
    },

    /// Manage the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config if none exists
    Init,
    /// Print the effective config
    Show,
    /// Print the config file location
    Path,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config(cli.config.as_deref())?;
    logging::init_logging(&cfg.log.level);

    match cli.command {
        Command::Extract {
            path,
            output,
            password,
            report,
        } => {
            let path = match path {
                Some(p) => p,
                None => PathBuf::from(prompt("Enter the full path to your bank statement")?),
            };
            let output = output.unwrap_or_else(|| cfg.output.path.clone());
            extract(&cfg, &path, &output, password, report.as_deref())?;
        }

        Command::Inspect { path, password } => {
            inspect(&cfg, &path, password)?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config(cli.config.as_deref())?,
            ConfigCommand::Show => {
                let s = toml::to_string_pretty(&cfg).context("serialize config")?;
                println!("{}", s.trim_end());
            }
            ConfigCommand::Path => match cli.config {
                Some(p) => println!("{}", p.display()),
                None => println!("{}", config::default_config_path()?.display()),
            },
        },
    }

    Ok(())
}

fn extract(
    cfg: &Config,
    path: &Path,
    output: &Path,
    password: Option<String>,
    report: Option<&Path>,
) -> Result<()> {
    let mut source = run::open_source(path, password)?;
    let statement = run::extract_to(cfg, source.as_mut(), path, output, report)?;

    let s = &statement.summary;
    println!(
        "Wrote {} transactions to {} ({} rows ignored, {} repeated headers, {} cells had duplicate dates removed)",
        statement.rows.len(),
        output.display(),
        s.rejected,
        s.repeated_headers,
        s.cells_stripped
    );
    Ok(())
}

fn inspect(cfg: &Config, path: &Path, password: Option<String>) -> Result<()> {
    let mut source = run::open_source(path, password)?;
    let extractor = Extractor::new(cfg.pattern_library(), cfg.extractor_settings());
    let mut events: Vec<ExtractionEvent> = Vec::new();
    let result = extractor.run(source.as_mut(), &mut events);

    for event in &events {
        println!("{}", sink::describe(event));
    }

    match result {
        Ok(statement) => {
            let s = &statement.summary;
            println!(
                "\n{} page(s), {} table(s), {} row(s): {} kept, {} ignored, {} repeated header(s)",
                s.pages, s.tables, s.rows_seen, s.accepted, s.rejected, s.repeated_headers
            );
            println!("Header ({:?}): {:?}", statement.header_source, statement.header);
            Ok(())
        }
        Err(ExtractError::NoTransactions { rows_seen }) => {
            bail!("no transaction rows in {} ({} rows inspected)", path.display(), rows_seen)
        }
        Err(e) => Err(e).with_context(|| format!("inspecting {}", path.display())),
    }
}
