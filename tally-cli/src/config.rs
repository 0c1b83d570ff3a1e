use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tally_core::{ExtractorSettings, PatternLibrary};

use crate::state::ensure_tally_home;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub classifier: ClassifierSection,
    pub patterns: PatternsSection,
    pub headers: HeadersSection,
    pub output: OutputSection,
    pub log: LogSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierSection {
    /// Rows with fewer cells are never transactions.
    pub min_cells: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternsSection {
    /// Stripped from cells before looking for amounts.
    pub currency_symbols: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadersSection {
    /// A row with a cell containing this word is taken as the header.
    pub keyword: String,
    pub description_keyword: String,
    pub date_keyword: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSection {
    /// Used when RUST_LOG is not set.
    pub level: String,
}

impl Default for ClassifierSection {
    fn default() -> Self {
        Self {
            min_cells: tally_core::DEFAULT_MIN_CELLS,
        }
    }
}

impl Default for PatternsSection {
    fn default() -> Self {
        Self {
            currency_symbols: vec!["€".to_string(), "$".to_string()],
        }
    }
}

impl Default for HeadersSection {
    fn default() -> Self {
        let settings = ExtractorSettings::default();
        Self {
            keyword: settings.header_keyword,
            description_keyword: settings.description_keyword,
            date_keyword: settings.date_keyword,
        }
    }
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            path: PathBuf::from("extracted_transactions.csv"),
        }
    }
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn extractor_settings(&self) -> ExtractorSettings {
        ExtractorSettings {
            min_cells: self.classifier.min_cells,
            header_keyword: self.headers.keyword.clone(),
            description_keyword: self.headers.description_keyword.clone(),
            date_keyword: self.headers.date_keyword.clone(),
        }
    }

    pub fn pattern_library(&self) -> PatternLibrary {
        PatternLibrary::with_currency_symbols(self.patterns.currency_symbols.iter().cloned())
    }
}

pub fn default_config_path() -> Result<PathBuf> {
    crate::state::config_path()
}

/// Load from `path`, falling back to defaults when the file does not exist.
pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", path.display()))
}

pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(p) => load_config_from(p),
        None => load_config_from(&default_config_path()?),
    }
}

pub fn save_config(cfg: &Config, path: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn init_config(path: Option<&Path>) -> Result<()> {
    let p = match path {
        Some(p) => p.to_path_buf(),
        None => {
            ensure_tally_home()?;
            default_config_path()?
        }
    };
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default(), &p)?;
    println!("Wrote {}", p.display());
    Ok(())
}
