//! Population table parsing from the federal statistics CSV.
//!
//! Unlike the accident export this file arrives comma-delimited, names
//! cantons in prose (often multilingual, "Genève / Genf") and has shipped
//! with several spellings of the population column. Header lookup is
//! case-insensitive and rows that cannot be resolved are skipped.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use accviz_core::model::Canton;
use accviz_core::population::PopulationTable;
use accviz_core::source::PopulationSource;
use async_trait::async_trait;
use tracing::{info, warn};

use crate::{DataError, Result};

use super::delimiter_byte;

const POPULATION_COLUMNS: [&str; 2] = ["bevoelkerung", "bevolkerung"];

/// Reads the canton population table from a CSV file on disk.
pub struct DsvPopulationSource {
    path: PathBuf,
    delimiter: char,
    name: String,
}

impl DsvPopulationSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self::with_delimiter(path, ',')
    }

    pub fn with_delimiter(path: impl AsRef<Path>, delimiter: char) -> Self {
        let path = path.as_ref().to_path_buf();
        let name = path.display().to_string();
        Self {
            path,
            delimiter,
            name,
        }
    }
}

#[async_trait]
impl PopulationSource for DsvPopulationSource {
    async fn load(&self) -> anyhow::Result<PopulationTable> {
        let path = self.path.clone();
        let delimiter = delimiter_byte(self.delimiter)?;
        let table = tokio::task::spawn_blocking(move || -> Result<PopulationTable> {
            let file = File::open(&path)?;
            parse_population(file, delimiter)
        })
        .await??;
        info!("parsed {} population entries from {}", table.len(), self.name);
        Ok(table)
    }

    fn source_name(&self) -> &str {
        &self.name
    }
}

/// Parse the population table from any reader. Exposed for in-memory tests.
fn parse_population<R: Read>(reader: R, delimiter: u8) -> Result<PopulationTable> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| DataError::Dsv(format!("cannot read header row: {e}")))?;
    let canton_idx = find_column(headers, &["kanton"])
        .ok_or_else(|| DataError::Dsv("missing column 'kanton'".to_string()))?;
    let year_idx = find_column(headers, &["jahr"])
        .ok_or_else(|| DataError::Dsv("missing column 'jahr'".to_string()))?;
    let population_idx = find_column(headers, &POPULATION_COLUMNS)
        .ok_or_else(|| DataError::Dsv("missing column 'bevoelkerung'".to_string()))?;

    let mut table = PopulationTable::new();
    let mut unmapped = 0usize;
    for row in reader.records() {
        let row = row.map_err(|e| DataError::Dsv(format!("bad row: {e}")))?;
        let name = row.get(canton_idx).unwrap_or_default();
        let Some(canton) = Canton::from_name(name) else {
            if !name.is_empty() {
                unmapped += 1;
            }
            continue;
        };
        let Ok(year) = row.get(year_idx).unwrap_or_default().parse::<i32>() else {
            continue;
        };
        let Ok(inhabitants) = row.get(population_idx).unwrap_or_default().parse::<u64>() else {
            continue;
        };
        table.insert(canton, year, inhabitants);
    }
    if unmapped > 0 {
        warn!("{unmapped} population rows name no known canton");
    }
    Ok(table)
}

/// Case-insensitive header lookup over a list of accepted spellings.
fn find_column(headers: &csv::StringRecord, candidates: &[&str]) -> Option<usize> {
    headers.iter().position(|h| {
        let lower = h.to_lowercase();
        candidates.iter().any(|c| lower == *c)
    })
}
